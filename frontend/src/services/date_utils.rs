use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shared::serde_helpers::format_clock_time;

/// Today's date in the browser's local time zone.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// e.g. "Mon 10 Mar 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %-d %b %Y").to_string()
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    format_clock_time(&time)
}

pub fn format_time_range(start: NaiveTime, end: Option<NaiveTime>) -> String {
    match end {
        Some(end) => format!("{} - {}", format_time(start), format_time(end)),
        None => format_time(start),
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%-d %b %Y %H:%M").to_string()
}

/// "Today", "Yesterday", "Tomorrow" or the short date.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        -1 => "Yesterday".to_string(),
        1 => "Tomorrow".to_string(),
        _ => format_short_date(date),
    }
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(d(2025, 3, 10)), "Mon 10 Mar 2025");
        assert_eq!(format_short_date(d(2025, 3, 1)), "1 Mar");
        assert_eq!(iso_date(d(2025, 3, 1)), "2025-03-01");
    }

    #[test]
    fn test_time_range() {
        let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(format_time_range(start, Some(end)), "22:00 - 06:00");
        assert_eq!(format_time_range(start, None), "22:00");
    }

    #[test]
    fn test_relative_day() {
        let today = d(2025, 3, 10);
        assert_eq!(relative_day(today, today), "Today");
        assert_eq!(relative_day(d(2025, 3, 9), today), "Yesterday");
        assert_eq!(relative_day(d(2025, 3, 11), today), "Tomorrow");
        assert_eq!(relative_day(d(2025, 3, 20), today), "20 Mar");
    }
}
