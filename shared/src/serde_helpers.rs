//! Serde adapters for the API's wall-clock formats.
//!
//! The API sends times as `HH:MM:SS` but accepts and documents `HH:MM`; both are
//! read, and `HH:MM` is always written back.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const TIME_FORMAT: &str = "%H:%M";

/// Parse `HH:MM` or `HH:MM:SS` (fractional seconds tolerated).
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S%.f"))
        .ok()
}

pub fn format_clock_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub mod clock_time {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_clock_time(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

pub mod option_clock_time {
    use super::*;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(&format_clock_time(time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_clock_time(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {value}"))),
        }
    }
}

/// Accepts `null` for list fields, which older records send instead of `[]`.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_time_accepts_both_forms() {
        let expected = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(parse_clock_time("06:00"), Some(expected));
        assert_eq!(parse_clock_time("06:00:00"), Some(expected));
        assert_eq!(parse_clock_time(" 06:00:00.000 "), Some(expected));
        assert_eq!(parse_clock_time("6am"), None);
        assert_eq!(parse_clock_time("25:00"), None);
    }

    #[test]
    fn test_format_clock_time_drops_seconds() {
        let time = NaiveTime::from_hms_opt(14, 30, 59).unwrap();
        assert_eq!(format_clock_time(&time), "14:30");
    }
}
