//! Client-side aggregation for the dashboard and report charts.
//!
//! Every function takes `today` explicitly; callers resolve it from the
//! browser clock.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute change relative to the previous period, rounded.
    pub percentage: u32,
}

impl Trend {
    /// Compare two period counts. With no previous activity any increase reads as 100%.
    pub fn between(current: u64, previous: u64) -> Self {
        let direction = if current > previous {
            TrendDirection::Up
        } else if current < previous {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        let percentage = if previous == 0 {
            if current > 0 {
                100
            } else {
                0
            }
        } else {
            let delta = current.abs_diff(previous) as f64;
            (delta / previous as f64 * 100.0).round() as u32
        };
        Trend {
            direction,
            percentage,
        }
    }
}

/// The "last N days" filters offered across the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRange {
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [
        DateRange::Last7Days,
        DateRange::Last30Days,
        DateRange::Last90Days,
    ];

    pub fn days(&self) -> i64 {
        match self {
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last90Days => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Last7Days => "Last 7 days",
            DateRange::Last30Days => "Last 30 days",
            DateRange::Last90Days => "Last 90 days",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            DateRange::Last7Days => "7",
            DateRange::Last30Days => "30",
            DateRange::Last90Days => "90",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.value() == value)
    }

    /// First day inside the range; the range always ends on `today`.
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days() - 1)
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.start(today) && date <= today
    }

    /// Weekly buckets for short ranges, monthly for the quarter view.
    pub fn granularity(&self) -> Granularity {
        match self {
            DateRange::Last90Days => Granularity::Month,
            _ => Granularity::Week,
        }
    }
}

/// Counts in the 7 days ending today and the 7 days before that.
pub fn week_over_week<I>(dates: I, today: NaiveDate) -> (u64, u64)
where
    I: IntoIterator<Item = NaiveDate>,
{
    let current_start = today - Duration::days(6);
    let previous_start = today - Duration::days(13);
    dates.into_iter().fold((0, 0), |(current, previous), date| {
        if date >= current_start && date <= today {
            (current + 1, previous)
        } else if date >= previous_start && date < current_start {
            (current, previous + 1)
        } else {
            (current, previous)
        }
    })
}

pub fn weekly_trend<I>(dates: I, today: NaiveDate) -> (u64, Trend)
where
    I: IntoIterator<Item = NaiveDate>,
{
    let (current, previous) = week_over_week(dates, today);
    (current, Trend::between(current, previous))
}

/// `round(part / total * 100)`, zero when there is nothing to count.
pub fn completion_percentage(completed: u64, total: u64) -> u32 {
    if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Week,
    Month,
}

/// One bar of a report chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDate,
    pub count: u64,
}

fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Week => date - Duration::days(date.weekday().num_days_from_monday() as i64),
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

fn next_bucket(start: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Week => start + Duration::days(7),
        Granularity::Month => {
            let (year, month) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start + Duration::days(31))
        }
    }
}

fn bucket_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Week => format!("Wk {}", start.format("%d %b")),
        Granularity::Month => start.format("%b %Y").to_string(),
    }
}

/// Count dates inside `range` per week or month. Empty buckets are kept so
/// charts have a continuous axis.
pub fn group_by_period<I>(dates: I, range: DateRange, today: NaiveDate) -> Vec<Bucket>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let granularity = range.granularity();
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut cursor = bucket_start(range.start(today), granularity);
    while cursor <= today {
        counts.insert(cursor, 0);
        cursor = next_bucket(cursor, granularity);
    }

    for date in dates.into_iter().filter(|d| range.contains(*d, today)) {
        *counts.entry(bucket_start(date, granularity)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(start, count)| Bucket {
            label: bucket_label(start, granularity),
            start,
            count,
        })
        .collect()
}

pub fn schedules_on(schedules: &[Schedule], day: NaiveDate) -> Vec<Schedule> {
    let mut found: Vec<Schedule> = schedules.iter().filter(|s| s.date == day).cloned().collect();
    found.sort_by_key(|s| s.start_time);
    found
}

pub fn overdue_schedules(schedules: &[Schedule], today: NaiveDate) -> Vec<Schedule> {
    let mut found: Vec<Schedule> = schedules
        .iter()
        .filter(|s| s.is_overdue(today))
        .cloned()
        .collect();
    found.sort_by_key(|s| (s.date, s.start_time));
    found
}

pub fn shifts_on(shifts: &[Shift], day: NaiveDate) -> Vec<Shift> {
    let mut found: Vec<Shift> = shifts.iter().filter(|s| s.date == day).cloned().collect();
    found.sort_by_key(|s| s.start_time);
    found
}

/// Figures shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub active_clients: u64,
    pub active_carers: u64,
    pub pending_approvals: u64,
    pub shifts_today: u64,
    pub carers_on_shift: u64,
    pub schedules_today: u64,
    pub overdue_schedules: u64,
    pub incidents_this_week: u64,
    pub incident_trend: Trend,
    pub completed_this_week: u64,
    pub completion_trend: Trend,
    /// Completed share of closed-or-due schedules in the selected range.
    pub completion_rate: u32,
    pub average_goal_progress: u32,
}

/// Borrowed collections the dashboard derives its figures from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub clients: &'a [Client],
    pub users: &'a [User],
    pub shifts: &'a [Shift],
    pub schedules: &'a [Schedule],
    pub behaviors: &'a [Behavior],
    pub goals: &'a [Goal],
}

impl DashboardStats {
    pub fn compute(inputs: DashboardInputs<'_>, range: DateRange, today: NaiveDate) -> Self {
        let (incidents_this_week, incident_trend) =
            weekly_trend(inputs.behaviors.iter().map(|b| b.date), today);

        let completed_dates = inputs
            .schedules
            .iter()
            .filter(|s| s.status == ScheduleStatus::Completed)
            .map(|s| s.date);
        let (completed_this_week, completion_trend) = weekly_trend(completed_dates, today);

        let due_in_range: Vec<&Schedule> = inputs
            .schedules
            .iter()
            .filter(|s| range.contains(s.date, today))
            .filter(|s| s.status != ScheduleStatus::Cancelled)
            .collect();
        let completed_in_range = due_in_range
            .iter()
            .filter(|s| s.status == ScheduleStatus::Completed)
            .count() as u64;

        let todays_shifts: Vec<&Shift> = inputs.shifts.iter().filter(|s| s.date == today).collect();

        let tracked_goals: Vec<&Goal> = inputs
            .goals
            .iter()
            .filter(|g| g.status != GoalStatus::Cancelled)
            .collect();
        let average_goal_progress = if tracked_goals.is_empty() {
            0
        } else {
            let total: f64 = tracked_goals.iter().map(|g| g.progress_percentage).sum();
            (total / tracked_goals.len() as f64).round().clamp(0.0, 100.0) as u32
        };

        DashboardStats {
            active_clients: inputs.clients.iter().filter(|c| c.is_active).count() as u64,
            active_carers: inputs
                .users
                .iter()
                .filter(|u| u.is_carer() && u.is_active && u.is_approved)
                .count() as u64,
            pending_approvals: inputs.users.iter().filter(|u| !u.is_approved).count() as u64,
            shifts_today: todays_shifts.len() as u64,
            carers_on_shift: todays_shifts.iter().filter(|s| s.is_clocked_in()).count() as u64,
            schedules_today: inputs.schedules.iter().filter(|s| s.date == today).count() as u64,
            overdue_schedules: overdue_schedules(inputs.schedules, today).len() as u64,
            incidents_this_week,
            incident_trend,
            completed_this_week,
            completion_trend,
            completion_rate: completion_percentage(completed_in_range, due_in_range.len() as u64),
            average_goal_progress,
        }
    }
}

/// Behavior analytics for the selected range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BehaviorSummary {
    pub total: u64,
    pub by_severity: BTreeMap<Severity, u64>,
    pub harm_incidents: u64,
    pub property_damage: u64,
    pub follow_ups_open: u64,
    pub most_common_type: Option<String>,
}

impl BehaviorSummary {
    pub fn compute(behaviors: &[Behavior], range: DateRange, today: NaiveDate) -> Self {
        let mut summary = BehaviorSummary::default();
        let mut by_type: BTreeMap<&str, u64> = BTreeMap::new();

        for behavior in behaviors.iter().filter(|b| range.contains(b.date, today)) {
            summary.total += 1;
            *summary.by_severity.entry(behavior.severity).or_insert(0) += 1;
            if behavior.involved_harm() {
                summary.harm_incidents += 1;
            }
            if behavior.property_damage {
                summary.property_damage += 1;
            }
            if behavior.follow_up_required {
                summary.follow_ups_open += 1;
            }
            *by_type.entry(behavior.behavior_type.as_str()).or_insert(0) += 1;
        }

        // Ties resolve to the alphabetically first type.
        summary.most_common_type = by_type
            .into_iter()
            .fold(None::<(&str, u64)>, |best, (kind, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((kind, count)),
            })
            .map(|(kind, _)| kind.to_string());
        summary
    }

    pub fn severity_count(&self, severity: Severity) -> u64 {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::*;

    #[test]
    fn test_trend_direction_and_percentage() {
        assert_eq!(
            Trend::between(12, 8),
            Trend { direction: TrendDirection::Up, percentage: 50 }
        );
        assert_eq!(
            Trend::between(3, 9),
            Trend { direction: TrendDirection::Down, percentage: 67 }
        );
        assert_eq!(
            Trend::between(5, 5),
            Trend { direction: TrendDirection::Stable, percentage: 0 }
        );
    }

    #[test]
    fn test_trend_guards_divide_by_zero() {
        assert_eq!(
            Trend::between(4, 0),
            Trend { direction: TrendDirection::Up, percentage: 100 }
        );
        assert_eq!(
            Trend::between(0, 0),
            Trend { direction: TrendDirection::Stable, percentage: 0 }
        );
    }

    #[test]
    fn test_date_range_bounds() {
        let today = date(2025, 3, 10);
        assert_eq!(DateRange::Last7Days.start(today), date(2025, 3, 4));
        assert!(DateRange::Last7Days.contains(date(2025, 3, 4), today));
        assert!(!DateRange::Last7Days.contains(date(2025, 3, 3), today));
        assert!(!DateRange::Last7Days.contains(date(2025, 3, 11), today));
        assert_eq!(DateRange::from_value("90"), Some(DateRange::Last90Days));
    }

    #[test]
    fn test_week_over_week_windows() {
        let today = date(2025, 3, 14);
        let dates = vec![
            date(2025, 3, 14),
            date(2025, 3, 8),
            date(2025, 3, 7),
            date(2025, 3, 1),
            date(2025, 2, 28),
        ];
        assert_eq!(week_over_week(dates, today), (2, 2));
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(3, 3), 100);
    }

    #[test]
    fn test_group_by_week_keeps_empty_buckets() {
        // Monday 2025-03-10
        let today = date(2025, 3, 12);
        let buckets = group_by_period(
            vec![date(2025, 3, 12), date(2025, 3, 10), date(2025, 1, 1)],
            DateRange::Last7Days,
            today,
        );
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, date(2025, 3, 3));
        assert_eq!(buckets[0].count, 0);
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].label, "Wk 10 Mar");
    }

    #[test]
    fn test_group_by_month_for_quarter() {
        let today = date(2025, 3, 31);
        let buckets = group_by_period(
            vec![date(2025, 1, 15), date(2025, 3, 2), date(2025, 3, 30)],
            DateRange::Last90Days,
            today,
        );
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2025", "Feb 2025", "Mar 2025"]);
        assert_eq!(buckets.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 2]);
    }

    #[test]
    fn test_dashboard_stats() {
        let today = date(2025, 3, 10);
        let clients = vec![client(1), {
            let mut c = client(2);
            c.is_active = false;
            c
        }];
        let mut pending = user(3, UserRole::SupportWorker);
        pending.is_approved = false;
        let users = vec![user(1, UserRole::SupportWorker), user(2, UserRole::Admin), pending];
        let mut on_shift = shift(1, today, ShiftStatus::InProgress);
        on_shift.clock_in = Some(timestamp());
        let shifts = vec![on_shift, shift(2, today, ShiftStatus::Scheduled)];
        let schedules = vec![
            schedule(1, today, ScheduleStatus::Scheduled),
            schedule(2, date(2025, 3, 8), ScheduleStatus::Completed),
            schedule(3, date(2025, 3, 7), ScheduleStatus::Scheduled),
            schedule(4, date(2025, 3, 6), ScheduleStatus::Cancelled),
        ];
        let behaviors = vec![
            behavior(1, today, Severity::High),
            behavior(2, date(2025, 3, 1), Severity::Low),
        ];
        let goals = vec![
            goal(1, GoalStatus::InProgress, 40.0),
            goal(2, GoalStatus::Completed, 100.0),
            goal(3, GoalStatus::Cancelled, 10.0),
        ];

        let stats = DashboardStats::compute(
            DashboardInputs {
                clients: &clients,
                users: &users,
                shifts: &shifts,
                schedules: &schedules,
                behaviors: &behaviors,
                goals: &goals,
            },
            DateRange::Last7Days,
            today,
        );

        assert_eq!(stats.active_clients, 1);
        assert_eq!(stats.active_carers, 1);
        assert_eq!(stats.pending_approvals, 1);
        assert_eq!(stats.shifts_today, 2);
        assert_eq!(stats.carers_on_shift, 1);
        assert_eq!(stats.schedules_today, 1);
        assert_eq!(stats.overdue_schedules, 1);
        assert_eq!(stats.incidents_this_week, 1);
        assert_eq!(stats.incident_trend.direction, TrendDirection::Stable);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.average_goal_progress, 70);
    }

    #[test]
    fn test_behavior_summary() {
        let today = date(2025, 3, 10);
        let mut harmful = behavior(1, today, Severity::Critical);
        harmful.harm_to_others = true;
        harmful.follow_up_required = true;
        let mut other = behavior(2, today, Severity::Low);
        other.behavior_type = "Absconding".to_string();
        let old = behavior(3, date(2024, 1, 1), Severity::High);

        let summary = BehaviorSummary::compute(&[harmful, other, old], DateRange::Last30Days, today);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.harm_incidents, 1);
        assert_eq!(summary.follow_ups_open, 1);
        assert_eq!(summary.severity_count(Severity::Critical), 1);
        assert_eq!(summary.severity_count(Severity::High), 0);
        assert_eq!(summary.most_common_type.as_deref(), Some("Absconding"));
    }

    #[test]
    fn test_overdue_and_today_views_are_sorted() {
        let today = date(2025, 3, 10);
        let mut late = schedule(1, today, ScheduleStatus::Scheduled);
        late.start_time = time(15, 0);
        let early = schedule(2, today, ScheduleStatus::Scheduled);
        let overdue = schedule(3, date(2025, 3, 2), ScheduleStatus::InProgress);
        let all = vec![late, early, overdue];

        let todays: Vec<Id> = schedules_on(&all, today).iter().map(|s| s.id).collect();
        assert_eq!(todays, vec![2, 1]);
        let overdue_ids: Vec<Id> = overdue_schedules(&all, today).iter().map(|s| s.id).collect();
        assert_eq!(overdue_ids, vec![3]);
    }

    #[test]
    fn test_overdue_count_matches_overdue_list() {
        let today = date(2025, 3, 10);
        let mut schedules: Vec<Schedule> = (1..=60)
            .map(|id| schedule(id, date(2025, 3, 1), ScheduleStatus::Scheduled))
            .collect();
        schedules.push(schedule(61, date(2025, 3, 9), ScheduleStatus::InProgress));
        schedules.push(schedule(62, date(2025, 3, 9), ScheduleStatus::Completed));
        schedules.push(schedule(63, today, ScheduleStatus::InProgress));

        let stats = DashboardStats::compute(
            DashboardInputs {
                clients: &[],
                users: &[],
                shifts: &[],
                schedules: &schedules,
                behaviors: &[],
                goals: &[],
            },
            DateRange::Last7Days,
            today,
        );
        let listed = overdue_schedules(&schedules, today);
        assert_eq!(listed.len(), 61);
        assert_eq!(stats.overdue_schedules, listed.len() as u64);
        assert!(listed.iter().any(|s| s.id == 61));
    }
}
