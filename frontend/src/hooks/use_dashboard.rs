use chrono::NaiveDate;
use shared::{
    group_by_period, Behavior, BehaviorSummary, Bucket, Client, DashboardInputs,
    DashboardStats, DateRange, Goal, Schedule, ScheduleStatus, Shift, User,
};
use yew::prelude::*;

use crate::hooks::use_query::QueryState;
use crate::hooks::use_resources::use_all;
use crate::services::api::ApiError;

pub struct DashboardData {
    pub stats: Option<DashboardStats>,
    pub is_loading: bool,
    pub is_validating: bool,
    pub error: Option<ApiError>,
    pub refresh: Callback<()>,
}

fn first_error<'a>(errors: impl IntoIterator<Item = &'a Option<ApiError>>) -> Option<ApiError> {
    errors.into_iter().flatten().next().cloned()
}

fn refresh_all(callbacks: Vec<Callback<()>>) -> Callback<()> {
    Callback::from(move |_| {
        for callback in &callbacks {
            callback.emit(());
        }
    })
}

/// Dashboard card figures computed from the full collections.
#[hook]
pub fn use_dashboard_stats(range: DateRange, today: NaiveDate) -> DashboardData {
    let clients = use_all::<Client>();
    let users = use_all::<User>();
    let shifts = use_all::<Shift>();
    let schedules = use_all::<Schedule>();
    let behaviors = use_all::<Behavior>();
    let goals = use_all::<Goal>();

    let stats = match (
        &clients.data,
        &users.data,
        &shifts.data,
        &schedules.data,
        &behaviors.data,
        &goals.data,
    ) {
        (Some(c), Some(u), Some(sh), Some(sc), Some(b), Some(g)) => Some(DashboardStats::compute(
            DashboardInputs {
                clients: c,
                users: u,
                shifts: sh,
                schedules: sc,
                behaviors: b,
                goals: g,
            },
            range,
            today,
        )),
        _ => None,
    };

    DashboardData {
        is_loading: stats.is_none()
            && [
                clients.is_loading,
                users.is_loading,
                shifts.is_loading,
                schedules.is_loading,
                behaviors.is_loading,
                goals.is_loading,
            ]
            .contains(&true),
        is_validating: [
            clients.is_validating,
            users.is_validating,
            shifts.is_validating,
            schedules.is_validating,
            behaviors.is_validating,
            goals.is_validating,
        ]
        .contains(&true),
        error: first_error([
            &clients.error,
            &users.error,
            &shifts.error,
            &schedules.error,
            &behaviors.error,
            &goals.error,
        ]),
        refresh: refresh_all(vec![
            clients.revalidate,
            users.revalidate,
            shifts.revalidate,
            schedules.revalidate,
            behaviors.revalidate,
            goals.revalidate,
        ]),
        stats,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorAnalytics {
    pub summary: BehaviorSummary,
    pub incidents: Vec<Bucket>,
    pub completed_activities: Vec<Bucket>,
}

/// Incident summary and the per-period series drawn on the reports page.
#[hook]
pub fn use_behavior_analytics(range: DateRange, today: NaiveDate) -> QueryState<BehaviorAnalytics> {
    let behaviors = use_all::<Behavior>();
    let schedules = use_all::<Schedule>();

    let completed: Option<Vec<NaiveDate>> = schedules.data.as_ref().map(|schedules| {
        schedules
            .iter()
            .filter(|s| s.status == ScheduleStatus::Completed)
            .map(|s| s.date)
            .collect()
    });

    let mut state = behaviors.map(|behaviors| BehaviorAnalytics {
        summary: BehaviorSummary::compute(behaviors, range, today),
        incidents: group_by_period(behaviors.iter().map(|b| b.date), range, today),
        completed_activities: group_by_period(
            completed.clone().unwrap_or_default(),
            range,
            today,
        ),
    });
    if completed.is_none() {
        state.is_loading = state.is_loading || schedules.is_loading;
    }
    state.is_validating = state.is_validating || schedules.is_validating;
    state.error = state.error.or(schedules.error);
    state.is_error = state.error.is_some();
    state.revalidate = refresh_all(vec![state.revalidate, schedules.revalidate]);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_picks_earliest() {
        let none = None;
        let network = Some(ApiError::Network("offline".to_string()));
        let unauthorized = Some(ApiError::Unauthorized);
        assert_eq!(
            first_error([&none, &network, &unauthorized]),
            Some(ApiError::Network("offline".to_string()))
        );
        assert_eq!(first_error([&none, &none]), None);
    }
}
