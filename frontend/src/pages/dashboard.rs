use shared::{format_duration, Choice, DashboardStats, DateRange, Schedule, Shift};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::stat_card::StatCard;
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_dashboard::use_dashboard_stats;
use crate::hooks::use_periodic_refresh::use_periodic_refresh;
use crate::hooks::use_resources::{use_overdue_schedules, use_todays_schedules, use_todays_shifts};
use crate::navigation::Page;
use crate::services::date_utils::{format_date, format_short_date, format_time_range, today};

/// Rows shown per panel before "View all".
const PANEL_ROWS: usize = 5;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub on_navigate: Callback<Page>,
}

fn stat_cards(stats: &DashboardStats, range: DateRange) -> Html {
    html! {
        <div class="stat-grid">
            <StatCard title="Active Clients" value={stats.active_clients.to_string()} icon="👥" />
            <StatCard
                title="Active Carers"
                value={stats.active_carers.to_string()}
                subtitle={(stats.pending_approvals > 0)
                    .then(|| AttrValue::from(format!("{} awaiting approval", stats.pending_approvals)))}
                icon="🧑‍⚕️"
            />
            <StatCard
                title="Shifts Today"
                value={stats.shifts_today.to_string()}
                subtitle={AttrValue::from(format!("{} on shift now", stats.carers_on_shift))}
                icon="🕒"
            />
            <StatCard
                title="Activities Today"
                value={stats.schedules_today.to_string()}
                subtitle={(stats.overdue_schedules > 0)
                    .then(|| AttrValue::from(format!("{} overdue", stats.overdue_schedules)))}
                icon="📋"
            />
            <StatCard
                title="Incidents This Week"
                value={stats.incidents_this_week.to_string()}
                trend={Some(stats.incident_trend)}
                inverse_trend={true}
                icon="⚠️"
            />
            <StatCard
                title="Completed This Week"
                value={stats.completed_this_week.to_string()}
                trend={Some(stats.completion_trend)}
                icon="✅"
            />
            <StatCard
                title="Completion Rate"
                value={format!("{}%", stats.completion_rate)}
                subtitle={AttrValue::from(range.label())}
                icon="📈"
            />
            <StatCard
                title="Average Goal Progress"
                value={format!("{}%", stats.average_goal_progress)}
                icon="🎯"
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PanelProps {
    title: AttrValue,
    target: Page,
    on_navigate: Callback<Page>,
    total: usize,
    children: Html,
}

#[function_component(Panel)]
fn panel(props: &PanelProps) -> Html {
    let onclick = {
        let on_navigate = props.on_navigate.clone();
        let target = props.target;
        Callback::from(move |_: MouseEvent| on_navigate.emit(target))
    };
    html! {
        <section class="dashboard-panel">
            <header class="dashboard-panel-header">
                <h3>{props.title.clone()}</h3>
                {if props.total > PANEL_ROWS {
                    html! { <button type="button" class="btn-link" {onclick}>{format!("View all {}", props.total)}</button> }
                } else {
                    html! {}
                }}
            </header>
            {props.children.clone()}
        </section>
    }
}

fn shift_rows(shifts: &[Shift]) -> Html {
    shifts
        .iter()
        .take(PANEL_ROWS)
        .map(|shift| {
            html! {
                <li key={shift.id} class="panel-row">
                    <span class="panel-row-title">
                        {shift.carer_name.clone().unwrap_or_else(|| format!("Carer #{}", shift.carer))}
                    </span>
                    <span class="cell-hint">
                        {format!(
                            "{} · {}",
                            format_time_range(shift.start_time, Some(shift.end_time)),
                            format_duration(shift.scheduled_minutes())
                        )}
                    </span>
                    <StatusBadge value={shift.status.value()} label={shift.status.label()} />
                </li>
            }
        })
        .collect()
}

fn schedule_rows(schedules: &[Schedule], with_date: bool) -> Html {
    schedules
        .iter()
        .take(PANEL_ROWS)
        .map(|schedule| {
            let when = if with_date {
                format!("{} {}", format_short_date(schedule.date), format_time_range(schedule.start_time, schedule.end_time))
            } else {
                format_time_range(schedule.start_time, schedule.end_time)
            };
            html! {
                <li key={schedule.id} class="panel-row">
                    <span class="panel-row-title">
                        {schedule.activity_name.clone().unwrap_or_else(|| format!("Activity #{}", schedule.activity))}
                    </span>
                    <span class="cell-hint">
                        {format!("{when} · {}", schedule.user_name.clone().unwrap_or_default())}
                    </span>
                    <StatusBadge value={schedule.status.value()} label={schedule.status.label()} />
                </li>
            }
        })
        .collect()
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let config = use_config();
    let today = today();
    let range = use_state(DateRange::default);

    let data = use_dashboard_stats(*range, today);
    let shifts = use_todays_shifts(today);
    let schedules = use_todays_schedules(today);
    let overdue = use_overdue_schedules(today);

    let refresh = {
        let callbacks = [
            data.refresh.clone(),
            shifts.revalidate.clone(),
            schedules.revalidate.clone(),
            overdue.revalidate.clone(),
        ];
        Callback::from(move |_: ()| {
            for callback in &callbacks {
                callback.emit(());
            }
        })
    };
    use_periodic_refresh(config.dashboard_refresh_ms, refresh.clone(), false);

    let on_range = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(next) = DateRange::from_value(&select.value()) {
                range.set(next);
            }
        })
    };
    let on_refresh = {
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let panel_body = |rows: Html, count: usize, empty: &'static str| {
        if count == 0 {
            html! { <EmptyState message={empty} /> }
        } else {
            html! { <ul class="panel-list">{rows}</ul> }
        }
    };

    html! {
        <section class="page dashboard-page">
            <div class="page-toolbar">
                <h2 class="page-subtitle">{format_date(today)}</h2>
                <select class="form-select" onchange={on_range}>
                    {for DateRange::ALL.iter().map(|r| html! {
                        <option value={r.value()} selected={*range == *r}>{r.label()}</option>
                    })}
                </select>
                <button type="button" class="btn btn-outline" onclick={on_refresh} disabled={data.is_validating}>
                    {if data.is_validating { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <QueryStatus
                is_loading={data.is_loading}
                error={data.error.as_ref().map(ToString::to_string)}
                on_retry={data.refresh.clone()}
                loading_text={AttrValue::from("Loading dashboard...")}
            />
            {match &data.stats {
                Some(stats) => stat_cards(stats, *range),
                None => html! {},
            }}

            <div class="dashboard-panels">
                <Panel title="Today's Shifts" target={Page::Shifts} on_navigate={props.on_navigate.clone()}
                    total={shifts.data.as_ref().map_or(0, |s| s.len())}>
                    {match &shifts.data {
                        Some(list) => panel_body(shift_rows(list), list.len(), "No shifts today."),
                        None => html! { <QueryStatus is_loading={shifts.is_loading} error={shifts.error_message()} on_retry={shifts.revalidate.clone()} /> },
                    }}
                </Panel>
                <Panel title="Today's Activities" target={Page::Schedules} on_navigate={props.on_navigate.clone()}
                    total={schedules.data.as_ref().map_or(0, |s| s.len())}>
                    {match &schedules.data {
                        Some(list) => panel_body(schedule_rows(list, false), list.len(), "Nothing scheduled today."),
                        None => html! { <QueryStatus is_loading={schedules.is_loading} error={schedules.error_message()} on_retry={schedules.revalidate.clone()} /> },
                    }}
                </Panel>
                <Panel title="Overdue Activities" target={Page::Schedules} on_navigate={props.on_navigate.clone()}
                    total={overdue.data.as_ref().map_or(0, |s| s.len())}>
                    {match &overdue.data {
                        Some(list) => panel_body(schedule_rows(list, true), list.len(), "No overdue activities."),
                        None => html! { <QueryStatus is_loading={overdue.is_loading} error={overdue.error_message()} on_retry={overdue.revalidate.clone()} /> },
                    }}
                </Panel>
            </div>
        </section>
    }
}
