use chrono::NaiveDate;
use shared::{
    parse_date, parse_id, Choice, Client, DateRange, ReportFilters, ReportFormat, ReportPeriod,
    ReportType, Severity,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::charts::BucketChart;
use crate::components::query_status::QueryStatus;
use crate::components::stat_card::StatCard;
use crate::components::toast::use_toast;
use crate::hooks::use_api::use_api;
use crate::hooks::use_dashboard::use_behavior_analytics;
use crate::hooks::use_resources::{use_all, use_carers};
use crate::services::date_utils::{iso_date, today};
use crate::services::download::save_bytes;
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext};

const CUSTOM_PERIOD: &str = "custom";

/// Period from the select value, using the date inputs for a custom range.
fn build_period(choice: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<ReportPeriod> {
    if choice == CUSTOM_PERIOD {
        return Some(ReportPeriod::Custom { from: from?, to: to? });
    }
    DateRange::from_value(choice).map(ReportPeriod::Preset)
}

#[derive(Properties, PartialEq)]
struct ReportTypeCardProps {
    report_type: ReportType,
    selected: bool,
    on_select: Callback<ReportType>,
}

#[function_component(ReportTypeCard)]
fn report_type_card(props: &ReportTypeCardProps) -> Html {
    let supported = props.report_type.is_supported();
    let onclick = {
        let on_select = props.on_select.clone();
        let report_type = props.report_type;
        Callback::from(move |_: MouseEvent| on_select.emit(report_type))
    };
    html! {
        <button
            type="button"
            class={classes!("report-type-card", props.selected.then_some("selected"), (!supported).then_some("unsupported"))}
            disabled={!supported}
            {onclick}
        >
            <span class="report-type-title">{props.report_type.label().trim_end_matches(" (coming soon)")}</span>
            <span class="report-type-description">{props.report_type.description()}</span>
            {if supported {
                html! {}
            } else {
                html! { <span class="badge badge-coming-soon">{"Coming soon"}</span> }
            }}
        </button>
    }
}

#[function_component(ReportsPage)]
pub fn reports_page() -> Html {
    let api = use_api();
    let toaster = use_toast();
    let session = use_context::<SessionContext>();
    let today = today();

    let report_type = use_state(ReportType::default);
    let format = use_state(ReportFormat::default);
    let period_choice = use_state(|| DateRange::Last30Days.value().to_string());
    let custom_from = use_state(|| None::<NaiveDate>);
    let custom_to = use_state(|| None::<NaiveDate>);
    let client = use_state(|| None::<i64>);
    let carer = use_state(|| None::<i64>);
    let min_severity = use_state(|| None::<Severity>);
    let generating = use_state(|| false);
    let chart_range = use_state(|| DateRange::Last30Days);

    let clients = use_all::<Client>();
    let carers = use_carers();
    let analytics = use_behavior_analytics(*chart_range, today);

    let period = build_period(&period_choice, *custom_from, *custom_to);
    let filters = period.map(|period| ReportFilters {
        report_type: *report_type,
        format: *format,
        period,
        client: *client,
        carer: *carer,
        min_severity: *min_severity,
    });

    let on_type = {
        let report_type = report_type.clone();
        Callback::from(move |next: ReportType| report_type.set(next))
    };
    let on_format = {
        let format = format.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(next) = ReportFormat::from_value(&select.value()) {
                format.set(next);
            }
        })
    };
    let on_period = {
        let period_choice = period_choice.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            period_choice.set(select.value());
        })
    };
    let date_handler = |state: &UseStateHandle<Option<NaiveDate>>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(parse_date(&input.value()));
        })
    };
    let on_from = date_handler(&custom_from);
    let on_to = date_handler(&custom_to);
    let id_handler = |state: &UseStateHandle<Option<i64>>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            state.set(parse_id(&select.value()));
        })
    };
    let on_client = id_handler(&client);
    let on_carer = id_handler(&carer);
    let on_severity = {
        let min_severity = min_severity.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            min_severity.set(Severity::from_value(&select.value()));
        })
    };
    let on_chart_range = {
        let chart_range = chart_range.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(next) = DateRange::from_value(&select.value()) {
                chart_range.set(next);
            }
        })
    };

    let on_generate = {
        let filters = filters.clone();
        let generating = generating.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(filters) = filters.clone() else {
                toaster.error("Choose a start and end date for the custom period");
                return;
            };
            if *generating {
                return;
            }
            generating.set(true);
            toaster.info(format!("Preparing {}...", filters.filename(today)));
            let api = api.clone();
            let toaster = toaster.clone();
            let session = session.clone();
            let generating = generating.clone();
            spawn_local(async move {
                match api.generate_report(&filters, today).await {
                    Ok(bytes) => {
                        let filename = filters.filename(today);
                        match save_bytes(&bytes, &filename, filters.format.mime_type()) {
                            Ok(()) => {
                                Logger::info_with_component("reports", &format!("Downloaded {filename}"));
                                toaster.success(format!("Downloaded {filename}"));
                            }
                            Err(message) => toaster.error(message),
                        }
                    }
                    Err(error) => {
                        Logger::warn_with_component("reports", &format!("Report failed: {error}"));
                        toaster.error(error.to_string());
                        if error.is_unauthorized() {
                            if let Some(session) = session {
                                session.dispatch(SessionAction::LogOut);
                            }
                        }
                    }
                }
                generating.set(false);
            });
        })
    };

    let is_custom = *period_choice == CUSTOM_PERIOD;
    let can_generate = filters.is_some() && report_type.is_supported() && !*generating;

    html! {
        <section class="page reports-page">
            <form class="report-builder" onsubmit={on_generate}>
                <h3>{"Generate a report"}</h3>
                <div class="report-type-grid">
                    {for ReportType::all().iter().map(|t| html! {
                        <ReportTypeCard report_type={*t} selected={*report_type == *t} on_select={on_type.clone()} />
                    })}
                </div>

                <div class="form-row">
                    <label class="form-field">
                        <span class="form-label">{"Period"}</span>
                        <select class="form-select" onchange={on_period}>
                            {for DateRange::ALL.iter().map(|r| html! {
                                <option value={r.value()} selected={*period_choice == r.value()}>{r.label()}</option>
                            })}
                            <option value={CUSTOM_PERIOD} selected={is_custom}>{"Custom range"}</option>
                        </select>
                    </label>
                    {if is_custom {
                        html! {
                            <>
                                <label class="form-field">
                                    <span class="form-label">{"From"}</span>
                                    <input type="date" class="form-input" max={iso_date(today)}
                                        value={custom_from.map(iso_date).unwrap_or_default()} onchange={on_from} />
                                </label>
                                <label class="form-field">
                                    <span class="form-label">{"To"}</span>
                                    <input type="date" class="form-input" max={iso_date(today)}
                                        value={custom_to.map(iso_date).unwrap_or_default()} onchange={on_to} />
                                </label>
                            </>
                        }
                    } else {
                        html! {}
                    }}
                    <label class="form-field">
                        <span class="form-label">{"Format"}</span>
                        <select class="form-select" onchange={on_format}>
                            {for ReportFormat::all().iter().map(|f| html! {
                                <option value={f.value()} selected={*format == *f}>{f.label()}</option>
                            })}
                        </select>
                    </label>
                </div>

                <div class="form-row">
                    <label class="form-field">
                        <span class="form-label">{"Client"}</span>
                        <select class="form-select" onchange={on_client}>
                            <option value="" selected={client.is_none()}>{"All clients"}</option>
                            {for clients.data.iter().flat_map(|list| list.iter()).map(|c| html! {
                                <option value={c.id.to_string()} selected={*client == Some(c.id)}>{c.full_name()}</option>
                            })}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">{"Carer"}</span>
                        <select class="form-select" onchange={on_carer}>
                            <option value="" selected={carer.is_none()}>{"All carers"}</option>
                            {for carers.data.iter().flat_map(|list| list.iter()).map(|u| html! {
                                <option value={u.id.to_string()} selected={*carer == Some(u.id)}>{u.full_name()}</option>
                            })}
                        </select>
                    </label>
                    {if *report_type == ReportType::Behavior {
                        html! {
                            <label class="form-field">
                                <span class="form-label">{"Minimum severity"}</span>
                                <select class="form-select" onchange={on_severity}>
                                    <option value="" selected={min_severity.is_none()}>{"Any"}</option>
                                    {for Severity::all().iter().map(|s| html! {
                                        <option value={s.value()} selected={*min_severity == Some(*s)}>{s.label()}</option>
                                    })}
                                </select>
                            </label>
                        }
                    } else {
                        html! {}
                    }}
                </div>

                <button type="submit" class="btn btn-primary" disabled={!can_generate}>
                    {if *generating { "Generating..." } else { "Download report" }}
                </button>
            </form>

            <section class="report-analytics">
                <div class="page-toolbar">
                    <h3>{"Behavior trends"}</h3>
                    <select class="form-select" onchange={on_chart_range}>
                        {for DateRange::ALL.iter().map(|r| html! {
                            <option value={r.value()} selected={*chart_range == *r}>{r.label()}</option>
                        })}
                    </select>
                </div>
                <QueryStatus
                    is_loading={analytics.is_loading}
                    error={analytics.error_message()}
                    on_retry={analytics.revalidate.clone()}
                />
                {match &analytics.data {
                    Some(data) => html! {
                        <>
                            <div class="stat-grid">
                                <StatCard title="Incidents" value={data.summary.total.to_string()} icon="⚠️" />
                                <StatCard title="Involving harm" value={data.summary.harm_incidents.to_string()} icon="🩹" />
                                <StatCard title="Open follow-ups" value={data.summary.follow_ups_open.to_string()} icon="📌" />
                                <StatCard
                                    title="Most common"
                                    value={data.summary.most_common_type.clone().unwrap_or_else(|| "-".to_string())}
                                    subtitle={AttrValue::from(
                                        Severity::all()
                                            .iter()
                                            .map(|s| format!("{} {}", data.summary.severity_count(*s), s.label()))
                                            .collect::<Vec<_>>()
                                            .join(" · ")
                                    )}
                                    icon="📊"
                                />
                            </div>
                            <div class="chart-grid">
                                <BucketChart title="Incidents" buckets={data.incidents.clone()}
                                    loading={analytics.is_validating} color={(220, 38, 38)} />
                                <BucketChart title="Completed activities" buckets={data.completed_activities.clone()}
                                    loading={analytics.is_validating} color={(22, 163, 74)} />
                            </div>
                        </>
                    },
                    None => html! {},
                }}
            </section>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_build_period_presets() {
        assert_eq!(
            build_period("7", None, None),
            Some(ReportPeriod::Preset(DateRange::Last7Days))
        );
        assert_eq!(build_period("365", None, None), None);
    }

    #[test]
    fn test_build_period_custom_needs_both_dates() {
        assert_eq!(build_period(CUSTOM_PERIOD, Some(d(1)), None), None);
        assert_eq!(
            build_period(CUSTOM_PERIOD, Some(d(1)), Some(d(9))),
            Some(ReportPeriod::Custom { from: d(1), to: d(9) })
        );
    }
}
