use chrono::NaiveDate;
use shared::{Choice, DeleteTarget, FormMode, ListFilters, Schedule, ScheduleStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modals::{DeleteModal, ScheduleModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_mutation::use_mutation;
use crate::hooks::use_resources::{use_overdue_schedules, use_schedules, use_todays_schedules};
use crate::services::date_utils::{format_time_range, iso_date, relative_day, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleView {
    Today,
    Overdue,
    All,
}

impl ScheduleView {
    const ALL: [ScheduleView; 3] = [ScheduleView::Today, ScheduleView::Overdue, ScheduleView::All];

    fn label(&self) -> &'static str {
        match self {
            ScheduleView::Today => "Today",
            ScheduleView::Overdue => "Overdue",
            ScheduleView::All => "All",
        }
    }
}

pub fn schedule_action_label(next: ScheduleStatus) -> &'static str {
    match next {
        ScheduleStatus::InProgress => "Start",
        ScheduleStatus::Completed => "Complete",
        ScheduleStatus::Cancelled => "Cancel",
        ScheduleStatus::Skipped => "Skip",
        ScheduleStatus::Scheduled => "Reopen",
    }
}

#[derive(Properties, PartialEq)]
struct ScheduleTableProps {
    schedules: Vec<Schedule>,
    today: NaiveDate,
    on_edit: Callback<Schedule>,
    on_delete: Callback<Schedule>,
}

#[function_component(ScheduleTable)]
fn schedule_table(props: &ScheduleTableProps) -> Html {
    let mutator = use_mutation();

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{"When"}</th>
                    <th>{"Activity"}</th>
                    <th>{"Carer"}</th>
                    <th>{"Status"}</th>
                    <th>{"Quick actions"}</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {for props.schedules.iter().map(|schedule| {
                    let quick_actions = schedule.status.allowed_next().iter().map(|next| {
                        let next = *next;
                        let onclick = {
                            let mutator = mutator.clone();
                            let id = schedule.id;
                            Callback::from(move |_: MouseEvent| {
                                mutator.run("schedules", format!("Activity marked {}", next.label().to_lowercase()), move |api| async move {
                                    api.update_schedule_status(id, next).await
                                });
                            })
                        };
                        html! {
                            <button type="button" class="btn btn-small btn-outline" {onclick}>
                                {schedule_action_label(next)}
                            </button>
                        }
                    }).collect::<Html>();
                    let on_edit = {
                        let on_edit = props.on_edit.clone();
                        let schedule = schedule.clone();
                        Callback::from(move |_: MouseEvent| on_edit.emit(schedule.clone()))
                    };
                    let on_delete = {
                        let on_delete = props.on_delete.clone();
                        let schedule = schedule.clone();
                        Callback::from(move |_: MouseEvent| on_delete.emit(schedule.clone()))
                    };
                    html! {
                        <tr key={schedule.id} class={classes!(schedule.is_overdue(props.today).then_some("row-overdue"))}>
                            <td>
                                {relative_day(schedule.date, props.today)}
                                <span class="cell-hint">{format!(" {}", format_time_range(schedule.start_time, schedule.end_time))}</span>
                            </td>
                            <td>{schedule.activity_name.clone().unwrap_or_else(|| format!("Activity #{}", schedule.activity))}</td>
                            <td>{schedule.user_name.clone().unwrap_or_else(|| format!("User #{}", schedule.user))}</td>
                            <td>
                                <StatusBadge value={schedule.status.value()} label={schedule.status.label()} />
                                {if let Some(rating) = schedule.completion_rating {
                                    html! { <span class="cell-hint">{format!(" {rating}/5")}</span> }
                                } else {
                                    html! {}
                                }}
                            </td>
                            <td class="row-actions">{quick_actions}</td>
                            <td class="row-actions">
                                <button type="button" class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                                <button type="button" class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
struct ViewProps {
    today: NaiveDate,
    on_edit: Callback<Schedule>,
    on_delete: Callback<Schedule>,
}

#[function_component(TodayView)]
fn today_view(props: &ViewProps) -> Html {
    let schedules = use_todays_schedules(props.today);
    html! {
        <>
            <QueryStatus is_loading={schedules.is_loading} error={schedules.error_message()} on_retry={schedules.revalidate.clone()} />
            {match &schedules.data {
                Some(list) if !list.is_empty() => html! {
                    <ScheduleTable schedules={(**list).clone()} today={props.today}
                        on_edit={props.on_edit.clone()} on_delete={props.on_delete.clone()} />
                },
                Some(_) => html! { <EmptyState message="Nothing scheduled for today." /> },
                None => html! {},
            }}
        </>
    }
}

#[function_component(OverdueView)]
fn overdue_view(props: &ViewProps) -> Html {
    let schedules = use_overdue_schedules(props.today);
    html! {
        <>
            <QueryStatus is_loading={schedules.is_loading} error={schedules.error_message()} on_retry={schedules.revalidate.clone()} />
            {match &schedules.data {
                Some(list) if !list.is_empty() => html! {
                    <ScheduleTable schedules={(**list).clone()} today={props.today}
                        on_edit={props.on_edit.clone()} on_delete={props.on_delete.clone()} />
                },
                Some(_) => html! { <EmptyState message="No overdue activities." /> },
                None => html! {},
            }}
        </>
    }
}

#[function_component(AllView)]
fn all_view(props: &ViewProps) -> Html {
    let config = use_config();
    let date = use_state(|| None::<NaiveDate>);
    let status = use_state(String::new);
    let page = use_state(|| 1_u32);

    let filters = ListFilters::new()
        .with_opt("date", date.map(iso_date))
        .with("status", &*status)
        .with("page", *page);
    let schedules = use_schedules(filters);

    let on_date = {
        let date = date.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok());
            page.set(1);
        })
    };
    let on_status = {
        let status = status.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status.set(select.value());
            page.set(1);
        })
    };
    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    html! {
        <>
            <div class="page-toolbar page-toolbar-secondary">
                <input type="date" class="form-input" aria-label="Date"
                    value={date.map(iso_date).unwrap_or_default()} onchange={on_date} />
                <select class="form-select" onchange={on_status}>
                    <option value="" selected={status.is_empty()}>{"All statuses"}</option>
                    {for ScheduleStatus::all().iter().map(|s| html! {
                        <option value={s.value()} selected={*status == s.value()}>{s.label()}</option>
                    })}
                </select>
            </div>
            <QueryStatus is_loading={schedules.is_loading} error={schedules.error_message()} on_retry={schedules.revalidate.clone()} />
            {match &schedules.data {
                Some(data) if !data.results.is_empty() => html! {
                    <>
                        <ScheduleTable schedules={data.results.clone()} today={props.today}
                            on_edit={props.on_edit.clone()} on_delete={props.on_delete.clone()} />
                        <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
                    </>
                },
                Some(_) => html! { <EmptyState message="No scheduled activities match these filters." /> },
                None => html! {},
            }}
        </>
    }
}

/// Scheduled activities with today, overdue and full views.
#[function_component(SchedulesPage)]
pub fn schedules_page() -> Html {
    let today = today();
    let view = use_state(|| ScheduleView::Today);
    let form_mode = use_state(|| None::<FormMode<Schedule>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Create)))
    };
    let on_edit = {
        let form_mode = form_mode.clone();
        Callback::from(move |schedule: Schedule| form_mode.set(Some(FormMode::Edit(schedule))))
    };
    let on_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |schedule: Schedule| delete_target.set(Some(DeleteTarget::Schedule(schedule))))
    };
    let on_close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(None))
    };
    let on_close_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| delete_target.set(None))
    };

    html! {
        <section class="page schedules-page">
            <div class="page-toolbar">
                <div class="tab-bar" role="tablist">
                    {for ScheduleView::ALL.iter().map(|option| {
                        let option = *option;
                        let onclick = {
                            let view = view.clone();
                            Callback::from(move |_: MouseEvent| view.set(option))
                        };
                        html! {
                            <button type="button" role="tab"
                                class={classes!("tab", (*view == option).then_some("tab-active"))} {onclick}>
                                {option.label()}
                            </button>
                        }
                    })}
                </div>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Schedule Activity"}</button>
            </div>

            {match *view {
                ScheduleView::Today => html! { <TodayView {today} on_edit={on_edit.clone()} on_delete={on_delete.clone()} /> },
                ScheduleView::Overdue => html! { <OverdueView {today} on_edit={on_edit.clone()} on_delete={on_delete.clone()} /> },
                ScheduleView::All => html! { <AllView {today} on_edit={on_edit.clone()} on_delete={on_delete.clone()} /> },
            }}

            <ScheduleModal
                is_open={form_mode.is_some()}
                mode={(*form_mode).clone().unwrap_or(FormMode::Create)}
                default_date={Some(today)}
                on_saved={Callback::noop()}
                on_close={on_close_form}
            />
            <DeleteModal
                target={(*delete_target).clone()}
                on_deleted={Callback::noop()}
                on_close={on_close_delete}
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_action_labels() {
        let labels: Vec<&str> = ScheduleStatus::InProgress
            .allowed_next()
            .iter()
            .map(|next| schedule_action_label(*next))
            .collect();
        assert_eq!(labels, vec!["Complete", "Cancel"]);
    }

    #[test]
    fn test_view_labels() {
        let labels: Vec<&str> = ScheduleView::ALL.iter().map(ScheduleView::label).collect();
        assert_eq!(labels, vec!["Today", "Overdue", "All"]);
    }
}
