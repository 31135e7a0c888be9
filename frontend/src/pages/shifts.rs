use chrono::NaiveDate;
use shared::{
    format_duration, Choice, DeleteTarget, FormMode, ListFilters, Shift, ShiftStatus,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modals::{DeleteModal, ShiftModal};
use crate::components::pager::Pager;
use crate::components::query_status::{EmptyState, QueryStatus};
use crate::components::status_badge::StatusBadge;
use crate::hooks::use_api::use_config;
use crate::hooks::use_mutation::use_mutation;
use crate::hooks::use_resources::use_shifts;
use crate::services::date_utils::{format_short_date, format_time_range, iso_date, today};

/// Button text for moving a shift into `next`.
pub fn shift_action_label(next: ShiftStatus) -> &'static str {
    match next {
        ShiftStatus::InProgress => "Start",
        ShiftStatus::Completed => "Complete",
        ShiftStatus::Cancelled => "Cancel",
        ShiftStatus::NoShow => "No-show",
        ShiftStatus::Scheduled => "Reschedule",
    }
}

/// Planned length, plus time actually worked once the shift is clocked out.
fn worked_hint(shift: &Shift) -> String {
    let planned = format_duration(shift.scheduled_minutes());
    match shift.worked_minutes() {
        Some(worked) => format!(" ({planned} planned, {} worked)", format_duration(worked)),
        None => format!(" ({planned})"),
    }
}

#[function_component(ShiftsPage)]
pub fn shifts_page() -> Html {
    let config = use_config();
    let mutator = use_mutation();
    let date = use_state(|| Some(today()));
    let status = use_state(String::new);
    let page = use_state(|| 1_u32);
    let form_mode = use_state(|| None::<FormMode<Shift>>);
    let delete_target = use_state(|| None::<DeleteTarget>);

    let filters = ListFilters::new()
        .with_opt("date", date.map(iso_date))
        .with("status", &*status)
        .with("page", *page);
    let shifts = use_shifts(filters);

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
    let on_add = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Create)))
    };
    let on_close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(None))
    };
    let on_close_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| delete_target.set(None))
    };
    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    let body = match &shifts.data {
        Some(data) if !data.results.is_empty() => html! {
            <>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Date"}</th>
                            <th>{"Carer"}</th>
                            <th>{"Type"}</th>
                            <th>{"Hours"}</th>
                            <th>{"Status"}</th>
                            <th>{"Quick actions"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for data.results.iter().map(|shift| {
                            let quick_actions = shift.status.allowed_next().iter().map(|next| {
                                let next = *next;
                                let onclick = {
                                    let mutator = mutator.clone();
                                    let id = shift.id;
                                    Callback::from(move |_: MouseEvent| {
                                        mutator.run("shifts", format!("Shift marked {}", next.label().to_lowercase()), move |api| async move {
                                            api.update_shift_status(id, next).await
                                        });
                                    })
                                };
                                html! {
                                    <button type="button" class="btn btn-small btn-outline" {onclick}>
                                        {shift_action_label(next)}
                                    </button>
                                }
                            }).collect::<Html>();
                            let on_edit = {
                                let form_mode = form_mode.clone();
                                let shift = shift.clone();
                                Callback::from(move |_: MouseEvent| form_mode.set(Some(FormMode::Edit(shift.clone()))))
                            };
                            let on_delete = {
                                let delete_target = delete_target.clone();
                                let shift = shift.clone();
                                Callback::from(move |_: MouseEvent| delete_target.set(Some(DeleteTarget::Shift(shift.clone()))))
                            };
                            html! {
                                <tr key={shift.id}>
                                    <td>{format_short_date(shift.date)}</td>
                                    <td>{shift.carer_name.clone().unwrap_or_else(|| format!("Carer #{}", shift.carer))}</td>
                                    <td>{shift.shift_type.label()}</td>
                                    <td>
                                        {format_time_range(shift.start_time, Some(shift.end_time))}
                                        <span class="cell-hint">{worked_hint(shift)}</span>
                                    </td>
                                    <td>
                                        <StatusBadge value={shift.status.value()} label={shift.status.label()} />
                                        {if shift.is_clocked_in() {
                                            html! { <span class="badge badge-live">{"Clocked in"}</span> }
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
                <Pager page={*page} total={data.count} page_size={config.page_size} on_change={on_page} />
            </>
        },
        Some(_) => html! { <EmptyState message="No shifts for these filters." /> },
        None => html! {},
    };

    html! {
        <section class="page shifts-page">
            <div class="page-toolbar">
                <input
                    type="date"
                    class="form-input"
                    aria-label="Shift date"
                    value={date.map(iso_date).unwrap_or_default()}
                    onchange={on_date}
                />
                <select class="form-select" onchange={on_status}>
                    <option value="" selected={status.is_empty()}>{"All statuses"}</option>
                    {for ShiftStatus::all().iter().map(|s| html! {
                        <option value={s.value()} selected={*status == s.value()}>{s.label()}</option>
                    })}
                </select>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"Add Shift"}</button>
            </div>

            <QueryStatus
                is_loading={shifts.is_loading}
                error={shifts.error_message()}
                on_retry={shifts.revalidate.clone()}
            />
            {body}

            <ShiftModal
                is_open={form_mode.is_some()}
                mode={(*form_mode).clone().unwrap_or(FormMode::Create)}
                default_date={*date}
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
    fn test_quick_actions_follow_transitions() {
        let labels: Vec<&str> = ShiftStatus::Scheduled
            .allowed_next()
            .iter()
            .map(|next| shift_action_label(*next))
            .collect();
        assert_eq!(labels, vec!["Start", "Cancel", "No-show"]);
        assert!(ShiftStatus::Completed.allowed_next().is_empty());
    }

    #[test]
    fn test_worked_hint() {
        use chrono::{NaiveTime, TimeZone, Utc};

        let stamp = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
        let mut shift = Shift {
            id: 1,
            carer: 4,
            carer_name: None,
            client: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            shift_type: Default::default(),
            start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            status: ShiftStatus::Completed,
            clock_in: None,
            clock_out: None,
            notes: None,
            created_at: stamp,
            updated_at: stamp,
        };
        assert_eq!(worked_hint(&shift), " (8h)");

        shift.clock_in = Some(stamp);
        shift.clock_out = Some(Utc.with_ymd_and_hms(2025, 3, 10, 13, 30, 0).unwrap());
        assert_eq!(worked_hint(&shift), " (8h planned, 7h 30m worked)");
    }
}
