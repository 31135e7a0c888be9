use chrono::NaiveDate;
use shared::serde_helpers::parse_clock_time;
use shared::{
    format_duration, scheduled_span_minutes, Choice, Client, FormMode,
    FormModalState, FormState, Shift, ShiftForm, ShiftPayload, ShiftType,
};
use yew::prelude::*;

use super::form_modal::{
    choice_options, client_options, modal_title, use_form_modal, user_options, FormModalOptions,
};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{SelectField, TextAreaField, TextField};
use crate::hooks::use_resources::{use_all, use_carers};
use crate::services::api::ApiClient;
use crate::services::date_utils::iso_date;

#[derive(Properties, PartialEq)]
pub struct ShiftModalProps {
    pub is_open: bool,
    pub mode: FormMode<Shift>,
    #[prop_or_default]
    pub default_date: Option<NaiveDate>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

/// Planned length shown under the time inputs, e.g. `8h` or `8h (overnight)`.
fn duration_hint(start: &str, end: &str) -> Option<String> {
    let start = parse_clock_time(start.trim())?;
    let end = parse_clock_time(end.trim())?;
    if start == end {
        return None;
    }
    let minutes = scheduled_span_minutes(start, end);
    if end < start {
        Some(format!("{} (overnight)", format_duration(minutes)))
    } else {
        Some(format_duration(minutes))
    }
}

#[function_component(ShiftModal)]
pub fn shift_modal(props: &ShiftModalProps) -> Html {
    let carers = use_carers();
    let clients = use_all::<Client>();
    let editing_id = props.mode.entity().map(|shift| shift.id);
    let is_edit = props.mode.is_edit();

    let initial = match props.mode.entity() {
        Some(shift) => ShiftForm::from_shift(shift),
        None => {
            let mut form = ShiftForm::default();
            if let Some(date) = props.default_date {
                form.set("date", iso_date(date));
            }
            form
        }
    };

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial,
            validate_on_open: is_edit,
            reference_ready: carers.data.is_some() && clients.data.is_some(),
            resource: "shifts",
            success_message: if is_edit { "Shift updated" } else { "Shift created" }.to_string(),
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: None,
        },
        move |api: ApiClient, payload: ShiftPayload| async move {
            match editing_id {
                Some(id) => api.update::<Shift>(id, &payload).await.map(|_| ()),
                None => api.create::<Shift>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();
    let carer_choices = carers.data.as_deref().map(|u| user_options(u)).unwrap_or_default();
    let client_choices = clients.data.as_deref().map(|c| client_options(c)).unwrap_or_default();
    let status_choices = choice_options(&modal.form().status_choices());
    let hint = duration_hint(&modal.value("start_time"), &modal.value("end_time"));

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(is_edit, "Shift")}
            on_close={modal.on_close.clone()}
            busy={busy}
        >
            {if modal.state == FormModalState::Loading {
                html! { <LoadingPanel message="Loading carers..." /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        <div class="form-row">
                            <SelectField name="carer" label="Carer" value={modal.value("carer")}
                                options={carer_choices} placeholder="Select a carer"
                                error={modal.error("carer")} on_change={on_field.clone()} required=true disabled={busy} />
                            <SelectField name="client" label="Client" value={modal.value("client")}
                                options={client_choices} placeholder="No specific client"
                                error={modal.error("client")} on_change={on_field.clone()} disabled={busy} />
                        </div>
                        <div class="form-row">
                            <TextField name="date" label="Date" input_type="date" value={modal.value("date")}
                                error={modal.error("date")} on_change={on_field.clone()} required=true disabled={busy} />
                            <SelectField name="shift_type" label="Shift type" value={modal.value("shift_type")}
                                options={ShiftType::options()} error={modal.error("shift_type")}
                                on_change={on_field.clone()} required=true disabled={busy} />
                        </div>
                        <div class="form-row">
                            <TextField name="start_time" label="Start" input_type="time" value={modal.value("start_time")}
                                error={modal.error("start_time")} on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="end_time" label="End" input_type="time" value={modal.value("end_time")}
                                error={modal.error("end_time")} on_change={on_field.clone()} required=true disabled={busy} />
                        </div>
                        {if let Some(hint) = hint {
                            html! { <p class="form-hint">{format!("Duration: {hint}")}</p> }
                        } else {
                            html! {}
                        }}
                        <SelectField name="status" label="Status" value={modal.value("status")}
                            options={status_choices} error={modal.error("status")}
                            on_change={on_field.clone()} required=true disabled={busy || !is_edit} />
                        <TextAreaField name="notes" label="Notes" value={modal.value("notes")}
                            error={modal.error("notes")} on_change={on_field.clone()} disabled={busy} />
                        <ModalFooter
                            busy={busy}
                            submit_label={if is_edit { "Save Changes" } else { "Create Shift" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_hint() {
        assert_eq!(duration_hint("06:00", "14:00").as_deref(), Some("8h"));
        assert_eq!(duration_hint("22:00", "06:00").as_deref(), Some("8h (overnight)"));
        assert_eq!(duration_hint("09:15", "10:00").as_deref(), Some("45m"));
        assert_eq!(duration_hint("09:00", "09:00"), None);
        assert_eq!(duration_hint("", "06:00"), None);
    }
}
