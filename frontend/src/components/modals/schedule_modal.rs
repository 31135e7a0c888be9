use chrono::NaiveDate;
use shared::{
    Activity, Client, FormMode, FormModalState, Schedule, ScheduleForm, SchedulePayload,
};
use yew::prelude::*;

use super::form_modal::{
    activity_options, choice_options, client_options, modal_title, use_form_modal,
    user_options, FormModalOptions,
};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{SelectField, TextAreaField, TextField};
use crate::hooks::use_resources::{use_all, use_carers};
use crate::services::api::ApiClient;

const RATING_OPTIONS: [(&str, &str); 5] = [
    ("1", "1 - Poor"),
    ("2", "2 - Fair"),
    ("3", "3 - Good"),
    ("4", "4 - Very good"),
    ("5", "5 - Excellent"),
];

#[derive(Properties, PartialEq)]
pub struct ScheduleModalProps {
    pub is_open: bool,
    pub mode: FormMode<Schedule>,
    /// Date pre-filled when adding.
    #[prop_or_default]
    pub default_date: Option<NaiveDate>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

/// Assign an activity to a carer at a date and time.
#[function_component(ScheduleModal)]
pub fn schedule_modal(props: &ScheduleModalProps) -> Html {
    let activities = use_all::<Activity>();
    let carers = use_carers();
    let clients = use_all::<Client>();
    let editing_id = props.mode.entity().map(|schedule| schedule.id);
    let is_edit = props.mode.is_edit();

    let initial = match (props.mode.entity(), props.default_date) {
        (Some(schedule), _) => ScheduleForm::from_schedule(schedule),
        (None, Some(date)) => ScheduleForm::on_date(date),
        (None, None) => ScheduleForm::default(),
    };

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial,
            validate_on_open: is_edit,
            reference_ready: activities.data.is_some()
                && carers.data.is_some()
                && clients.data.is_some(),
            resource: "schedules",
            success_message: if is_edit { "Schedule updated" } else { "Activity scheduled" }
                .to_string(),
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: None,
        },
        move |api: ApiClient, payload: SchedulePayload| async move {
            match editing_id {
                Some(id) => api.update::<Schedule>(id, &payload).await.map(|_| ()),
                None => api.create::<Schedule>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();
    let activity_choices = activities.data.as_deref().map(|a| activity_options(a)).unwrap_or_default();
    let carer_choices = carers.data.as_deref().map(|u| user_options(u)).unwrap_or_default();
    let client_choices = clients.data.as_deref().map(|c| client_options(c)).unwrap_or_default();
    let status_choices = choice_options(&modal.form().status_choices());
    let rating_choices: Vec<(String, String)> = RATING_OPTIONS
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(is_edit, "Scheduled Activity")}
            on_close={modal.on_close.clone()}
            busy={busy}
        >
            {if modal.state == FormModalState::Loading {
                html! { <LoadingPanel message="Loading activities and carers..." /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        <SelectField name="activity" label="Activity" value={modal.value("activity")}
                            options={activity_choices} placeholder="Select an activity"
                            error={modal.error("activity")} on_change={on_field.clone()} required=true disabled={busy} />
                        <div class="form-row">
                            <SelectField name="user" label="Carer" value={modal.value("user")}
                                options={carer_choices} placeholder="Select a carer"
                                error={modal.error("user")} on_change={on_field.clone()} required=true disabled={busy} />
                            <SelectField name="client" label="Client" value={modal.value("client")}
                                options={client_choices} placeholder="No specific client"
                                error={modal.error("client")} on_change={on_field.clone()} disabled={busy} />
                        </div>
                        <div class="form-row">
                            <TextField name="date" label="Date" input_type="date" value={modal.value("date")}
                                error={modal.error("date")} on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="start_time" label="Start" input_type="time" value={modal.value("start_time")}
                                error={modal.error("start_time")} on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="end_time" label="End" input_type="time" value={modal.value("end_time")}
                                error={modal.error("end_time")} on_change={on_field.clone()} disabled={busy} />
                        </div>
                        <SelectField name="status" label="Status" value={modal.value("status")}
                            options={status_choices} error={modal.error("status")}
                            on_change={on_field.clone()} required=true disabled={busy || !is_edit} />
                        {if modal.form().is_completed() {
                            html! {
                                <>
                                    <SelectField name="completion_rating" label="Completion rating"
                                        value={modal.value("completion_rating")} options={rating_choices}
                                        placeholder="Not rated" error={modal.error("completion_rating")}
                                        on_change={on_field.clone()} disabled={busy} />
                                    <TextAreaField name="completion_notes" label="Completion notes"
                                        value={modal.value("completion_notes")} error={modal.error("completion_notes")}
                                        on_change={on_field.clone()} disabled={busy} />
                                </>
                            }
                        } else {
                            html! {}
                        }}
                        <TextAreaField name="notes" label="Notes" value={modal.value("notes")}
                            error={modal.error("notes")} on_change={on_field.clone()} disabled={busy} />
                        <ModalFooter
                            busy={busy}
                            submit_label={if is_edit { "Save Changes" } else { "Schedule Activity" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}
