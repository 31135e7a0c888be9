use shared::{
    Activity, Choice, Client, FormMode, FormModalState, Goal, GoalForm, GoalPayload, GoalPriority,
    GoalStatus, Id,
};
use yew::prelude::*;

use super::form_modal::{
    activity_choices, client_options, modal_title, use_form_modal, user_choices, FormModalOptions,
};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{MultiSelectField, SelectField, TextAreaField, TextField};
use crate::hooks::use_resources::{use_all, use_carers};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct GoalModalProps {
    pub is_open: bool,
    pub mode: FormMode<Goal>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(GoalModal)]
pub fn goal_modal(props: &GoalModalProps) -> Html {
    let clients = use_all::<Client>();
    let activities = use_all::<Activity>();
    let carers = use_carers();
    let editing_id = props.mode.entity().map(|goal| goal.id);
    let is_edit = props.mode.is_edit();

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial: props.mode.entity().map(GoalForm::from_goal).unwrap_or_default(),
            validate_on_open: is_edit,
            reference_ready: clients.data.is_some()
                && activities.data.is_some()
                && carers.data.is_some(),
            resource: "goals",
            success_message: if is_edit { "Goal updated" } else { "Goal created" }.to_string(),
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: None,
        },
        move |api: ApiClient, payload: GoalPayload| async move {
            match editing_id {
                Some(id) => api.update::<Goal>(id, &payload).await.map(|_| ()),
                None => api.create::<Goal>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();
    let on_primary = modal.edit_callback("primary_activities", |form: &mut GoalForm, id: Id| {
        form.toggle_primary_activity(id)
    });
    let on_related = modal.edit_callback("related_activities", |form: &mut GoalForm, id: Id| {
        form.toggle_related_activity(id)
    });
    let on_carer = modal.edit_callback("assigned_carers", |form: &mut GoalForm, id: Id| {
        form.toggle_carer(id)
    });

    let client_choices = clients.data.as_deref().map(|c| client_options(c)).unwrap_or_default();
    let activity_list = activities.data.as_deref().map(|a| activity_choices(a)).unwrap_or_default();
    let carer_list = carers.data.as_deref().map(|u| user_choices(u)).unwrap_or_default();
    let progress = props.mode.entity().map(|goal| goal.progress_percentage.round() as u32);

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(is_edit, "Goal")}
            on_close={modal.on_close.clone()}
            busy={busy}
            wide=true
        >
            {if modal.state == FormModalState::Loading {
                html! { <LoadingPanel message="Loading clients, activities and carers..." /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        <TextField name="title" label="Title" value={modal.value("title")}
                            error={modal.error("title")} on_change={on_field.clone()} required=true disabled={busy} />
                        <TextAreaField name="description" label="Description" value={modal.value("description")}
                            error={modal.error("description")} on_change={on_field.clone()} required=true disabled={busy} />
                        <div class="form-row">
                            <SelectField name="client" label="Client" value={modal.value("client")}
                                options={client_choices} placeholder="Select a client"
                                error={modal.error("client")} on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="category" label="Category" value={modal.value("category")}
                                error={modal.error("category")} on_change={on_field.clone()} disabled={busy} />
                        </div>
                        <div class="form-row">
                            <SelectField name="priority" label="Priority" value={modal.value("priority")}
                                options={GoalPriority::options()} error={modal.error("priority")}
                                on_change={on_field.clone()} required=true disabled={busy} />
                            <SelectField name="status" label="Status" value={modal.value("status")}
                                options={GoalStatus::options()} error={modal.error("status")}
                                on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="target_date" label="Target date" input_type="date"
                                value={modal.value("target_date")} error={modal.error("target_date")}
                                on_change={on_field.clone()} disabled={busy} />
                        </div>
                        {if let Some(progress) = progress {
                            html! {
                                <div class="goal-progress">
                                    <span>{format!("Progress: {progress}%")}</span>
                                    <div class="progress-bar">
                                        <div class="progress-fill" style={format!("width: {progress}%")}></div>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                        <MultiSelectField name="primary_activities" label="Primary activities"
                            options={activity_list.clone()} selected={modal.form().primary_activities.clone()}
                            on_toggle={on_primary} error={modal.error("primary_activities")} disabled={busy} />
                        <MultiSelectField name="related_activities" label="Related activities"
                            options={activity_list} selected={modal.form().related_activities.clone()}
                            on_toggle={on_related} error={modal.error("related_activities")} disabled={busy} />
                        <MultiSelectField name="assigned_carers" label="Assigned carers"
                            options={carer_list} selected={modal.form().assigned_carers.clone()}
                            on_toggle={on_carer} error={modal.error("assigned_carers")} disabled={busy} />
                        <ModalFooter
                            busy={busy}
                            submit_label={if is_edit { "Save Changes" } else { "Create Goal" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}
