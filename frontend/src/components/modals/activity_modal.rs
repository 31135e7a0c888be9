use shared::{
    Activity, ActivityCategory, ActivityForm, ActivityPayload, Choice, Client, Difficulty, FormMode,
    FormModalState, Goal, Id,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::form_modal::{client_options, modal_title, use_form_modal, FormModalOptions};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{CheckboxField, SelectField, TextAreaField, TextField};
use crate::hooks::use_resources::use_all;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ActivityModalProps {
    pub is_open: bool,
    pub mode: FormMode<Activity>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ActivityModal)]
pub fn activity_modal(props: &ActivityModalProps) -> Html {
    let clients = use_all::<Client>();
    let goals = use_all::<Goal>();
    let editing_id = props.mode.entity().map(|activity| activity.id);
    let is_edit = props.mode.is_edit();

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial: props
                .mode
                .entity()
                .map(ActivityForm::from_activity)
                .unwrap_or_default(),
            validate_on_open: is_edit,
            reference_ready: clients.data.is_some() && goals.data.is_some(),
            resource: "activities",
            success_message: if is_edit { "Activity updated" } else { "Activity created" }.to_string(),
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: None,
        },
        move |api: ApiClient, payload: ActivityPayload| async move {
            match editing_id {
                Some(id) => api.update::<Activity>(id, &payload).await.map(|_| ()),
                None => api.create::<Activity>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();
    let on_toggle_goal = modal.edit_callback("goals", |form: &mut ActivityForm, goal: Id| {
        form.toggle_goal(goal)
    });
    let on_goal_weight = modal.edit_callback(
        "goals",
        |form: &mut ActivityForm, (goal, weight): (Id, String)| form.set_goal_weight(goal, weight),
    );

    let client_choices = clients.data.as_deref().map(|c| client_options(c)).unwrap_or_default();
    let goal_list: Vec<Goal> = goals.data.as_deref().cloned().unwrap_or_default();

    let goal_links = html! {
        <div class={classes!("form-group", modal.error("goals").map(|_| "has-error"))}>
            <span class="form-label">{"Linked goals"}</span>
            {if goal_list.is_empty() {
                html! { <p class="multi-select-empty">{"No goals have been set up yet"}</p> }
            } else {
                html! {
                    <div class="goal-links">
                        {for goal_list.iter().map(|goal| {
                            let id = goal.id;
                            let linked = modal.form().has_goal(id);
                            let onchange = {
                                let on_toggle_goal = on_toggle_goal.clone();
                                Callback::from(move |_: Event| on_toggle_goal.emit(id))
                            };
                            let oninput = {
                                let on_goal_weight = on_goal_weight.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    on_goal_weight.emit((id, input.value()));
                                })
                            };
                            html! {
                                <div class="goal-link-row" key={id}>
                                    <label>
                                        <input type="checkbox" checked={linked} disabled={busy} {onchange} />
                                        {" "}{goal.title.clone()}
                                    </label>
                                    {if linked {
                                        html! {
                                            <input
                                                type="number"
                                                class="form-input goal-weight"
                                                min="1"
                                                max="10"
                                                aria-label="Contribution weight"
                                                value={modal.form().goal_weight(id)}
                                                disabled={busy}
                                                {oninput}
                                            />
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                            }
                        })}
                    </div>
                }
            }}
            {if let Some(error) = modal.error("goals") {
                html! { <p class="field-error">{error}</p> }
            } else {
                html! {}
            }}
        </div>
    };

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(is_edit, "Activity")}
            on_close={modal.on_close.clone()}
            busy={busy}
            wide=true
        >
            {if modal.state == FormModalState::Loading {
                html! { <LoadingPanel message="Loading clients and goals..." /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        <TextField name="name" label="Name" value={modal.value("name")}
                            error={modal.error("name")} on_change={on_field.clone()} required=true disabled={busy} />
                        <TextAreaField name="description" label="Description" value={modal.value("description")}
                            error={modal.error("description")} on_change={on_field.clone()} required=true disabled={busy} />
                        <div class="form-row">
                            <SelectField name="category" label="Category" value={modal.value("category")}
                                options={ActivityCategory::options()} error={modal.error("category")}
                                on_change={on_field.clone()} required=true disabled={busy} />
                            <SelectField name="difficulty" label="Difficulty" value={modal.value("difficulty")}
                                options={Difficulty::options()} error={modal.error("difficulty")}
                                on_change={on_field.clone()} required=true disabled={busy} />
                        </div>
                        <TextAreaField name="instructions" label="Instructions" value={modal.value("instructions")}
                            error={modal.error("instructions")} on_change={on_field.clone()} rows={4} disabled={busy} />
                        <div class="form-row">
                            <TextField name="estimated_duration" label="Estimated duration (minutes)" input_type="number"
                                value={modal.value("estimated_duration")} error={modal.error("estimated_duration")}
                                on_change={on_field.clone()} disabled={busy} />
                            <SelectField name="client" label="Client" value={modal.value("client")}
                                options={client_choices} placeholder="All clients" error={modal.error("client")}
                                on_change={on_field.clone()} disabled={busy} />
                        </div>
                        {goal_links}
                        <CheckboxField name="is_active" label="Active" checked={modal.form().is_active}
                            on_change={on_field.clone()} disabled={busy} />
                        <ModalFooter
                            busy={busy}
                            submit_label={if is_edit { "Save Changes" } else { "Create Activity" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}
