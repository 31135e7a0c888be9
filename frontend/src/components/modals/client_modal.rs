use shared::{CareLevel, Choice, Client, ClientForm, ClientFormTab, ClientPayload, FieldErrors, FormMode};
use yew::prelude::*;

use super::form_modal::{modal_title, use_form_modal, FormModalOptions};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{CheckboxField, SelectField, TextAreaField, TextField};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ClientModalProps {
    pub is_open: bool,
    pub mode: FormMode<Client>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

/// Tabbed add/edit form for a client profile.
#[function_component(ClientModal)]
pub fn client_modal(props: &ClientModalProps) -> Html {
    let active_tab = use_state(ClientFormTab::default);
    let editing_id = props.mode.entity().map(|client| client.id);

    {
        let active_tab = active_tab.clone();
        use_effect_with(props.is_open, move |is_open| {
            if *is_open {
                active_tab.set(ClientFormTab::default());
            }
            || ()
        });
    }

    let on_invalid = {
        let active_tab = active_tab.clone();
        Callback::from(move |errors: FieldErrors| {
            if let Some(tab) = ClientFormTab::first_with_errors(&errors) {
                active_tab.set(tab);
            }
        })
    };

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial: props
                .mode
                .entity()
                .map(ClientForm::from_client)
                .unwrap_or_default(),
            validate_on_open: props.mode.is_edit(),
            reference_ready: true,
            resource: "clients",
            success_message: if props.mode.is_edit() {
                "Client updated".to_string()
            } else {
                "Client added".to_string()
            },
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: Some(on_invalid),
        },
        move |api: ApiClient, payload: ClientPayload| async move {
            match editing_id {
                Some(id) => api.update::<Client>(id, &payload).await.map(|_| ()),
                None => api.create::<Client>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();
    let errors = modal.errors();

    let tabs = html! {
        <div class="tab-bar" role="tablist">
            {for ClientFormTab::ALL.iter().map(|tab| {
                let tab = *tab;
                let onclick = {
                    let active_tab = active_tab.clone();
                    Callback::from(move |_: MouseEvent| active_tab.set(tab))
                };
                let error_count = tab.error_count(errors);
                html! {
                    <button
                        type="button"
                        role="tab"
                        class={classes!("tab", (*active_tab == tab).then_some("tab-active"))}
                        {onclick}
                    >
                        {tab.label()}
                        {if error_count > 0 {
                            html! { <span class="tab-error-badge">{error_count}</span> }
                        } else {
                            html! {}
                        }}
                    </button>
                }
            })}
        </div>
    };

    let panel = match *active_tab {
        ClientFormTab::Basic => html! {
            <>
                <TextField name="client_id" label="Client ID" value={modal.value("client_id")}
                    error={modal.error("client_id")} on_change={on_field.clone()} required=true disabled={busy}
                    placeholder="e.g. TAV-0012" />
                <div class="form-row">
                    <TextField name="first_name" label="First name" value={modal.value("first_name")}
                        error={modal.error("first_name")} on_change={on_field.clone()} disabled={busy} />
                    <TextField name="last_name" label="Last name" value={modal.value("last_name")}
                        error={modal.error("last_name")} on_change={on_field.clone()} disabled={busy} />
                </div>
                <div class="form-row">
                    <TextField name="date_of_birth" label="Date of birth" input_type="date"
                        value={modal.value("date_of_birth")} error={modal.error("date_of_birth")}
                        on_change={on_field.clone()} disabled={busy} />
                    <TextField name="gender" label="Gender" value={modal.value("gender")}
                        error={modal.error("gender")} on_change={on_field.clone()} disabled={busy} />
                </div>
                <TextAreaField name="address" label="Address" value={modal.value("address")}
                    error={modal.error("address")} on_change={on_field.clone()} rows={2} disabled={busy} />
                <CheckboxField name="is_active" label="Active" checked={modal.form().is_active}
                    on_change={on_field.clone()} disabled={busy} />
            </>
        },
        ClientFormTab::Care => html! {
            <>
                <TextAreaField name="diagnosis" label="Diagnosis" value={modal.value("diagnosis")}
                    error={modal.error("diagnosis")} on_change={on_field.clone()} required=true disabled={busy} />
                <SelectField name="care_level" label="Care level" value={modal.value("care_level")}
                    options={CareLevel::options()} error={modal.error("care_level")}
                    on_change={on_field.clone()} required=true disabled={busy} />
                <TextAreaField name="communication_needs" label="Communication needs"
                    value={modal.value("communication_needs")} error={modal.error("communication_needs")}
                    on_change={on_field.clone()} disabled={busy} />
                <TextAreaField name="medical_notes" label="Medical notes"
                    value={modal.value("medical_notes")} error={modal.error("medical_notes")}
                    on_change={on_field.clone()} disabled={busy} />
            </>
        },
        ClientFormTab::Behavior => html! {
            <>
                <p class="form-hint">{"Separate entries with commas."}</p>
                <TextAreaField name="behavioral_triggers" label="Behavioral triggers"
                    value={modal.value("behavioral_triggers")} error={modal.error("behavioral_triggers")}
                    on_change={on_field.clone()} disabled={busy} placeholder="Loud noises, crowded rooms" />
                <TextAreaField name="calming_strategies" label="Calming strategies"
                    value={modal.value("calming_strategies")} error={modal.error("calming_strategies")}
                    on_change={on_field.clone()} disabled={busy} />
                <TextAreaField name="interests" label="Interests" value={modal.value("interests")}
                    error={modal.error("interests")} on_change={on_field.clone()} disabled={busy} />
            </>
        },
        ClientFormTab::Contacts => html! {
            <>
                <TextField name="emergency_contact_name" label="Contact name"
                    value={modal.value("emergency_contact_name")} error={modal.error("emergency_contact_name")}
                    on_change={on_field.clone()} disabled={busy} />
                <TextField name="emergency_contact_phone" label="Contact phone" input_type="tel"
                    value={modal.value("emergency_contact_phone")} error={modal.error("emergency_contact_phone")}
                    on_change={on_field.clone()} disabled={busy} />
                <TextField name="emergency_contact_relationship" label="Relationship"
                    value={modal.value("emergency_contact_relationship")}
                    error={modal.error("emergency_contact_relationship")}
                    on_change={on_field.clone()} disabled={busy} />
            </>
        },
    };

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(props.mode.is_edit(), "Client")}
            on_close={modal.on_close.clone()}
            busy={busy}
            wide=true
        >
            {if modal.state == shared::FormModalState::Loading {
                html! { <LoadingPanel /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        {tabs}
                        <div class="tab-panel">{panel}</div>
                        <ModalFooter
                            busy={busy}
                            submit_label={if props.mode.is_edit() { "Save Changes" } else { "Add Client" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}
