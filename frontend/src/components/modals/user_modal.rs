use shared::forms::user::MIN_PASSWORD_LENGTH;
use shared::{Choice, FormMode, FormModalState, User, UserForm, UserPayload, UserRole};
use yew::prelude::*;

use super::form_modal::{modal_title, use_form_modal, FormModalOptions};
use super::modal_shell::{LoadingPanel, ModalFooter, ModalShell};
use crate::components::forms::{CheckboxField, SelectField, TextField};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct UserModalProps {
    pub is_open: bool,
    pub mode: FormMode<User>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(UserModal)]
pub fn user_modal(props: &UserModalProps) -> Html {
    let editing_id = props.mode.entity().map(|user| user.id);
    let is_edit = props.mode.is_edit();

    let modal = use_form_modal(
        FormModalOptions {
            is_open: props.is_open,
            initial: props.mode.entity().map(UserForm::from_user).unwrap_or_default(),
            validate_on_open: is_edit,
            reference_ready: true,
            resource: "users",
            success_message: if is_edit { "User updated" } else { "User created" }.to_string(),
            on_saved: props.on_saved.clone(),
            on_close: props.on_close.clone(),
            on_invalid: None,
        },
        move |api: ApiClient, payload: UserPayload| async move {
            match editing_id {
                Some(id) => api.update::<User>(id, &payload).await.map(|_| ()),
                None => api.create::<User>(&payload).await.map(|_| ()),
            }
        },
    );

    let busy = modal.busy();
    let on_field = modal.on_field.clone();

    html! {
        <ModalShell
            is_open={props.is_open}
            title={modal_title(is_edit, "User")}
            on_close={modal.on_close.clone()}
            busy={busy}
        >
            {if modal.state == FormModalState::Loading {
                html! { <LoadingPanel /> }
            } else {
                html! {
                    <form class="modal-form" onsubmit={modal.on_submit.clone()} novalidate=true>
                        <div class="form-row">
                            <TextField name="first_name" label="First name" value={modal.value("first_name")}
                                error={modal.error("first_name")} on_change={on_field.clone()} required=true disabled={busy} />
                            <TextField name="last_name" label="Last name" value={modal.value("last_name")}
                                error={modal.error("last_name")} on_change={on_field.clone()} required=true disabled={busy} />
                        </div>
                        <TextField name="username" label="Username" value={modal.value("username")}
                            error={modal.error("username")} on_change={on_field.clone()} required=true disabled={busy} />
                        <TextField name="email" label="Email" input_type="email" value={modal.value("email")}
                            error={modal.error("email")} on_change={on_field.clone()} required=true disabled={busy} />
                        <TextField name="phone" label="Phone" input_type="tel" value={modal.value("phone")}
                            error={modal.error("phone")} on_change={on_field.clone()} disabled={busy} />
                        <SelectField name="role" label="Role" value={modal.value("role")}
                            options={UserRole::options()} error={modal.error("role")}
                            on_change={on_field.clone()} required=true disabled={busy} />
                        <div class="form-row">
                            <CheckboxField name="is_approved" label="Approved" checked={modal.form().is_approved}
                                on_change={on_field.clone()} disabled={busy} />
                            <CheckboxField name="is_active" label="Active" checked={modal.form().is_active}
                                on_change={on_field.clone()} disabled={busy} />
                        </div>
                        {if modal.form().is_new {
                            html! {
                                <div class="form-row">
                                    <TextField name="password" label="Password" input_type="password"
                                        value={modal.value("password")} error={modal.error("password")}
                                        placeholder={format!("At least {MIN_PASSWORD_LENGTH} characters")}
                                        on_change={on_field.clone()} required=true disabled={busy} />
                                    <TextField name="confirm_password" label="Confirm password" input_type="password"
                                        value={modal.value("confirm_password")} error={modal.error("confirm_password")}
                                        on_change={on_field.clone()} required=true disabled={busy} />
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                        <ModalFooter
                            busy={busy}
                            submit_label={if is_edit { "Save Changes" } else { "Create User" }}
                            busy_label="Saving..."
                            on_cancel={modal.on_close.clone()}
                        />
                    </form>
                }
            }}
        </ModalShell>
    }
}
