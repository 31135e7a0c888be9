//! State shared by the add/edit modals.
//!
//! The modal lifecycle is driven by [`FormModalState`] transitions and the
//! form contents by a reducer, so async completions always act on the latest
//! state rather than the render they were spawned from.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use shared::{Activity, Choice, Client, FieldErrors, FormModalEvent, FormModalState, FormState, Id, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::forms::FieldChange;
use crate::components::toast::use_toast;
use crate::hooks::use_api::{use_api, use_query_cache};
use crate::services::api::{ApiClient, ApiError};
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModalMachine(pub FormModalState);

impl Reducible for ModalMachine {
    type Action = FormModalEvent;

    fn reduce(self: Rc<Self>, event: Self::Action) -> Rc<Self> {
        match self.0.next(event) {
            Ok(next) => Rc::new(ModalMachine(next)),
            Err(error) => {
                Logger::warn_with_component("form-modal", &error.to_string());
                self
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormData<F> {
    pub form: F,
    pub errors: FieldErrors,
}

pub enum FormAction<F> {
    /// Replace the form; with `validate`, show its problems straight away.
    Reset { form: F, validate: bool },
    Set(&'static str, String),
    /// Arbitrary edit to the form, clearing the error on `field`.
    Edit {
        field: &'static str,
        apply: Box<dyn FnOnce(&mut F)>,
    },
    ShowErrors(FieldErrors),
}

impl<F: FormState + 'static> Reducible for FormData<F> {
    type Action = FormAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Reset { form, validate } => {
                next.errors = if validate { form.validate() } else { FieldErrors::new() };
                next.form = form;
            }
            FormAction::Set(field, value) => {
                next.form.set(field, value);
                next.errors.clear_field(field);
            }
            FormAction::Edit { field, apply } => {
                apply(&mut next.form);
                next.errors.clear_field(field);
            }
            FormAction::ShowErrors(errors) => next.errors = errors,
        }
        Rc::new(next)
    }
}

pub struct FormModalOptions<F> {
    pub is_open: bool,
    /// Form contents when the modal opens.
    pub initial: F,
    /// Edit modals validate the loaded record on open.
    pub validate_on_open: bool,
    /// False while the option lists a form needs are still loading.
    pub reference_ready: bool,
    /// Cache prefix refreshed after a successful save.
    pub resource: &'static str,
    pub success_message: String,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
    pub on_invalid: Option<Callback<FieldErrors>>,
}

pub struct FormModalHandle<F: FormState + 'static> {
    pub data: UseReducerHandle<FormData<F>>,
    pub state: FormModalState,
    pub on_field: FieldChange,
    pub on_submit: Callback<SubmitEvent>,
    pub on_close: Callback<()>,
}

impl<F: FormState + 'static> FormModalHandle<F> {
    pub fn form(&self) -> &F {
        &self.data.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.data.errors
    }

    pub fn error(&self, field: &str) -> Option<AttrValue> {
        crate::components::forms::error_for(&self.data.errors, field)
    }

    pub fn value(&self, field: &str) -> String {
        self.data.form.value(field)
    }

    pub fn busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Callback applying `apply` to the form with the value it is emitted with.
    pub fn edit_callback<T: 'static>(
        &self,
        field: &'static str,
        apply: impl Fn(&mut F, T) + 'static,
    ) -> Callback<T> {
        let data = self.data.clone();
        let apply = Rc::new(apply);
        Callback::from(move |value: T| {
            let apply = apply.clone();
            data.dispatch(FormAction::Edit {
                field,
                apply: Box::new(move |form| apply(form, value)),
            });
        })
    }
}

#[hook]
pub fn use_form_modal<F, S, Fut>(options: FormModalOptions<F>, save: S) -> FormModalHandle<F>
where
    F: FormState + 'static,
    F::Payload: 'static,
    S: Fn(ApiClient, F::Payload) -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let machine = use_reducer(ModalMachine::default);
    let data = use_reducer(FormData::<F>::default);
    // Bumped on every open and close so late responses can be recognised.
    let generation = use_mut_ref(|| 0_u32);
    let api = use_api();
    let cache = use_query_cache();
    let toaster = use_toast();
    let session = use_context::<SessionContext>();

    {
        let machine = machine.clone();
        let data = data.clone();
        let generation = generation.clone();
        let initial = options.initial.clone();
        let validate_on_open = options.validate_on_open;
        let reference_ready = options.reference_ready;
        use_effect_with(options.is_open, move |is_open| {
            *generation.borrow_mut() += 1;
            if *is_open {
                data.dispatch(FormAction::Reset {
                    form: initial,
                    validate: validate_on_open,
                });
                machine.dispatch(FormModalEvent::Open {
                    needs_reference_data: !reference_ready,
                });
            } else {
                machine.dispatch(FormModalEvent::Close);
            }
            || ()
        });
    }

    {
        let machine = machine.clone();
        use_effect_with((machine.0, options.reference_ready), move |(state, ready)| {
            if *state == FormModalState::Loading && *ready {
                machine.dispatch(FormModalEvent::ReferenceDataLoaded);
            }
            || ()
        });
    }

    let on_field = {
        let data = data.clone();
        Callback::from(move |(field, value): (&'static str, String)| {
            data.dispatch(FormAction::Set(field, value));
        })
    };

    let on_submit = {
        let machine = machine.clone();
        let data = data.clone();
        let save = Rc::new(save);
        let on_saved = options.on_saved.clone();
        let on_close = options.on_close.clone();
        let on_invalid = options.on_invalid.clone();
        let resource = options.resource;
        let success_message = options.success_message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if machine.0 != FormModalState::Editing {
                return;
            }

            let payload = match data.form.to_payload() {
                Ok(payload) => payload,
                Err(errors) => {
                    machine.dispatch(FormModalEvent::Submit { valid: false });
                    data.dispatch(FormAction::ShowErrors(errors.clone()));
                    if let Some(on_invalid) = &on_invalid {
                        on_invalid.emit(errors);
                    }
                    return;
                }
            };

            machine.dispatch(FormModalEvent::Submit { valid: true });
            let started = *generation.borrow();
            let request = save(api.clone(), payload);
            let machine = machine.clone();
            let data = data.clone();
            let generation = generation.clone();
            let cache = cache.clone();
            let toaster = toaster.clone();
            let session = session.clone();
            let on_saved = on_saved.clone();
            let on_close = on_close.clone();
            let success_message = success_message.clone();
            spawn_local(async move {
                let result = request.await;
                if *generation.borrow() != started {
                    Logger::debug_with_component(
                        "form-modal",
                        &format!("Dropping {resource} result for a closed modal"),
                    );
                    return;
                }
                match result {
                    Ok(()) => {
                        cache.invalidate(resource);
                        toaster.success(success_message);
                        machine.dispatch(FormModalEvent::SubmitSucceeded);
                        data.dispatch(FormAction::Reset {
                            form: F::default(),
                            validate: false,
                        });
                        on_saved.emit(());
                        on_close.emit(());
                    }
                    Err(error) => {
                        Logger::error_with_component(
                            "form-modal",
                            &format!("Saving {resource} failed: {error}"),
                        );
                        machine.dispatch(FormModalEvent::SubmitFailed);
                        toaster.error(error.to_string());
                        if error.is_unauthorized() {
                            if let Some(session) = session {
                                session.dispatch(SessionAction::LogOut);
                            }
                        }
                    }
                }
            });
        })
    };

    FormModalHandle {
        data,
        state: machine.0,
        on_field,
        on_submit,
        on_close: options.on_close,
    }
}

/// Modal title for a create or edit dialog.
pub fn modal_title(is_edit: bool, noun: &str) -> String {
    if is_edit {
        format!("Edit {noun}")
    } else {
        format!("Add {noun}")
    }
}

/// `(value, label)` pairs for a subset of a choice enum.
pub fn choice_options<C: Choice>(choices: &[C]) -> Vec<(String, String)> {
    choices
        .iter()
        .map(|choice| (choice.value().to_string(), choice.label().to_string()))
        .collect()
}

pub fn client_options(clients: &[Client]) -> Vec<(String, String)> {
    clients
        .iter()
        .map(|c| (c.id.to_string(), format!("{} ({})", c.full_name(), c.client_id)))
        .collect()
}

pub fn user_options(users: &[User]) -> Vec<(String, String)> {
    users.iter().map(|u| (u.id.to_string(), u.full_name())).collect()
}

pub fn activity_options(activities: &[Activity]) -> Vec<(String, String)> {
    activities
        .iter()
        .map(|a| (a.id.to_string(), a.name.clone()))
        .collect()
}

pub fn user_choices(users: &[User]) -> Vec<(Id, String)> {
    users.iter().map(|u| (u.id, u.full_name())).collect()
}

pub fn activity_choices(activities: &[Activity]) -> Vec<(Id, String)> {
    activities.iter().map(|a| (a.id, a.name.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ClientForm;

    fn reduce<F: FormState + 'static>(data: FormData<F>, action: FormAction<F>) -> FormData<F> {
        (*Rc::new(data).reduce(action)).clone()
    }

    #[test]
    fn test_machine_ignores_invalid_events() {
        let machine = Rc::new(ModalMachine(FormModalState::Closed));
        let next = machine.reduce(FormModalEvent::SubmitSucceeded);
        assert_eq!(next.0, FormModalState::Closed);

        let next = next.reduce(FormModalEvent::Open {
            needs_reference_data: true,
        });
        assert_eq!(next.0, FormModalState::Loading);
        let next = next.reduce(FormModalEvent::ReferenceDataLoaded);
        assert_eq!(next.0, FormModalState::Editing);
    }

    #[test]
    fn test_reset_with_validation_shows_errors() {
        let data = reduce(
            FormData::default(),
            FormAction::Reset {
                form: ClientForm::default(),
                validate: true,
            },
        );
        assert!(data.errors.contains("client_id"));

        let data = reduce(
            data,
            FormAction::Reset {
                form: ClientForm::default(),
                validate: false,
            },
        );
        assert!(data.errors.is_empty());
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let data = reduce(
            FormData::default(),
            FormAction::Reset {
                form: ClientForm::default(),
                validate: true,
            },
        );
        assert!(data.errors.contains("client_id"));
        assert!(data.errors.contains("diagnosis"));

        let data = reduce(data, FormAction::Set("client_id", "TAV-0042".to_string()));
        assert_eq!(data.form.value("client_id"), "TAV-0042");
        assert!(!data.errors.contains("client_id"));
        assert!(data.errors.contains("diagnosis"));
    }

    #[test]
    fn test_choice_options_keep_order() {
        use shared::ScheduleStatus;
        let options = choice_options(&[ScheduleStatus::Scheduled, ScheduleStatus::Cancelled]);
        assert_eq!(
            options,
            vec![
                ("scheduled".to_string(), "Scheduled".to_string()),
                ("cancelled".to_string(), "Cancelled".to_string()),
            ]
        );
    }

    #[test]
    fn test_modal_title() {
        assert_eq!(modal_title(false, "Client"), "Add Client");
        assert_eq!(modal_title(true, "Shift"), "Edit Shift");
    }
}
