use std::rc::Rc;

use shared::{DeleteEvent, DeleteFlow, DeleteStep, DeleteTarget, RiskLevel, DELETE_CONFIRMATION};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::modal_shell::ModalShell;
use crate::components::toast::use_toast;
use crate::hooks::use_api::{use_api, use_query_cache};
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, SessionContext};

pub enum DeleteAction {
    Reset(DeleteFlow),
    Event(DeleteEvent),
    Confirmation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteMachine(pub DeleteFlow);

impl Default for DeleteMachine {
    fn default() -> Self {
        Self(DeleteFlow::new(RiskLevel::Low))
    }
}

impl Reducible for DeleteMachine {
    type Action = DeleteAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut flow = self.0.clone();
        match action {
            DeleteAction::Reset(next) => flow = next,
            DeleteAction::Confirmation(input) => flow.set_confirmation(input),
            DeleteAction::Event(event) => {
                if let Err(error) = flow.apply(event) {
                    Logger::warn_with_component("delete-modal", &error.to_string());
                    return self;
                }
            }
        }
        Rc::new(DeleteMachine(flow))
    }
}

fn step_label(step: DeleteStep) -> &'static str {
    match step {
        DeleteStep::Review => "Review",
        DeleteStep::Confirm => "Confirm",
        DeleteStep::Deleting | DeleteStep::Done => "Delete",
    }
}

fn risk_class(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "risk-badge risk-low",
        RiskLevel::Medium => "risk-badge risk-medium",
        RiskLevel::High => "risk-badge risk-high",
    }
}

#[derive(Properties, PartialEq)]
pub struct DeleteModalProps {
    /// Record being deleted; the modal is open while this is set.
    pub target: Option<DeleteTarget>,
    pub on_deleted: Callback<()>,
    pub on_close: Callback<()>,
}

/// Review, optional confirmation, then delete, scaled to how much the record matters.
#[function_component(DeleteModal)]
pub fn delete_modal(props: &DeleteModalProps) -> Html {
    let machine = use_reducer(DeleteMachine::default);
    let generation = use_mut_ref(|| 0_u32);
    let api = use_api();
    let cache = use_query_cache();
    let toaster = use_toast();
    let session = use_context::<SessionContext>();

    {
        let machine = machine.clone();
        let generation = generation.clone();
        use_effect_with(props.target.clone(), move |target| {
            *generation.borrow_mut() += 1;
            if let Some(target) = target {
                machine.dispatch(DeleteAction::Reset(DeleteFlow::for_target(target)));
            }
            || ()
        });
    }

    let Some(target) = props.target.clone() else {
        return html! {};
    };
    let flow = &machine.0;
    let busy = flow.step == DeleteStep::Deleting;

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let on_back = {
        let machine = machine.clone();
        Callback::from(move |_: MouseEvent| machine.dispatch(DeleteAction::Event(DeleteEvent::Back)))
    };

    let on_confirmation_input = {
        let machine = machine.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            machine.dispatch(DeleteAction::Confirmation(input.value()));
        })
    };

    let on_proceed = {
        let machine = machine.clone();
        let target = target.clone();
        let on_deleted = props.on_deleted.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            let flow = &machine.0;
            if !flow.can_proceed() {
                return;
            }
            if !flow.is_final_step() {
                machine.dispatch(DeleteAction::Event(DeleteEvent::Proceed));
                return;
            }

            machine.dispatch(DeleteAction::Event(DeleteEvent::Proceed));
            let started = *generation.borrow();
            let api = api.clone();
            let cache = cache.clone();
            let toaster = toaster.clone();
            let session = session.clone();
            let machine = machine.clone();
            let generation = generation.clone();
            let target = target.clone();
            let on_deleted = on_deleted.clone();
            let on_close = on_close.clone();
            spawn_local(async move {
                let result = api.delete_from(target.resource(), target.id()).await;
                if *generation.borrow() != started {
                    return;
                }
                match result {
                    Ok(()) => {
                        Logger::info_with_component(
                            "delete-modal",
                            &format!("Deleted {} {}", target.resource(), target.id()),
                        );
                        machine.dispatch(DeleteAction::Event(DeleteEvent::Succeeded));
                        cache.invalidate(target.resource());
                        toaster.success(format!("{} deleted", target.kind_label()));
                        on_deleted.emit(());
                        on_close.emit(());
                    }
                    Err(error) => {
                        Logger::error_with_component(
                            "delete-modal",
                            &format!("Deleting {} {} failed: {error}", target.resource(), target.id()),
                        );
                        machine.dispatch(DeleteAction::Event(DeleteEvent::Failed));
                        toaster.error(format!("Could not delete: {error}"));
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

    let progress = html! {
        <ol class="delete-steps">
            {for flow.steps().iter().map(|step| {
                let state = if *step == flow.step {
                    "step-current"
                } else if (*step as u8) < (flow.step as u8) {
                    "step-done"
                } else {
                    "step-pending"
                };
                html! { <li class={classes!("delete-step", state)}>{step_label(*step)}</li> }
            })}
        </ol>
    };

    let body = match flow.step {
        DeleteStep::Review => html! {
            <div class="delete-review">
                <p>
                    {format!("You are about to delete {} ", target.kind_label().to_lowercase())}
                    <strong>{target.display_name()}</strong>{"."}
                </p>
                <span class={risk_class(flow.risk)}>{flow.risk.label()}</span>
                <ul class="delete-warnings">
                    {for target.warnings().into_iter().map(|warning| html! { <li>{warning}</li> })}
                </ul>
            </div>
        },
        DeleteStep::Confirm | DeleteStep::Deleting | DeleteStep::Done => html! {
            <div class="delete-confirm">
                <p>{format!("Delete {}? This cannot be undone.", target.display_name())}</p>
                {if flow.risk.needs_typed_confirmation() {
                    html! {
                        <div class="form-group">
                            <label for="delete-confirmation">
                                {"Type "}<strong>{DELETE_CONFIRMATION}</strong>{" to confirm"}
                            </label>
                            <input
                                id="delete-confirmation"
                                type="text"
                                class="form-input"
                                autocomplete="off"
                                value={flow.confirmation_input.clone()}
                                disabled={busy}
                                oninput={on_confirmation_input}
                            />
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        },
    };

    let primary_label = match (flow.step, flow.is_final_step()) {
        (DeleteStep::Deleting, _) => "Deleting...",
        (_, true) => "Delete",
        (_, false) => "Continue",
    };

    html! {
        <ModalShell
            is_open=true
            title={format!("Delete {}", target.kind_label())}
            on_close={on_close.clone()}
            busy={busy}
        >
            {progress}
            {body}
            <div class="modal-footer">
                {if flow.step == DeleteStep::Confirm {
                    html! {
                        <button type="button" class="btn btn-secondary" onclick={on_back} disabled={busy}>
                            {"Back"}
                        </button>
                    }
                } else {
                    let on_cancel = on_close.clone();
                    html! {
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={Callback::from(move |_: MouseEvent| on_cancel.emit(()))}
                            disabled={busy}
                        >
                            {"Cancel"}
                        </button>
                    }
                }}
                <button
                    type="button"
                    class={classes!("btn", if flow.is_final_step() || busy { "btn-danger" } else { "btn-primary" })}
                    onclick={on_proceed}
                    disabled={!flow.can_proceed()}
                >
                    {primary_label}
                </button>
            </div>
        </ModalShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(machine: DeleteMachine, action: DeleteAction) -> DeleteMachine {
        (*Rc::new(machine).reduce(action)).clone()
    }

    #[test]
    fn test_high_risk_needs_typed_confirmation() {
        let machine = reduce(
            DeleteMachine::default(),
            DeleteAction::Reset(DeleteFlow::new(RiskLevel::High)),
        );
        let machine = reduce(machine, DeleteAction::Event(DeleteEvent::Proceed));
        assert_eq!(machine.0.step, DeleteStep::Confirm);
        assert!(!machine.0.can_proceed());

        let machine = reduce(machine, DeleteAction::Confirmation("delete".to_string()));
        assert!(machine.0.can_proceed());
        let machine = reduce(machine, DeleteAction::Event(DeleteEvent::Proceed));
        assert_eq!(machine.0.step, DeleteStep::Deleting);
    }

    #[test]
    fn test_failure_returns_to_last_interactive_step() {
        let machine = reduce(
            DeleteMachine::default(),
            DeleteAction::Reset(DeleteFlow::new(RiskLevel::Low)),
        );
        let machine = reduce(machine, DeleteAction::Event(DeleteEvent::Proceed));
        assert_eq!(machine.0.step, DeleteStep::Deleting);
        let machine = reduce(machine, DeleteAction::Event(DeleteEvent::Failed));
        assert_eq!(machine.0.step, DeleteStep::Review);
    }

    #[test]
    fn test_rejected_event_keeps_state() {
        let machine = reduce(
            DeleteMachine::default(),
            DeleteAction::Reset(DeleteFlow::new(RiskLevel::Medium)),
        );
        let machine = reduce(machine, DeleteAction::Event(DeleteEvent::Succeeded));
        assert_eq!(machine.0.step, DeleteStep::Review);
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(step_label(DeleteStep::Review), "Review");
        assert_eq!(step_label(DeleteStep::Deleting), "Delete");
        assert_eq!(risk_class(RiskLevel::High), "risk-badge risk-high");
    }
}
