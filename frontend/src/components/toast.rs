use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u32,
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

/// Fire-and-forget notifications for components below the toast provider.
#[derive(Clone, PartialEq)]
pub struct Toaster {
    context: Option<ToastContext>,
}

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        match &self.context {
            Some(context) => context.dispatch(ToastAction::Push(kind, message)),
            None => Logger::warn_with_component("toast", &format!("No toast provider: {message}")),
        }
    }
}

#[hook]
pub fn use_toast() -> Toaster {
    Toaster {
        context: use_context::<ToastContext>(),
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    duration_ms: u32,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        let duration_ms = props.duration_ms;
        use_effect_with(props.toast.id, move |id| {
            let id = *id;
            let timeout = Timeout::new(duration_ms, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={props.toast.kind.class()} role="status">
            <span class="toast-message">{props.toast.message.clone()}</span>
            <button type="button" class="toast-close" aria-label="Dismiss" {onclick}>{"×"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastListProps {
    pub context: ToastContext,
    pub duration_ms: u32,
}

/// Stack of live toasts; each removes itself after `duration_ms`.
#[function_component(ToastList)]
pub fn toast_list(props: &ToastListProps) -> Html {
    let on_dismiss = {
        let context = props.context.clone();
        Callback::from(move |id: u32| context.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class="toast-container">
            {for props.context.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    duration_ms={props.duration_ms}
                    on_dismiss={on_dismiss.clone()}
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: ToastState, action: ToastAction) -> ToastState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let state = reduce(ToastState::default(), ToastAction::Push(ToastKind::Success, "Saved".into()));
        let state = reduce(state, ToastAction::Push(ToastKind::Error, "Failed".into()));
        let ids: Vec<u32> = state.toasts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(state.toasts[1].kind, ToastKind::Error);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let state = reduce(ToastState::default(), ToastAction::Push(ToastKind::Info, "a".into()));
        let state = reduce(state, ToastAction::Push(ToastKind::Info, "b".into()));
        let state = reduce(state, ToastAction::Dismiss(0));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "b");

        let state = reduce(state, ToastAction::Dismiss(42));
        assert_eq!(state.toasts.len(), 1);
    }
}
