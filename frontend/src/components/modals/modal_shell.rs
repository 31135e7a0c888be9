use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalShellProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Backdrop clicks are ignored while a request is running.
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub wide: bool,
    #[prop_or_default]
    pub children: Html,
}

/// Backdrop, frame and title bar shared by every dialog.
#[function_component(ModalShell)]
pub fn modal_shell(props: &ModalShellProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let busy = props.busy;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !busy {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div
                class={classes!("modal", props.wide.then_some("modal-wide"))}
                role="dialog"
                aria-modal="true"
                onclick={on_modal_click}
            >
                <div class="modal-header">
                    <h3 class="modal-title">{props.title.clone()}</h3>
                    <button
                        type="button"
                        class="modal-close"
                        aria-label="Close"
                        onclick={on_close_click}
                        disabled={props.busy}
                    >
                        {"×"}
                    </button>
                </div>
                <div class="modal-body">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalFooterProps {
    pub busy: bool,
    pub submit_label: AttrValue,
    pub busy_label: AttrValue,
    pub on_cancel: Callback<()>,
}

/// Submit and cancel buttons for a form inside [`ModalShell`].
#[function_component(ModalFooter)]
pub fn modal_footer(props: &ModalFooterProps) -> Html {
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-footer">
            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.busy}>
                {"Cancel"}
            </button>
            <button type="submit" class="btn btn-primary" disabled={props.busy}>
                {if props.busy { props.busy_label.clone() } else { props.submit_label.clone() }}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingPanelProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub message: AttrValue,
}

#[function_component(LoadingPanel)]
pub fn loading_panel(props: &LoadingPanelProps) -> Html {
    html! {
        <div class="loading-panel">
            <div class="loading-spinner"></div>
            <p>{props.message.clone()}</p>
        </div>
    }
}
