use yew::prelude::*;

use crate::components::modals::LoadingPanel;

#[derive(Properties, PartialEq)]
pub struct QueryStatusProps {
    pub is_loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
    pub on_retry: Callback<()>,
    #[prop_or_default]
    pub loading_text: Option<AttrValue>,
}

/// Spinner while the first load runs, or the error with a retry button.
///
/// Renders nothing once data is on screen so revalidation stays silent.
#[function_component(QueryStatus)]
pub fn query_status(props: &QueryStatusProps) -> Html {
    if props.is_loading {
        return html! {
            <LoadingPanel message={props.loading_text.clone().unwrap_or(AttrValue::Static("Loading..."))} />
        };
    }

    match &props.error {
        Some(error) => {
            let onclick = {
                let on_retry = props.on_retry.clone();
                Callback::from(move |_: MouseEvent| on_retry.emit(()))
            };
            html! {
                <div class="query-error" role="alert">
                    <p>{error.clone()}</p>
                    <button type="button" class="btn btn-secondary" {onclick}>{"Try again"}</button>
                </div>
            }
        }
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state">
            <p>{props.message.clone()}</p>
            {props.children.clone()}
        </div>
    }
}
