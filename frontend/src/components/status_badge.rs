use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    /// Wire value, used for the colour class.
    pub value: AttrValue,
    pub label: AttrValue,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    html! {
        <span class={format!("badge badge-{}", props.value.replace('_', "-"))}>{props.label.clone()}</span>
    }
}
