//! Labelled inputs bound to a form's raw string fields.
//!
//! Every field reports edits as `(field_name, value)` so a single callback can
//! drive a whole form.

use shared::{FieldErrors, Id};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub type FieldChange = Callback<(&'static str, String)>;

pub fn error_for(errors: &FieldErrors, field: &str) -> Option<AttrValue> {
    errors.get(field).map(|message| AttrValue::from(message.to_string()))
}

fn group_class(error: &Option<AttrValue>) -> &'static str {
    if error.is_some() {
        "form-group has-error"
    } else {
        "form-group"
    }
}

fn error_text(error: &Option<AttrValue>) -> Html {
    match error {
        Some(message) => html! { <p class="field-error">{message.clone()}</p> },
        None => html! {},
    }
}

fn label_text(label: &AttrValue, required: bool) -> Html {
    html! {
        <>
            {label.clone()}
            {if required { html! { <span class="required">{" *"}</span> } } else { html! {} }}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub name: &'static str,
    pub label: AttrValue,
    pub value: String,
    pub on_change: FieldChange,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        let name = props.name;
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((name, input.value()));
        })
    };

    html! {
        <div class={group_class(&props.error)}>
            <label for={props.name}>{label_text(&props.label, props.required)}</label>
            <input
                id={props.name}
                name={props.name}
                type={props.input_type.clone()}
                class="form-input"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
            />
            {error_text(&props.error)}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaFieldProps {
    pub name: &'static str,
    pub label: AttrValue,
    pub value: String,
    pub on_change: FieldChange,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or(3)]
    pub rows: u32,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        let name = props.name;
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit((name, input.value()));
        })
    };

    html! {
        <div class={group_class(&props.error)}>
            <label for={props.name}>{label_text(&props.label, props.required)}</label>
            <textarea
                id={props.name}
                name={props.name}
                class="form-textarea"
                rows={props.rows.to_string()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                {oninput}
            />
            {error_text(&props.error)}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub name: &'static str,
    pub label: AttrValue,
    pub value: String,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
    pub on_change: FieldChange,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    /// Text of a leading empty option, when the field may be blank.
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        let name = props.name;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((name, select.value()));
        })
    };

    html! {
        <div class={group_class(&props.error)}>
            <label for={props.name}>{label_text(&props.label, props.required)}</label>
            <select
                id={props.name}
                name={props.name}
                class="form-select"
                disabled={props.disabled}
                {onchange}
            >
                {if let Some(placeholder) = &props.placeholder {
                    html! { <option value="" selected={props.value.is_empty()}>{placeholder.clone()}</option> }
                } else {
                    html! {}
                }}
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>{label.clone()}</option>
                })}
            </select>
            {error_text(&props.error)}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxFieldProps {
    pub name: &'static str,
    pub label: AttrValue,
    pub checked: bool,
    pub on_change: FieldChange,
    #[prop_or_default]
    pub disabled: bool,
}

/// Reports `"true"` or `"false"`.
#[function_component(CheckboxField)]
pub fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        let name = props.name;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((name, input.checked().to_string()));
        })
    };

    html! {
        <div class="form-group form-checkbox">
            <label>
                <input
                    type="checkbox"
                    name={props.name}
                    checked={props.checked}
                    disabled={props.disabled}
                    {onchange}
                />
                {" "}{props.label.clone()}
            </label>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MultiSelectFieldProps {
    pub name: &'static str,
    pub label: AttrValue,
    /// `(id, label)` pairs.
    pub options: Vec<(Id, String)>,
    pub selected: Vec<Id>,
    pub on_toggle: Callback<Id>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or(AttrValue::Static("Nothing to choose from yet"))]
    pub empty_text: AttrValue,
}

/// Checkbox list over a set of records.
#[function_component(MultiSelectField)]
pub fn multi_select_field(props: &MultiSelectFieldProps) -> Html {
    html! {
        <div class={group_class(&props.error)}>
            <span class="form-label">{props.label.clone()}</span>
            <div class="multi-select" id={props.name}>
                {if props.options.is_empty() {
                    html! { <p class="multi-select-empty">{props.empty_text.clone()}</p> }
                } else {
                    html! {
                        {for props.options.iter().map(|(id, label)| {
                            let id = *id;
                            let onchange = {
                                let on_toggle = props.on_toggle.clone();
                                Callback::from(move |_: Event| on_toggle.emit(id))
                            };
                            html! {
                                <label class="multi-select-option" key={id}>
                                    <input
                                        type="checkbox"
                                        checked={props.selected.contains(&id)}
                                        disabled={props.disabled}
                                        {onchange}
                                    />
                                    {" "}{label.clone()}
                                </label>
                            }
                        })}
                    }
                }}
            </div>
            {error_text(&props.error)}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_reads_field_message() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Enter a valid email address");
        assert_eq!(
            error_for(&errors, "email"),
            Some(AttrValue::from("Enter a valid email address"))
        );
        assert_eq!(error_for(&errors, "phone"), None);
    }

    #[test]
    fn test_group_class_marks_errors() {
        assert_eq!(group_class(&None), "form-group");
        assert_eq!(group_class(&Some(AttrValue::from("x"))), "form-group has-error");
    }
}
