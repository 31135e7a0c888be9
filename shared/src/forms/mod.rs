//! Editable form state for each resource modal.
//!
//! Inputs are held as the raw strings the user typed; `validate` reports
//! problems per field and `to_payload` builds the request body once the form is
//! clean.

pub mod activity;
pub mod client;
pub mod goal;
pub mod schedule;
pub mod shift;
pub mod user;

pub use activity::{ActivityForm, GoalLinkDraft};
pub use client::{ClientForm, ClientFormTab};
pub use goal::GoalForm;
pub use schedule::ScheduleForm;
pub use shift::ShiftForm;
pub use user::UserForm;

use crate::models::{Choice, Id};
use crate::validation::FieldErrors;

pub trait FormState: Clone + PartialEq + Default {
    type Payload;

    /// Current raw value of a field, for binding to an input.
    fn value(&self, field: &str) -> String;

    /// Store user input. Unknown field names are ignored.
    fn set(&mut self, field: &str, value: String);

    fn validate(&self) -> FieldErrors;

    fn to_payload(&self) -> Result<Self::Payload, FieldErrors>;
}

pub(crate) fn parse_choice<C: Choice>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    label: &str,
) -> Option<C> {
    let parsed = C::from_value(value.trim());
    if parsed.is_none() {
        errors.insert(field, format!("Select a valid {}", label.to_lowercase()));
    }
    parsed
}

pub(crate) fn bool_value(flag: bool) -> String {
    flag.to_string()
}

pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "1")
}

pub(crate) fn id_value(id: Option<Id>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Add `id` if absent, remove it if present.
pub(crate) fn toggle_id(ids: &mut Vec<Id>, id: Id) {
    if let Some(position) = ids.iter().position(|existing| *existing == id) {
        ids.remove(position);
    } else {
        ids.push(id);
    }
}
