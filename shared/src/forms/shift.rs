use crate::models::{Choice, Shift, ShiftStatus, ShiftType};
use crate::payloads::ShiftPayload;
use crate::serde_helpers::format_clock_time;
use crate::validation::{optional_text, parse_id, FieldErrors};

use super::{id_value, parse_choice, FormState};

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftForm {
    pub carer: String,
    pub client: String,
    pub date: String,
    pub shift_type: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub notes: String,
    pub original_status: Option<ShiftStatus>,
}

impl Default for ShiftForm {
    fn default() -> Self {
        let mut form = Self {
            carer: String::new(),
            client: String::new(),
            date: String::new(),
            shift_type: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            status: ShiftStatus::Scheduled.value().to_string(),
            notes: String::new(),
            original_status: None,
        };
        form.set("shift_type", ShiftType::default().value().to_string());
        form
    }
}

impl ShiftForm {
    pub fn from_shift(shift: &Shift) -> Self {
        Self {
            carer: shift.carer.to_string(),
            client: id_value(shift.client),
            date: shift.date.format("%Y-%m-%d").to_string(),
            shift_type: shift.shift_type.value().to_string(),
            start_time: format_clock_time(&shift.start_time),
            end_time: format_clock_time(&shift.end_time),
            status: shift.status.value().to_string(),
            notes: shift.notes.clone().unwrap_or_default(),
            original_status: Some(shift.status),
        }
    }

    pub fn status_choices(&self) -> Vec<ShiftStatus> {
        match self.original_status {
            Some(current) => current.choices_from(),
            None => vec![ShiftStatus::Scheduled],
        }
    }

    fn parse(&self, errors: &mut FieldErrors) -> Option<ShiftPayload> {
        let carer = errors.require_id("carer", &self.carer, "Carer");
        let client = if self.client.trim().is_empty() {
            None
        } else {
            let parsed = parse_id(&self.client);
            if parsed.is_none() {
                errors.insert("client", "Select a valid client");
            }
            parsed
        };
        let date = errors.require_date("date", &self.date, "Date");
        let shift_type = parse_choice::<ShiftType>(errors, "shift_type", &self.shift_type, "Shift type");
        let start_time = errors.require_time("start_time", &self.start_time, "Start time");
        let end_time = errors.require_time("end_time", &self.end_time, "End time");
        // End before start is a shift that runs past midnight.
        if start_time.is_some() && start_time == end_time {
            errors.insert("end_time", "End time must differ from start time");
        }

        let status = parse_choice::<ShiftStatus>(errors, "status", &self.status, "Status");
        if let (Some(from), Some(to)) = (self.original_status, status) {
            if !from.can_transition_to(to) {
                errors.insert(
                    "status",
                    format!("Cannot change status from {} to {}", from.label(), to.label()),
                );
            }
        }

        Some(ShiftPayload {
            carer: carer?,
            client,
            date: date?,
            shift_type: shift_type?,
            start_time: start_time?,
            end_time: end_time?,
            status: status?,
            notes: optional_text(&self.notes),
        })
    }
}

impl FormState for ShiftForm {
    type Payload = ShiftPayload;

    fn value(&self, field: &str) -> String {
        match field {
            "carer" => self.carer.clone(),
            "client" => self.client.clone(),
            "date" => self.date.clone(),
            "shift_type" => self.shift_type.clone(),
            "start_time" => self.start_time.clone(),
            "end_time" => self.end_time.clone(),
            "status" => self.status.clone(),
            "notes" => self.notes.clone(),
            _ => String::new(),
        }
    }

    /// Picking a preset shift type fills in its hours; `custom` keeps whatever is there.
    fn set(&mut self, field: &str, value: String) {
        match field {
            "carer" => self.carer = value,
            "client" => self.client = value,
            "date" => self.date = value,
            "shift_type" => {
                if let Some((start, end)) =
                    ShiftType::from_value(value.trim()).and_then(|kind| kind.default_times())
                {
                    self.start_time = format_clock_time(&start);
                    self.end_time = format_clock_time(&end);
                }
                self.shift_type = value;
            }
            "start_time" => self.start_time = value,
            "end_time" => self.end_time = value,
            "status" => self.status = value,
            "notes" => self.notes = value,
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.parse(&mut errors);
        errors
    }

    fn to_payload(&self) -> Result<ShiftPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let parsed = self.parse(&mut errors);
        errors.clone().into_result()?;
        parsed.ok_or(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, shift, time};

    #[test]
    fn test_new_form_starts_on_morning_preset() {
        let form = ShiftForm::default();
        assert_eq!(form.value("shift_type"), "morning");
        assert_eq!(form.value("start_time"), "06:00");
        assert_eq!(form.value("end_time"), "14:00");
    }

    #[test]
    fn test_presets_fill_times_and_custom_keeps_them() {
        let mut form = ShiftForm::default();
        form.set("shift_type", "night".to_string());
        assert_eq!(form.start_time, "22:00");
        assert_eq!(form.end_time, "06:00");

        form.set("shift_type", "morning".to_string());
        form.set("start_time", "07:30".to_string());
        form.set("shift_type", "custom".to_string());
        assert_eq!(form.start_time, "07:30");
        assert_eq!(form.end_time, "14:00");
    }

    #[test]
    fn test_required_fields_block_submission() {
        let errors = ShiftForm::default().validate();
        assert!(errors.contains("carer"));
        assert!(errors.contains("date"));
        assert!(!errors.contains("start_time"));
    }

    #[test]
    fn test_overnight_shift_is_valid_but_zero_length_is_not() {
        let mut form = ShiftForm::default();
        form.set("carer", "2".to_string());
        form.set("date", "2025-03-10".to_string());
        form.set("shift_type", "night".to_string());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.start_time, time(22, 0));
        assert_eq!(payload.end_time, time(6, 0));
        assert_eq!(payload.shift_type, ShiftType::Night);

        form.set("shift_type", "custom".to_string());
        form.set("end_time", "22:00".to_string());
        assert!(form.validate().contains("end_time"));
    }

    #[test]
    fn test_completed_shift_cannot_reopen() {
        let mut form = ShiftForm::from_shift(&shift(1, date(2025, 3, 10), ShiftStatus::Completed));
        assert_eq!(form.status_choices(), vec![ShiftStatus::Completed]);
        form.set("status", "scheduled".to_string());
        assert!(form.validate().contains("status"));
    }
}
