use crate::models::{Choice, Id, Schedule, ScheduleStatus};
use crate::payloads::SchedulePayload;
use crate::serde_helpers::format_clock_time;
use crate::validation::{optional_text, parse_id, FieldErrors};

use super::{id_value, parse_choice, FormState};

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub activity: String,
    pub user: String,
    pub client: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub completion_rating: String,
    pub completion_notes: String,
    pub notes: String,
    /// Status when the record was loaded; `None` while creating.
    pub original_status: Option<ScheduleStatus>,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            activity: String::new(),
            user: String::new(),
            client: String::new(),
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            status: ScheduleStatus::Scheduled.value().to_string(),
            completion_rating: String::new(),
            completion_notes: String::new(),
            notes: String::new(),
            original_status: None,
        }
    }
}

impl ScheduleForm {
    /// Blank form pre-filled with a date, as used by the "add for today" buttons.
    pub fn on_date(date: chrono::NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            activity: schedule.activity.to_string(),
            user: schedule.user.to_string(),
            client: id_value(schedule.client),
            date: schedule.date.format("%Y-%m-%d").to_string(),
            start_time: format_clock_time(&schedule.start_time),
            end_time: schedule.end_time.as_ref().map(format_clock_time).unwrap_or_default(),
            status: schedule.status.value().to_string(),
            completion_rating: schedule
                .completion_rating
                .map(|rating| rating.to_string())
                .unwrap_or_default(),
            completion_notes: schedule.completion_notes.clone().unwrap_or_default(),
            notes: schedule.notes.clone().unwrap_or_default(),
            original_status: Some(schedule.status),
        }
    }

    /// Statuses the status select should offer.
    pub fn status_choices(&self) -> Vec<ScheduleStatus> {
        match self.original_status {
            Some(current) => current.choices_from(),
            None => vec![ScheduleStatus::Scheduled],
        }
    }

    pub fn is_completed(&self) -> bool {
        ScheduleStatus::from_value(self.status.trim()) == Some(ScheduleStatus::Completed)
    }
}

impl FormState for ScheduleForm {
    type Payload = SchedulePayload;

    fn value(&self, field: &str) -> String {
        match field {
            "activity" => self.activity.clone(),
            "user" => self.user.clone(),
            "client" => self.client.clone(),
            "date" => self.date.clone(),
            "start_time" => self.start_time.clone(),
            "end_time" => self.end_time.clone(),
            "status" => self.status.clone(),
            "completion_rating" => self.completion_rating.clone(),
            "completion_notes" => self.completion_notes.clone(),
            "notes" => self.notes.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "activity" => self.activity = value,
            "user" => self.user = value,
            "client" => self.client = value,
            "date" => self.date = value,
            "start_time" => self.start_time = value,
            "end_time" => self.end_time = value,
            "status" => self.status = value,
            "completion_rating" => self.completion_rating = value,
            "completion_notes" => self.completion_notes = value,
            "notes" => self.notes = value,
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.parse(&mut errors);
        errors
    }

    fn to_payload(&self) -> Result<SchedulePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let parsed = self.parse(&mut errors);
        errors.clone().into_result()?;
        parsed.ok_or(errors)
    }
}

impl ScheduleForm {
    fn parse(&self, errors: &mut FieldErrors) -> Option<SchedulePayload> {
        let activity = errors.require_id("activity", &self.activity, "Activity");
        let user = errors.require_id("user", &self.user, "Carer");
        let client: Option<Id> = if self.client.trim().is_empty() {
            None
        } else {
            let parsed = parse_id(&self.client);
            if parsed.is_none() {
                errors.insert("client", "Select a valid client");
            }
            parsed
        };
        let date = errors.require_date("date", &self.date, "Date");
        let start_time = errors.require_time("start_time", &self.start_time, "Start time");
        let end_time = errors.optional_time("end_time", &self.end_time);
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end <= start {
                errors.insert("end_time", "End time must be after start time");
            }
        }

        let status = parse_choice::<ScheduleStatus>(errors, "status", &self.status, "Status");
        if let (Some(from), Some(to)) = (self.original_status, status) {
            if !from.can_transition_to(to) {
                errors.insert(
                    "status",
                    format!("Cannot change status from {} to {}", from.label(), to.label()),
                );
            }
        }

        let completed = status == Some(ScheduleStatus::Completed);
        let completion_rating = errors
            .optional_number("completion_rating", &self.completion_rating, 1, 5)
            .map(|rating| rating as u8);
        if completion_rating.is_some() && !completed {
            errors.insert(
                "completion_rating",
                "A rating can only be given once the activity is completed",
            );
        }

        Some(SchedulePayload {
            activity: activity?,
            user: user?,
            client,
            date: date?,
            start_time: start_time?,
            end_time,
            status: status?,
            completion_rating,
            completion_notes: if completed {
                optional_text(&self.completion_notes)
            } else {
                None
            },
            notes: optional_text(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, schedule, time};

    fn filled() -> ScheduleForm {
        let mut form = ScheduleForm::on_date(date(2025, 3, 10));
        form.set("activity", "1".to_string());
        form.set("user", "2".to_string());
        form.set("start_time", "09:00".to_string());
        form
    }

    #[test]
    fn test_required_fields_block_submission() {
        let errors = ScheduleForm::default().validate();
        for field in ["activity", "user", "date", "start_time"] {
            assert!(errors.contains(field), "{field} should be required");
        }
        assert!(!errors.contains("status"));
    }

    #[test]
    fn test_end_time_must_follow_start() {
        let mut form = filled();
        form.set("end_time", "08:30".to_string());
        assert_eq!(
            form.validate().get("end_time"),
            Some("End time must be after start time")
        );
        form.set("end_time", "10:15".to_string());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.end_time, Some(time(10, 15)));
        assert_eq!(payload.status, ScheduleStatus::Scheduled);
    }

    #[test]
    fn test_rating_requires_completed_status() {
        let mut form = filled();
        form.set("completion_rating", "4".to_string());
        assert!(form.validate().contains("completion_rating"));

        let mut existing =
            ScheduleForm::from_schedule(&schedule(5, date(2025, 3, 10), ScheduleStatus::InProgress));
        existing.set("status", "completed".to_string());
        existing.set("completion_rating", "4".to_string());
        existing.set("completion_notes", "Enjoyed it".to_string());
        let payload = existing.to_payload().unwrap();
        assert_eq!(payload.completion_rating, Some(4));
        assert_eq!(payload.completion_notes.as_deref(), Some("Enjoyed it"));
    }

    #[test]
    fn test_status_transition_is_checked() {
        let mut form =
            ScheduleForm::from_schedule(&schedule(5, date(2025, 3, 10), ScheduleStatus::Scheduled));
        assert_eq!(form.status_choices().len(), 4);
        form.set("status", "completed".to_string());
        assert!(form.validate().contains("status"));
        form.set("status", "skipped".to_string());
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_existing_times_load_without_seconds() {
        let form =
            ScheduleForm::from_schedule(&schedule(5, date(2025, 3, 10), ScheduleStatus::Scheduled));
        assert_eq!(form.value("start_time"), "09:00");
        assert_eq!(form.value("end_time"), "09:30");
        assert_eq!(form.value("client"), "1");
    }
}
