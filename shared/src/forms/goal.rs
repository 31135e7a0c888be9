use crate::models::{Choice, Goal, GoalPriority, GoalStatus, Id};
use crate::payloads::GoalPayload;
use crate::validation::{optional_text, FieldErrors};

use super::{parse_choice, toggle_id, FormState};

#[derive(Debug, Clone, PartialEq)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub client: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub target_date: String,
    pub primary_activities: Vec<Id>,
    pub related_activities: Vec<Id>,
    pub assigned_carers: Vec<Id>,
}

impl Default for GoalForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            client: String::new(),
            category: String::new(),
            priority: GoalPriority::default().value().to_string(),
            status: GoalStatus::default().value().to_string(),
            target_date: String::new(),
            primary_activities: Vec::new(),
            related_activities: Vec::new(),
            assigned_carers: Vec::new(),
        }
    }
}

impl GoalForm {
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone(),
            client: goal.client.to_string(),
            category: goal.category.clone().unwrap_or_default(),
            priority: goal.priority.value().to_string(),
            status: goal.status.value().to_string(),
            target_date: goal
                .target_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            primary_activities: goal.primary_activities.clone(),
            related_activities: goal.related_activities.clone(),
            assigned_carers: goal.assigned_carers.clone(),
        }
    }

    /// Selecting an activity as primary drops it from the related list.
    pub fn toggle_primary_activity(&mut self, id: Id) {
        toggle_id(&mut self.primary_activities, id);
        if self.primary_activities.contains(&id) {
            self.related_activities.retain(|related| *related != id);
        }
    }

    pub fn toggle_related_activity(&mut self, id: Id) {
        toggle_id(&mut self.related_activities, id);
        if self.related_activities.contains(&id) {
            self.primary_activities.retain(|primary| *primary != id);
        }
    }

    pub fn toggle_carer(&mut self, id: Id) {
        toggle_id(&mut self.assigned_carers, id);
    }
}

impl FormState for GoalForm {
    type Payload = GoalPayload;

    fn value(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "client" => self.client.clone(),
            "category" => self.category.clone(),
            "priority" => self.priority.clone(),
            "status" => self.status.clone(),
            "target_date" => self.target_date.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "title" => self.title = value,
            "description" => self.description = value,
            "client" => self.client = value,
            "category" => self.category = value,
            "priority" => self.priority = value,
            "status" => self.status = value,
            "target_date" => self.target_date = value,
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.parse(&mut errors);
        errors
    }

    fn to_payload(&self) -> Result<GoalPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let parsed = self.parse(&mut errors);
        errors.clone().into_result()?;
        parsed.ok_or(errors)
    }
}

impl GoalForm {
    fn parse(&self, errors: &mut FieldErrors) -> Option<GoalPayload> {
        let title_ok = errors.require("title", &self.title, "Title");
        let description_ok = errors.require("description", &self.description, "Description");
        let client = errors.require_id("client", &self.client, "Client");
        let priority = parse_choice::<GoalPriority>(errors, "priority", &self.priority, "Priority");
        let status = parse_choice::<GoalStatus>(errors, "status", &self.status, "Status");
        let target_date = errors.optional_date("target_date", &self.target_date);
        if self
            .primary_activities
            .iter()
            .any(|id| self.related_activities.contains(id))
        {
            errors.insert(
                "related_activities",
                "An activity cannot be both primary and related",
            );
        }

        if !(title_ok && description_ok) {
            return None;
        }
        Some(GoalPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            client: client?,
            category: optional_text(&self.category),
            priority: priority?,
            status: status?,
            target_date,
            primary_activities: self.primary_activities.clone(),
            related_activities: self.related_activities.clone(),
            assigned_carers: self.assigned_carers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, goal};

    #[test]
    fn test_required_fields_block_submission() {
        let errors = GoalForm::default().validate();
        for field in ["title", "description", "client"] {
            assert!(errors.contains(field), "{field} should be required");
        }
        assert!(GoalForm::default().to_payload().is_err());
    }

    #[test]
    fn test_activity_lists_stay_disjoint() {
        let mut form = GoalForm::default();
        form.toggle_related_activity(3);
        form.toggle_primary_activity(3);
        assert_eq!(form.primary_activities, vec![3]);
        assert!(form.related_activities.is_empty());

        form.related_activities.push(3);
        assert!(form.validate().contains("related_activities"));
    }

    #[test]
    fn test_payload_from_existing_goal() {
        let mut form = GoalForm::from_goal(&goal(4, GoalStatus::InProgress, 25.0));
        form.set("target_date", "2025-06-30".to_string());
        form.toggle_carer(7);
        form.toggle_carer(8);
        form.toggle_carer(7);
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.client, 1);
        assert_eq!(payload.status, GoalStatus::InProgress);
        assert_eq!(payload.target_date, Some(date(2025, 6, 30)));
        assert_eq!(payload.assigned_carers, vec![8]);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_bad_target_date() {
        let mut form = GoalForm::from_goal(&goal(4, GoalStatus::NotStarted, 0.0));
        form.set("target_date", "30/06/2025".to_string());
        assert_eq!(
            form.validate().get("target_date"),
            Some("Enter a date as YYYY-MM-DD")
        );
    }
}
