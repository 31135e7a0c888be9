use crate::models::{Activity, ActivityCategory, Choice, Difficulty, Id};
use crate::payloads::{ActivityPayload, GoalLinkPayload};
use crate::validation::{optional_text, parse_id, FieldErrors};

use super::{bool_value, id_value, parse_bool, parse_choice, FormState};

pub const MAX_DURATION_MINUTES: u32 = 24 * 60;
pub const MIN_CONTRIBUTION_WEIGHT: u8 = 1;
pub const MAX_CONTRIBUTION_WEIGHT: u8 = 10;
const DEFAULT_CONTRIBUTION_WEIGHT: u8 = 5;

/// A goal selected in the activity form with its weight as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalLinkDraft {
    pub goal: Id,
    pub weight: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub instructions: String,
    pub estimated_duration: String,
    pub client: String,
    pub is_active: bool,
    pub goals: Vec<GoalLinkDraft>,
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: ActivityCategory::default().value().to_string(),
            difficulty: Difficulty::default().value().to_string(),
            instructions: String::new(),
            estimated_duration: String::new(),
            client: String::new(),
            is_active: true,
            goals: Vec::new(),
        }
    }
}

impl ActivityForm {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            description: activity.description.clone(),
            category: activity.category.value().to_string(),
            difficulty: activity.difficulty.value().to_string(),
            instructions: activity.instructions.clone().unwrap_or_default(),
            estimated_duration: activity
                .estimated_duration
                .map(|minutes| minutes.to_string())
                .unwrap_or_default(),
            client: id_value(activity.client),
            is_active: activity.is_active,
            goals: activity
                .goals
                .iter()
                .map(|link| GoalLinkDraft {
                    goal: link.goal,
                    weight: link.contribution_weight.to_string(),
                })
                .collect(),
        }
    }

    pub fn has_goal(&self, goal: Id) -> bool {
        self.goals.iter().any(|link| link.goal == goal)
    }

    pub fn toggle_goal(&mut self, goal: Id) {
        if self.has_goal(goal) {
            self.goals.retain(|link| link.goal != goal);
        } else {
            self.goals.push(GoalLinkDraft {
                goal,
                weight: DEFAULT_CONTRIBUTION_WEIGHT.to_string(),
            });
        }
    }

    pub fn set_goal_weight(&mut self, goal: Id, weight: String) {
        if let Some(link) = self.goals.iter_mut().find(|link| link.goal == goal) {
            link.weight = weight;
        }
    }

    pub fn goal_weight(&self, goal: Id) -> String {
        self.goals
            .iter()
            .find(|link| link.goal == goal)
            .map(|link| link.weight.clone())
            .unwrap_or_default()
    }

    fn parse_goal_links(&self, errors: &mut FieldErrors) -> Vec<GoalLinkPayload> {
        let mut links = Vec::with_capacity(self.goals.len());
        for draft in &self.goals {
            match draft.weight.trim().parse::<u8>() {
                Ok(weight) if (MIN_CONTRIBUTION_WEIGHT..=MAX_CONTRIBUTION_WEIGHT).contains(&weight) => {
                    links.push(GoalLinkPayload {
                        goal: draft.goal,
                        contribution_weight: weight,
                    })
                }
                _ => errors.insert(
                    "goals",
                    format!(
                        "Contribution weights must be between {MIN_CONTRIBUTION_WEIGHT} and {MAX_CONTRIBUTION_WEIGHT}"
                    ),
                ),
            }
        }
        links
    }
}

impl FormState for ActivityForm {
    type Payload = ActivityPayload;

    fn value(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "category" => self.category.clone(),
            "difficulty" => self.difficulty.clone(),
            "instructions" => self.instructions.clone(),
            "estimated_duration" => self.estimated_duration.clone(),
            "client" => self.client.clone(),
            "is_active" => bool_value(self.is_active),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "description" => self.description = value,
            "category" => self.category = value,
            "difficulty" => self.difficulty = value,
            "instructions" => self.instructions = value,
            "estimated_duration" => self.estimated_duration = value,
            "client" => self.client = value,
            "is_active" => self.is_active = parse_bool(&value),
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if errors.require("name", &self.name, "Name") && self.name.trim().chars().count() > 200 {
            errors.insert("name", "Name must be 200 characters or fewer");
        }
        errors.require("description", &self.description, "Description");
        parse_choice::<ActivityCategory>(&mut errors, "category", &self.category, "Category");
        parse_choice::<Difficulty>(&mut errors, "difficulty", &self.difficulty, "Difficulty");
        errors.optional_number("estimated_duration", &self.estimated_duration, 1, MAX_DURATION_MINUTES);
        if !self.client.trim().is_empty() && parse_id(&self.client).is_none() {
            errors.insert("client", "Select a valid client");
        }
        self.parse_goal_links(&mut errors);
        errors
    }

    fn to_payload(&self) -> Result<ActivityPayload, FieldErrors> {
        let mut errors = self.validate();
        let goals = self.parse_goal_links(&mut errors);
        let estimated_duration =
            errors.optional_number("estimated_duration", &self.estimated_duration, 1, MAX_DURATION_MINUTES);
        errors.into_result()?;

        Ok(ActivityPayload {
            name: optional_text(&self.name),
            description: optional_text(&self.description),
            category: ActivityCategory::from_value(self.category.trim()),
            difficulty: Difficulty::from_value(self.difficulty.trim()),
            instructions: optional_text(&self.instructions),
            estimated_duration,
            client: parse_id(&self.client),
            goals,
            is_active: Some(self.is_active),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::activity;
    use crate::models::GoalLink;

    fn filled() -> ActivityForm {
        let mut form = ActivityForm::default();
        form.set("name", "Cooking session".to_string());
        form.set("description", "Prepare a simple lunch".to_string());
        form
    }

    #[test]
    fn test_required_fields_block_submission() {
        let errors = ActivityForm::default().validate();
        assert!(errors.contains("name"));
        assert!(errors.contains("description"));
        assert!(ActivityForm::default().to_payload().is_err());
    }

    #[test]
    fn test_duration_bounds() {
        let mut form = filled();
        form.set("estimated_duration", "0".to_string());
        assert!(form.validate().contains("estimated_duration"));
        form.set("estimated_duration", "45".to_string());
        assert_eq!(form.to_payload().unwrap().estimated_duration, Some(45));
    }

    #[test]
    fn test_goal_links_toggle_and_weights() {
        let mut form = filled();
        form.toggle_goal(4);
        form.toggle_goal(9);
        form.set_goal_weight(9, "11".to_string());
        assert!(form.validate().contains("goals"));

        form.set_goal_weight(9, "8".to_string());
        form.toggle_goal(4);
        let payload = form.to_payload().unwrap();
        assert_eq!(
            payload.goals,
            vec![GoalLinkPayload { goal: 9, contribution_weight: 8 }]
        );
    }

    #[test]
    fn test_from_activity_keeps_links() {
        let mut existing = activity(2);
        existing.goals = vec![GoalLink { goal: 3, goal_title: None, contribution_weight: 7 }];
        let form = ActivityForm::from_activity(&existing);
        assert!(form.has_goal(3));
        assert_eq!(form.goal_weight(3), "7");
        assert_eq!(form.value("estimated_duration"), "30");
        assert!(form.validate().is_empty());
    }
}
