use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::*;
use crate::serde_helpers::{clock_time, option_clock_time};

/// Paginated list envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer with either the paginated envelope or a bare array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> Paginated<T> {
        match self {
            ListResponse::Paginated(page) => page,
            ListResponse::Plain(results) => Paginated {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            },
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"detail": ..}`, `{"message": ..}`, `{"error": ..}`,
/// `{"non_field_errors": [..]}` and field maps such as `{"email": ["taken"]}`.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["detail", "message", "error", "non_field_errors"] {
        if let Some(message) = object.get(key).and_then(first_text) {
            return Some(message);
        }
    }

    object
        .iter()
        .find_map(|(field, value)| first_text(value).map(|message| format!("{field}: {message}")))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<CareLevel>,
    pub behavioral_triggers: Vec<String>,
    pub calming_strategies: Vec<String>,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_needs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalLinkPayload {
    pub goal: Id,
    pub contribution_weight: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ActivityCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Id>,
    pub goals: Vec<GoalLinkPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub activity: Id,
    pub user: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Id>,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(
        with = "option_clock_time",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub end_time: Option<NaiveTime>,
    pub status: ScheduleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPayload {
    pub carer: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Id>,
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub title: String,
    pub description: String,
    pub client: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub primary_activities: Vec<Id>,
    pub related_activities: Vec<Id>,
    pub assigned_carers: Vec<Id>,
}

/// Partial update for an incident record; the dashboard only edits follow-up fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_notes: Option<String>,
}

/// Body for the quick status actions on list rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPatch<S> {
    pub status: S,
}

/// Query string parameters for list endpoints, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListFilters {
    params: Vec<(String, String)>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value`; blank values are skipped.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.params.retain(|(k, _)| k != key);
            self.params.push((key.to_string(), value));
        }
        self
    }

    pub fn with_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `a=1&b=2`, sorted by key so equal filters give equal cache keys.
    pub fn canonical(&self) -> String {
        let mut params = self.params.clone();
        params.sort();
        params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::*;

    #[test]
    fn test_list_response_accepts_both_shapes() {
        let paginated = r#"{"count": 42, "next": "http://x/?page=2", "previous": null, "results": [
            {"id": 1, "username": "a", "email": "a@b.co", "created_at": "2025-03-01T09:00:00Z", "updated_at": "2025-03-01T09:00:00Z"}
        ]}"#;
        let page = serde_json::from_str::<ListResponse<User>>(paginated)
            .unwrap()
            .into_page();
        assert_eq!(page.count, 42);
        assert_eq!(page.results.len(), 1);

        let plain = r#"[]"#;
        let page = serde_json::from_str::<ListResponse<User>>(plain)
            .unwrap()
            .into_page();
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_error_message_from_body_variants() {
        assert_eq!(
            error_message_from_body(r#"{"detail": "Not found."}"#).as_deref(),
            Some("Not found.")
        );
        assert_eq!(
            error_message_from_body(r#"{"non_field_errors": ["Shift overlaps"]}"#).as_deref(),
            Some("Shift overlaps")
        );
        assert_eq!(
            error_message_from_body(r#"{"email": ["user with this email already exists."]}"#)
                .as_deref(),
            Some("email: user with this email already exists.")
        );
        assert_eq!(error_message_from_body("<html>502</html>"), None);
        assert_eq!(error_message_from_body(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = UserPayload {
            email: Some("a@b.co".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.co"}));
    }

    #[test]
    fn test_schedule_payload_writes_short_times() {
        let payload = SchedulePayload {
            activity: 1,
            user: 2,
            client: None,
            date: date(2025, 3, 10),
            start_time: time(9, 0),
            end_time: None,
            status: ScheduleStatus::Scheduled,
            completion_rating: None,
            completion_notes: None,
            notes: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["date"], "2025-03-10");
        assert!(json.get("end_time").is_none());
        assert!(json.get("client").is_none());
    }

    #[test]
    fn test_list_filters_canonical_and_blank_values() {
        let filters = ListFilters::new()
            .with("status", "scheduled")
            .with("date", "2025-03-10")
            .with("search", "  ")
            .with_opt::<Id>("client", None);
        assert_eq!(filters.params().len(), 2);
        assert_eq!(filters.canonical(), "date=2025-03-10&status=scheduled");

        let replaced = filters.with("status", "completed");
        assert_eq!(replaced.canonical(), "date=2025-03-10&status=completed");
    }
}
