use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{clock_time, null_as_empty, option_clock_time};

/// Primary key assigned by the API.
pub type Id = i64;

/// A closed set of values rendered as a `<select>`.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    /// Wire value, as the API spells it.
    fn value(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|choice| choice.value() == value)
    }

    /// `(value, label)` pairs for building option lists.
    fn options() -> Vec<(String, String)> {
        Self::all()
            .iter()
            .map(|choice| (choice.value().to_string(), choice.label().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    SupportWorker,
    Practitioner,
    Family,
    Admin,
}

impl Choice for UserRole {
    fn all() -> &'static [Self] {
        &[Self::SupportWorker, Self::Practitioner, Self::Family, Self::Admin]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::SupportWorker => "support_worker",
            Self::Practitioner => "practitioner",
            Self::Family => "family",
            Self::Admin => "admin",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SupportWorker => "Support Worker",
            Self::Practitioner => "Practitioner",
            Self::Family => "Family",
            Self::Admin => "Administrator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CareLevel {
    Low,
    #[default]
    Moderate,
    High,
    Intensive,
}

impl Choice for CareLevel {
    fn all() -> &'static [Self] {
        &[Self::Low, Self::Moderate, Self::High, Self::Intensive]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Intensive => "intensive",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Intensive => "Intensive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Choice for Severity {
    fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[default]
    DailyLiving,
    Social,
    Educational,
    Recreational,
    Therapeutic,
    Physical,
    Communication,
    Vocational,
}

impl Choice for ActivityCategory {
    fn all() -> &'static [Self] {
        &[
            Self::DailyLiving,
            Self::Social,
            Self::Educational,
            Self::Recreational,
            Self::Therapeutic,
            Self::Physical,
            Self::Communication,
            Self::Vocational,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::DailyLiving => "daily_living",
            Self::Social => "social",
            Self::Educational => "educational",
            Self::Recreational => "recreational",
            Self::Therapeutic => "therapeutic",
            Self::Physical => "physical",
            Self::Communication => "communication",
            Self::Vocational => "vocational",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::DailyLiving => "Daily Living",
            Self::Social => "Social",
            Self::Educational => "Educational",
            Self::Recreational => "Recreational",
            Self::Therapeutic => "Therapeutic",
            Self::Physical => "Physical",
            Self::Communication => "Communication",
            Self::Vocational => "Vocational",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Choice for Difficulty {
    fn all() -> &'static [Self] {
        &[Self::Easy, Self::Medium, Self::Hard]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Lifecycle of a scheduled activity instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Skipped,
}

impl Choice for ScheduleStatus {
    fn all() -> &'static [Self] {
        &[
            Self::Scheduled,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
            Self::Skipped,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Skipped => "Skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl Choice for ShiftStatus {
    fn all() -> &'static [Self] {
        &[
            Self::Scheduled,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
            Self::NoShow,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No Show",
        }
    }
}

/// Named shift blocks. Every type except `Custom` implies fixed hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    #[default]
    Morning,
    Afternoon,
    Night,
    Custom,
}

impl ShiftType {
    /// Preset `(start, end)` hours; `None` for custom shifts.
    pub fn default_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        let hm = |h: u32| NaiveTime::from_hms_opt(h, 0, 0);
        match self {
            Self::Morning => hm(6).zip(hm(14)),
            Self::Afternoon => hm(14).zip(hm(22)),
            Self::Night => hm(22).zip(hm(6)),
            Self::Custom => None,
        }
    }
}

impl Choice for ShiftType {
    fn all() -> &'static [Self] {
        &[Self::Morning, Self::Afternoon, Self::Night, Self::Custom]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
            Self::Custom => "custom",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning (06:00 - 14:00)",
            Self::Afternoon => "Afternoon (14:00 - 22:00)",
            Self::Night => "Night (22:00 - 06:00)",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl Choice for GoalPriority {
    fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl Choice for GoalStatus {
    fn all() -> &'static [Self] {
        &[
            Self::NotStarted,
            Self::InProgress,
            Self::Completed,
            Self::OnHold,
            Self::Cancelled,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Staff or family account. Carers are users with a care-giving role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    pub fn is_carer(&self) -> bool {
        matches!(self.role, UserRole::SupportWorker | UserRole::Practitioner)
    }
}

/// Care recipient profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Id,
    /// Organisation reference, e.g. `TAV-0012`.
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    pub diagnosis: String,
    #[serde(default)]
    pub care_level: CareLevel,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub behavioral_triggers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub calming_strategies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub communication_needs: Option<String>,
    #[serde(default)]
    pub medical_notes: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub emergency_contact_relationship: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub id: Id,
    /// Absolute or API-relative URL of the uploaded file.
    pub file: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// One observed behavior incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub id: Id,
    pub client: Id,
    #[serde(default)]
    pub client_name: Option<String>,
    pub user: Id,
    #[serde(default)]
    pub user_name: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    #[serde(default)]
    pub location: Option<String>,
    pub behavior_type: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub triggers_identified: Option<String>,
    #[serde(default)]
    pub intervention_used: Option<String>,
    #[serde(default)]
    pub intervention_effective: Option<bool>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub harm_to_self: bool,
    #[serde(default)]
    pub harm_to_others: bool,
    #[serde(default)]
    pub property_damage: bool,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default)]
    pub follow_up_notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media: Vec<MediaAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Behavior {
    pub fn involved_harm(&self) -> bool {
        self.harm_to_self || self.harm_to_others
    }
}

/// Weighted link from an activity to a goal it contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalLink {
    pub goal: Id,
    #[serde(default)]
    pub goal_title: Option<String>,
    pub contribution_weight: u8,
}

/// Reusable task definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Id,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub category: ActivityCategory,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub client: Option<Id>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub goals: Vec<GoalLink>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One activity assigned to one user at one date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Id,
    pub activity: Id,
    #[serde(default)]
    pub activity_name: Option<String>,
    pub user: Id,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub client: Option<Id>,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(default, with = "option_clock_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default)]
    pub completion_rating: Option<u8>,
    #[serde(default)]
    pub completion_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Still open and dated before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.date < today
            && matches!(self.status, ScheduleStatus::Scheduled | ScheduleStatus::InProgress)
    }
}

/// A carer's work block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: Id,
    pub carer: Id,
    #[serde(default)]
    pub carer_name: Option<String>,
    #[serde(default)]
    pub client: Option<Id>,
    pub date: NaiveDate,
    #[serde(default)]
    pub shift_type: ShiftType,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub status: ShiftStatus,
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    pub fn is_clocked_in(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_none()
    }

    /// Planned length in minutes; shifts ending at or before their start run past midnight.
    pub fn scheduled_minutes(&self) -> i64 {
        scheduled_span_minutes(self.start_time, self.end_time)
    }

    /// Minutes between clock-in and clock-out, once both exist.
    pub fn worked_minutes(&self) -> Option<i64> {
        match (self.clock_in, self.clock_out) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}

/// Minutes from `start` to `end`, wrapping past midnight.
pub fn scheduled_span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        minutes + 24 * 60
    } else {
        minutes
    }
}

/// Render minutes as `7h 30m`.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Target outcome for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub client: Id,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub primary_activities: Vec<Id>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub related_activities: Vec<Id>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assigned_carers: Vec<Id>,
    /// Calculated by the API; never edited here.
    #[serde(default)]
    pub progress_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders for entity records used across the crate's tests.

    use super::*;
    use chrono::TimeZone;

    pub fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    pub fn user(id: Id, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@tavonga.org"),
            first_name: "Rudo".to_string(),
            last_name: format!("Moyo{id}"),
            phone: None,
            role,
            is_approved: true,
            is_active: true,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn client(id: Id) -> Client {
        Client {
            id,
            client_id: format!("TAV-{id:04}"),
            first_name: "Tendai".to_string(),
            last_name: "Chikwanha".to_string(),
            date_of_birth: Some(date(2001, 5, 17)),
            gender: None,
            diagnosis: "Autism spectrum disorder".to_string(),
            care_level: CareLevel::High,
            behavioral_triggers: vec!["Loud noises".to_string()],
            calming_strategies: vec!["Weighted blanket".to_string()],
            interests: vec![],
            communication_needs: None,
            medical_notes: None,
            address: None,
            emergency_contact_name: Some("Chipo Chikwanha".to_string()),
            emergency_contact_phone: Some("+263 77 123 4567".to_string()),
            emergency_contact_relationship: Some("Mother".to_string()),
            is_active: true,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn behavior(id: Id, on: NaiveDate, severity: Severity) -> Behavior {
        Behavior {
            id,
            client: 1,
            client_name: None,
            user: 2,
            user_name: None,
            date: on,
            time: time(10, 30),
            location: Some("Lounge".to_string()),
            behavior_type: "Verbal aggression".to_string(),
            severity,
            description: "Shouting during group activity".to_string(),
            triggers_identified: None,
            intervention_used: None,
            intervention_effective: None,
            duration_minutes: Some(10),
            harm_to_self: false,
            harm_to_others: false,
            property_damage: false,
            follow_up_required: false,
            follow_up_notes: None,
            media: vec![],
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn activity(id: Id) -> Activity {
        Activity {
            id,
            name: "Morning walk".to_string(),
            description: "Walk around the garden".to_string(),
            category: ActivityCategory::Physical,
            difficulty: Difficulty::Easy,
            instructions: None,
            estimated_duration: Some(30),
            client: None,
            goals: vec![],
            is_active: false,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn schedule(id: Id, on: NaiveDate, status: ScheduleStatus) -> Schedule {
        Schedule {
            id,
            activity: 1,
            activity_name: Some("Morning walk".to_string()),
            user: 2,
            user_name: None,
            client: Some(1),
            date: on,
            start_time: time(9, 0),
            end_time: Some(time(9, 30)),
            status,
            completion_rating: None,
            completion_notes: None,
            notes: None,
            completed_at: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn shift(id: Id, on: NaiveDate, status: ShiftStatus) -> Shift {
        Shift {
            id,
            carer: 2,
            carer_name: None,
            client: Some(1),
            date: on,
            shift_type: ShiftType::Morning,
            start_time: time(6, 0),
            end_time: time(14, 0),
            status,
            clock_in: None,
            clock_out: None,
            notes: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    pub fn goal(id: Id, status: GoalStatus, progress: f64) -> Goal {
        Goal {
            id,
            title: "Independent dressing".to_string(),
            description: "Dress without prompting".to_string(),
            client: 1,
            client_name: None,
            category: None,
            priority: GoalPriority::Medium,
            status,
            target_date: None,
            primary_activities: vec![],
            related_activities: vec![],
            assigned_carers: vec![],
            progress_percentage: progress,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_choice_round_trips_wire_values() {
        assert_eq!(ShiftStatus::from_value("no_show"), Some(ShiftStatus::NoShow));
        assert_eq!(UserRole::from_value("support_worker"), Some(UserRole::SupportWorker));
        assert_eq!(Severity::from_value("extreme"), None);
        assert_eq!(GoalStatus::options().len(), 5);
    }

    #[test]
    fn test_shift_type_presets() {
        assert_eq!(ShiftType::Morning.default_times(), Some((time(6, 0), time(14, 0))));
        assert_eq!(ShiftType::Night.default_times(), Some((time(22, 0), time(6, 0))));
        assert_eq!(ShiftType::Custom.default_times(), None);
    }

    #[test]
    fn test_night_shift_duration_wraps_midnight() {
        assert_eq!(scheduled_span_minutes(time(22, 0), time(6, 0)), 8 * 60);
        assert_eq!(scheduled_span_minutes(time(6, 0), time(14, 30)), 8 * 60 + 30);
        assert_eq!(format_duration(450), "7h 30m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
    }

    #[test]
    fn test_schedule_overdue_only_when_open() {
        let today = date(2025, 3, 10);
        assert!(schedule(1, date(2025, 3, 9), ScheduleStatus::Scheduled).is_overdue(today));
        assert!(!schedule(2, date(2025, 3, 9), ScheduleStatus::Completed).is_overdue(today));
        assert!(!schedule(3, today, ScheduleStatus::Scheduled).is_overdue(today));
    }

    #[test]
    fn test_deserialize_shift_with_seconds_and_nulls() {
        let json = r#"{
            "id": 7, "carer": 3, "date": "2025-03-10", "shift_type": "night",
            "start_time": "22:00:00", "end_time": "06:00:00", "status": "in_progress",
            "clock_in": "2025-03-10T22:02:00Z", "clock_out": null,
            "created_at": "2025-03-01T09:00:00Z", "updated_at": "2025-03-01T09:00:00.123456Z"
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.shift_type, ShiftType::Night);
        assert_eq!(shift.start_time, time(22, 0));
        assert!(shift.is_clocked_in());
        assert_eq!(shift.scheduled_minutes(), 480);
    }

    #[test]
    fn test_deserialize_client_with_null_lists() {
        let json = r#"{
            "id": 1, "client_id": "TAV-0001", "first_name": "Tendai", "last_name": "C",
            "diagnosis": "ASD", "care_level": "intensive", "behavioral_triggers": null,
            "created_at": "2025-03-01T09:00:00Z", "updated_at": "2025-03-01T09:00:00Z"
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert!(client.behavioral_triggers.is_empty());
        assert_eq!(client.care_level, CareLevel::Intensive);
        assert!(client.is_active);
    }

    #[test]
    fn test_user_full_name_falls_back_to_username() {
        let mut u = user(4, UserRole::Family);
        u.first_name.clear();
        u.last_name.clear();
        assert_eq!(u.full_name(), "user4");
        assert!(!u.is_carer());
    }
}
