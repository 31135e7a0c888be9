//! State machines behind the form and delete modals, and the status
//! transition tables for schedules and shifts.

use std::fmt;

use crate::models::*;

/// Whether a form modal creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<T> {
    Create,
    Edit(T),
}

impl<T> FormMode<T> {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(entity) => Some(entity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormModalState {
    #[default]
    Closed,
    /// Waiting for the option lists (clients, carers, activities...).
    Loading,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormModalEvent {
    Open { needs_reference_data: bool },
    ReferenceDataLoaded,
    Submit { valid: bool },
    SubmitSucceeded,
    SubmitFailed,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: String,
    pub event: String,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {} is not allowed in state {}", self.event, self.from)
    }
}

impl std::error::Error for TransitionError {}

impl FormModalState {
    pub fn next(self, event: FormModalEvent) -> Result<Self, TransitionError> {
        use FormModalEvent as E;
        use FormModalState as S;

        let next = match (self, event) {
            (S::Closed, E::Open { needs_reference_data: true }) => S::Loading,
            (S::Closed, E::Open { needs_reference_data: false }) => S::Editing,
            (S::Loading, E::ReferenceDataLoaded) => S::Editing,
            (S::Editing, E::Submit { valid: true }) => S::Submitting,
            (S::Editing, E::Submit { valid: false }) => S::Editing,
            (S::Submitting, E::SubmitSucceeded) => S::Closed,
            (S::Submitting, E::SubmitFailed) => S::Editing,
            // An in-flight request is abandoned when the modal closes.
            (_, E::Close) => S::Closed,
            (from, event) => {
                return Err(TransitionError {
                    from: format!("{from:?}"),
                    event: format!("{event:?}"),
                })
            }
        };
        Ok(next)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormModalState::Closed)
    }

    /// Inputs and buttons are disabled outside `Editing`.
    pub fn is_busy(&self) -> bool {
        matches!(self, FormModalState::Loading | FormModalState::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low risk",
            RiskLevel::Medium => "Medium risk",
            RiskLevel::High => "High risk",
        }
    }

    pub fn needs_confirm_step(&self) -> bool {
        *self >= RiskLevel::Medium
    }

    pub fn needs_typed_confirmation(&self) -> bool {
        *self == RiskLevel::High
    }
}

/// Text the user types to unlock a high-risk delete.
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub fn confirmation_matches(input: &str) -> bool {
    input.eq_ignore_ascii_case(DELETE_CONFIRMATION)
}

/// A record offered for deletion, carrying what the review step shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Activity(Activity),
    Shift(Shift),
    Schedule(Schedule),
    Goal(Goal),
    Client(Client),
    User(User),
}

impl DeleteTarget {
    pub fn id(&self) -> Id {
        match self {
            DeleteTarget::Activity(a) => a.id,
            DeleteTarget::Shift(s) => s.id,
            DeleteTarget::Schedule(s) => s.id,
            DeleteTarget::Goal(g) => g.id,
            DeleteTarget::Client(c) => c.id,
            DeleteTarget::User(u) => u.id,
        }
    }

    /// Resource name, also the cache prefix to invalidate after deletion.
    pub fn resource(&self) -> &'static str {
        match self {
            DeleteTarget::Activity(_) => "activities",
            DeleteTarget::Shift(_) => "shifts",
            DeleteTarget::Schedule(_) => "schedules",
            DeleteTarget::Goal(_) => "goals",
            DeleteTarget::Client(_) => "clients",
            DeleteTarget::User(_) => "users",
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            DeleteTarget::Activity(_) => "Activity",
            DeleteTarget::Shift(_) => "Shift",
            DeleteTarget::Schedule(_) => "Scheduled Activity",
            DeleteTarget::Goal(_) => "Goal",
            DeleteTarget::Client(_) => "Client",
            DeleteTarget::User(_) => "User",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            DeleteTarget::Activity(a) => a.name.clone(),
            DeleteTarget::Shift(s) => format!(
                "{} shift on {}",
                s.shift_type.value(),
                s.date.format("%d %b %Y")
            ),
            DeleteTarget::Schedule(s) => format!(
                "{} on {}",
                s.activity_name.clone().unwrap_or_else(|| format!("Activity #{}", s.activity)),
                s.date.format("%d %b %Y")
            ),
            DeleteTarget::Goal(g) => g.title.clone(),
            DeleteTarget::Client(c) => format!("{} ({})", c.full_name(), c.client_id),
            DeleteTarget::User(u) => u.full_name(),
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            DeleteTarget::Shift(s) => {
                if s.clock_in.is_some() || s.status == ShiftStatus::InProgress {
                    RiskLevel::High
                } else if s.status == ShiftStatus::Completed {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }
            DeleteTarget::Schedule(s) => match s.status {
                ScheduleStatus::InProgress => RiskLevel::High,
                ScheduleStatus::Completed => RiskLevel::Medium,
                _ => RiskLevel::Low,
            },
            DeleteTarget::Activity(a) => {
                if !a.goals.is_empty() {
                    RiskLevel::High
                } else if a.is_active {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }
            DeleteTarget::Goal(g) => match g.status {
                GoalStatus::InProgress if g.progress_percentage > 0.0 => RiskLevel::High,
                GoalStatus::Completed => RiskLevel::Medium,
                _ => RiskLevel::Low,
            },
            DeleteTarget::Client(_) => RiskLevel::High,
            DeleteTarget::User(u) => {
                if u.role == UserRole::Admin {
                    RiskLevel::High
                } else if u.is_approved {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }
        }
    }

    /// Consequences listed on the review step.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        match self {
            DeleteTarget::Shift(s) => {
                if s.is_clocked_in() {
                    warnings.push("The carer is currently clocked in to this shift.".to_string());
                } else if s.clock_in.is_some() {
                    warnings.push("Clock-in and clock-out records will be lost.".to_string());
                }
                if s.status == ShiftStatus::Completed {
                    warnings.push("Completed shifts feed timesheet reports.".to_string());
                }
            }
            DeleteTarget::Schedule(s) => {
                if s.status == ScheduleStatus::InProgress {
                    warnings.push("This activity is in progress.".to_string());
                }
                if s.completion_rating.is_some() || s.completion_notes.is_some() {
                    warnings.push("Completion rating and notes will be lost.".to_string());
                }
            }
            DeleteTarget::Activity(a) => {
                if !a.goals.is_empty() {
                    warnings.push(format!(
                        "Linked to {} goal(s); goal progress may change.",
                        a.goals.len()
                    ));
                }
                warnings.push("Scheduled instances of this activity are not removed.".to_string());
            }
            DeleteTarget::Goal(g) => {
                if g.progress_percentage > 0.0 {
                    warnings.push(format!(
                        "Recorded progress of {:.0}% will be lost.",
                        g.progress_percentage
                    ));
                }
            }
            DeleteTarget::Client(_) => {
                warnings.push(
                    "Behavior logs, goals and activities for this client may be removed."
                        .to_string(),
                );
            }
            DeleteTarget::User(u) => {
                if u.role == UserRole::Admin {
                    warnings.push("This account has administrator access.".to_string());
                }
                if u.is_carer() {
                    warnings.push("Shifts and schedules assigned to this carer stay in place.".to_string());
                }
            }
        }
        warnings.push("This action cannot be undone.".to_string());
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStep {
    Review,
    Confirm,
    Deleting,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteEvent {
    /// Primary button on Review or Confirm.
    Proceed,
    Back,
    Failed,
    Succeeded,
}

/// Review → (Confirm) → Deleting → Done, with Confirm only for medium/high risk.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFlow {
    pub step: DeleteStep,
    pub risk: RiskLevel,
    pub confirmation_input: String,
}

impl DeleteFlow {
    pub fn new(risk: RiskLevel) -> Self {
        Self {
            step: DeleteStep::Review,
            risk,
            confirmation_input: String::new(),
        }
    }

    pub fn for_target(target: &DeleteTarget) -> Self {
        Self::new(target.risk_level())
    }

    /// Steps the user sees, for the progress indicator.
    pub fn steps(&self) -> &'static [DeleteStep] {
        if self.risk.needs_confirm_step() {
            &[DeleteStep::Review, DeleteStep::Confirm, DeleteStep::Deleting]
        } else {
            &[DeleteStep::Review, DeleteStep::Deleting]
        }
    }

    /// The interactive step that issues the delete request.
    fn final_step(&self) -> DeleteStep {
        if self.risk.needs_confirm_step() {
            DeleteStep::Confirm
        } else {
            DeleteStep::Review
        }
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.final_step()
    }

    /// Whether the primary button on the current step is enabled.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            DeleteStep::Review if !self.is_final_step() => true,
            DeleteStep::Review | DeleteStep::Confirm => self.can_delete(),
            DeleteStep::Deleting | DeleteStep::Done => false,
        }
    }

    /// The delete button is enabled on the final step once any typed confirmation matches.
    pub fn can_delete(&self) -> bool {
        self.is_final_step()
            && (!self.risk.needs_typed_confirmation()
                || confirmation_matches(&self.confirmation_input))
    }

    pub fn set_confirmation(&mut self, input: impl Into<String>) {
        self.confirmation_input = input.into();
    }

    pub fn apply(&mut self, event: DeleteEvent) -> Result<DeleteStep, TransitionError> {
        let next = match (self.step, event) {
            (DeleteStep::Review, DeleteEvent::Proceed) if !self.is_final_step() => {
                DeleteStep::Confirm
            }
            (DeleteStep::Review | DeleteStep::Confirm, DeleteEvent::Proceed) if self.can_delete() => {
                DeleteStep::Deleting
            }
            (DeleteStep::Confirm, DeleteEvent::Back) => {
                self.confirmation_input.clear();
                DeleteStep::Review
            }
            (DeleteStep::Deleting, DeleteEvent::Failed) => self.final_step(),
            (DeleteStep::Deleting, DeleteEvent::Succeeded) => DeleteStep::Done,
            (step, event) => {
                return Err(TransitionError {
                    from: format!("{step:?}"),
                    event: format!("{event:?}"),
                })
            }
        };
        self.step = next;
        Ok(next)
    }
}

impl ScheduleStatus {
    pub fn allowed_next(&self) -> &'static [ScheduleStatus] {
        use ScheduleStatus::*;
        match self {
            Scheduled => &[InProgress, Cancelled, Skipped],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled | Skipped => &[],
        }
    }

    pub fn can_transition_to(&self, next: ScheduleStatus) -> bool {
        *self == next || self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Current status followed by its successors, for status selects.
    pub fn choices_from(&self) -> Vec<ScheduleStatus> {
        std::iter::once(*self)
            .chain(self.allowed_next().iter().copied())
            .collect()
    }
}

impl ShiftStatus {
    pub fn allowed_next(&self) -> &'static [ShiftStatus] {
        use ShiftStatus::*;
        match self {
            Scheduled => &[InProgress, Cancelled, NoShow],
            InProgress => &[Completed],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, next: ShiftStatus) -> bool {
        *self == next || self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn choices_from(&self) -> Vec<ShiftStatus> {
        std::iter::once(*self)
            .chain(self.allowed_next().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::*;

    #[test]
    fn test_form_modal_happy_path() {
        let state = FormModalState::Closed
            .next(FormModalEvent::Open { needs_reference_data: true })
            .unwrap();
        assert_eq!(state, FormModalState::Loading);
        assert!(state.is_busy());
        let state = state.next(FormModalEvent::ReferenceDataLoaded).unwrap();
        let state = state.next(FormModalEvent::Submit { valid: true }).unwrap();
        assert_eq!(state, FormModalState::Submitting);
        assert_eq!(
            state.next(FormModalEvent::SubmitSucceeded).unwrap(),
            FormModalState::Closed
        );
    }

    #[test]
    fn test_form_modal_invalid_submit_and_api_error_return_to_editing() {
        let editing = FormModalState::Editing;
        assert_eq!(
            editing.next(FormModalEvent::Submit { valid: false }).unwrap(),
            FormModalState::Editing
        );
        assert_eq!(
            FormModalState::Submitting
                .next(FormModalEvent::SubmitFailed)
                .unwrap(),
            FormModalState::Editing
        );
    }

    #[test]
    fn test_form_modal_rejects_double_submit() {
        let err = FormModalState::Submitting
            .next(FormModalEvent::Submit { valid: true })
            .unwrap_err();
        assert_eq!(err.from, "Submitting");
        assert!(FormModalState::Loading
            .next(FormModalEvent::Submit { valid: true })
            .is_err());
        assert_eq!(
            FormModalState::Submitting.next(FormModalEvent::Close).unwrap(),
            FormModalState::Closed
        );
    }

    #[test]
    fn test_confirmation_is_case_insensitive() {
        assert!(confirmation_matches("DELETE"));
        assert!(confirmation_matches("delete"));
        assert!(confirmation_matches("Delete"));
        assert!(!confirmation_matches(" delete "));
        assert!(!confirmation_matches("delet"));
        assert!(!confirmation_matches(""));
    }

    #[test]
    fn test_high_risk_delete_needs_typed_text() {
        let mut flow = DeleteFlow::new(RiskLevel::High);
        assert_eq!(flow.steps().len(), 3);
        assert!(!flow.can_delete());
        flow.apply(DeleteEvent::Proceed).unwrap();
        assert_eq!(flow.step, DeleteStep::Confirm);
        assert!(!flow.can_delete());
        assert!(flow.apply(DeleteEvent::Proceed).is_err());

        flow.set_confirmation("Delete");
        assert!(flow.can_delete());
        assert_eq!(flow.apply(DeleteEvent::Proceed).unwrap(), DeleteStep::Deleting);
        assert_eq!(flow.apply(DeleteEvent::Failed).unwrap(), DeleteStep::Confirm);
        assert_eq!(flow.confirmation_input, "Delete");
    }

    #[test]
    fn test_low_risk_delete_is_two_steps() {
        let mut flow = DeleteFlow::new(RiskLevel::Low);
        assert_eq!(flow.steps(), &[DeleteStep::Review, DeleteStep::Deleting]);
        assert!(flow.can_delete());
        assert_eq!(flow.apply(DeleteEvent::Proceed).unwrap(), DeleteStep::Deleting);
        assert_eq!(flow.apply(DeleteEvent::Failed).unwrap(), DeleteStep::Review);
        flow.apply(DeleteEvent::Proceed).unwrap();
        assert_eq!(flow.apply(DeleteEvent::Succeeded).unwrap(), DeleteStep::Done);
    }

    #[test]
    fn test_medium_risk_confirm_without_typing_and_back() {
        let mut flow = DeleteFlow::new(RiskLevel::Medium);
        flow.apply(DeleteEvent::Proceed).unwrap();
        assert!(flow.can_delete());
        flow.set_confirmation("anything");
        flow.apply(DeleteEvent::Back).unwrap();
        assert_eq!(flow.step, DeleteStep::Review);
        assert!(flow.confirmation_input.is_empty());
    }

    #[test]
    fn test_shift_risk_levels() {
        let today = date(2025, 3, 10);
        let mut s = shift(1, today, ShiftStatus::Scheduled);
        assert_eq!(DeleteTarget::Shift(s.clone()).risk_level(), RiskLevel::Low);
        s.clock_in = Some(timestamp());
        assert_eq!(DeleteTarget::Shift(s.clone()).risk_level(), RiskLevel::High);
        let completed = shift(2, today, ShiftStatus::Completed);
        assert_eq!(DeleteTarget::Shift(completed).risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn test_other_risk_levels() {
        let mut a = activity(1);
        assert_eq!(DeleteTarget::Activity(a.clone()).risk_level(), RiskLevel::Low);
        a.goals.push(GoalLink { goal: 3, goal_title: None, contribution_weight: 5 });
        assert_eq!(DeleteTarget::Activity(a).risk_level(), RiskLevel::High);

        assert_eq!(
            DeleteTarget::Goal(goal(1, GoalStatus::InProgress, 40.0)).risk_level(),
            RiskLevel::High
        );
        assert_eq!(
            DeleteTarget::Goal(goal(1, GoalStatus::InProgress, 0.0)).risk_level(),
            RiskLevel::Low
        );
        assert_eq!(DeleteTarget::Client(client(1)).risk_level(), RiskLevel::High);
        assert_eq!(
            DeleteTarget::User(user(1, UserRole::Admin)).risk_level(),
            RiskLevel::High
        );
        let mut pending = user(2, UserRole::Family);
        pending.is_approved = false;
        assert_eq!(DeleteTarget::User(pending).risk_level(), RiskLevel::Low);
    }

    #[test]
    fn test_warnings_always_end_with_irreversible_notice() {
        let target = DeleteTarget::Client(client(1));
        let warnings = target.warnings();
        assert_eq!(warnings.last().map(String::as_str), Some("This action cannot be undone."));
        assert_eq!(target.resource(), "clients");
    }

    #[test]
    fn test_status_transition_tables() {
        assert!(ScheduleStatus::Scheduled.can_transition_to(ScheduleStatus::InProgress));
        assert!(!ScheduleStatus::Scheduled.can_transition_to(ScheduleStatus::Completed));
        assert!(ScheduleStatus::InProgress.can_transition_to(ScheduleStatus::Completed));
        assert!(ScheduleStatus::Skipped.is_terminal());
        assert_eq!(
            ScheduleStatus::InProgress.choices_from(),
            vec![
                ScheduleStatus::InProgress,
                ScheduleStatus::Completed,
                ScheduleStatus::Cancelled
            ]
        );

        assert!(ShiftStatus::Scheduled.can_transition_to(ShiftStatus::NoShow));
        assert!(!ShiftStatus::InProgress.can_transition_to(ShiftStatus::Cancelled));
        assert!(ShiftStatus::Completed.is_terminal());
    }
}
