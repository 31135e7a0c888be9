pub mod activity_modal;
pub mod client_modal;
pub mod delete_modal;
pub mod form_modal;
pub mod goal_modal;
pub mod modal_shell;
pub mod schedule_modal;
pub mod shift_modal;
pub mod user_modal;

pub use activity_modal::ActivityModal;
pub use client_modal::ClientModal;
pub use delete_modal::DeleteModal;
pub use goal_modal::GoalModal;
pub use modal_shell::{LoadingPanel, ModalShell};
pub use schedule_modal::ScheduleModal;
pub use shift_modal::ShiftModal;
pub use user_modal::UserModal;
