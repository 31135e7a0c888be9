pub mod charts;
pub mod forms;
pub mod layout;
pub mod modals;
pub mod pager;
pub mod query_status;
pub mod stat_card;
pub mod status_badge;
pub mod toast;
