//! Types and client-side rules shared by the CareConnect dashboard.
//!
//! Everything in this crate is target independent: entity records mirrored from
//! the REST API, request payloads, form state with validation, the modal and
//! delete-confirmation state machines, dashboard analytics and report helpers.

pub mod analytics;
pub mod forms;
pub mod models;
pub mod payloads;
pub mod reports;
pub mod serde_helpers;
pub mod validation;
pub mod workflow;

pub use analytics::*;
pub use forms::*;
pub use models::*;
pub use payloads::*;
pub use reports::*;
pub use validation::*;
pub use workflow::*;
