//! # rv-models
//!
//! Domain models for Receivables RS.
//!
//! A [`Project`] owns its payment ledger. Collected, remaining, overdue and
//! display status are always computed from that ledger, never stored.

pub use rv_core::traits::{Id, Identifiable};

pub mod money;
pub mod payment;
pub mod project;
pub mod serde_helpers;
pub mod status;

// Re-exports for convenience
pub use payment::{NewPayment, Payment};
pub use project::{CreateProjectDto, Project, ProjectRecord};
pub use status::{derive_status_on_add, derive_status_on_remove, is_overdue, DisplayStatus, ProjectStatus};
