//! # rv-contracts
//!
//! Contract validation for Receivables RS.
//!
//! Contracts check drafts and imported records before the store accepts
//! them, collecting every problem instead of stopping at the first.

pub mod base;
pub mod payments;
pub mod projects;

pub use base::*;
pub use payments::CreatePaymentContract;
pub use projects::{CreateProjectContract, ImportContract, ProjectBaseContract};
