//! # rv-services
//!
//! The project store and the operations that mutate it.
//!
//! Every change to a project or its ledger goes through [`ProjectStore`].
//! Each operation validates first and either commits completely or leaves
//! the store untouched.

pub mod store;
pub mod transfer;

pub use store::{shared, ProjectStore, StoreHandle};
pub use transfer::{export_json, import_json};
