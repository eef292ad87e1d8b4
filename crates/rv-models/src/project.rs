//! Project aggregate and its wire representation
//!
//! The aggregate owns the payment ledger. Every derived figure is computed
//! from the ledger on read.

pub mod model;
pub mod record;

pub use model::*;
pub use record::ProjectRecord;
