//! API handlers

pub mod ai;
pub mod backups;
pub mod payments;
pub mod projects;
pub mod stats;
pub mod transfer;
