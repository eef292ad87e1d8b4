//! Project contracts

mod base;
mod create;
mod import;

pub use base::{ProjectBaseContract, ProjectData};
pub use create::CreateProjectContract;
pub use import::ImportContract;

/// Longest accepted project name, in characters
pub const MAX_NAME_LENGTH: usize = 255;
