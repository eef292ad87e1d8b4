//! Result type aliases

use crate::error::RvError;

/// Standard Result type for Receivables operations
pub type RvResult<T> = Result<T, RvError>;
