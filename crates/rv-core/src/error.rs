//! Core error types for Receivables RS
//!
//! Every fallible store, sync and import operation reports one of these.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Core error type for all Receivables operations
#[derive(Error, Debug)]
pub enum RvError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Transport error: {service} - {message}")]
    Transport { service: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RvError {
    pub fn not_found(entity: &'static str, value: impl ToString) -> Self {
        RvError::NotFound {
            entity,
            field: "id",
            value: value.to_string(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        RvError::Format(message.into())
    }

    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        RvError::Transport {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from the network rather than from the data
    pub fn is_transport(&self) -> bool {
        matches!(self, RvError::Transport { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RvError::NotFound { .. })
    }
}

/// Validation errors collection
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    /// Prefix every field name, used when validating nested records
    pub fn nested(self, prefix: &str) -> Self {
        let mut nested = ValidationErrors::new();
        for (field, messages) in self.errors {
            for message in messages {
                nested.add(format!("{}.{}", prefix, field), message);
            }
        }
        for message in self.base_errors {
            nested.add(prefix, message);
        }
        nested
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// HTTP status code mapping for errors
impl RvError {
    pub fn status_code(&self) -> u16 {
        match self {
            RvError::Validation(_) => 422,
            RvError::NotFound { .. } => 404,
            RvError::Format(_) => 400,
            RvError::Transport { .. } => 502,
            RvError::Config(_) | RvError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RvError::Validation(_) => "validation_failed",
            RvError::NotFound { .. } => "not_found",
            RvError::Format(_) => "format_error",
            RvError::Transport { .. } => "transport_error",
            RvError::Config(_) => "configuration_error",
            RvError::Internal(_) => "internal_error",
        }
    }
}
