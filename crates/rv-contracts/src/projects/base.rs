//! Base contract for projects

use rust_decimal::Decimal;
use rv_core::error::ValidationErrors;
use rv_models::{CreateProjectDto, Project};

use super::MAX_NAME_LENGTH;
use crate::base::{Contract, ValidationResult};

/// Project data for validation
pub trait ProjectData: Send + Sync {
    fn name(&self) -> &str;
    fn amount(&self) -> Option<Decimal>;
}

impl ProjectData for CreateProjectDto {
    fn name(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> Option<Decimal> {
        self.amount
    }
}

impl ProjectData for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> Option<Decimal> {
        Some(self.amount)
    }
}

/// Base contract for projects with common validations
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectBaseContract;

impl ProjectBaseContract {
    pub fn new() -> Self {
        Self
    }

    /// Validate name is present and within length
    pub fn validate_name(&self, name: &str, errors: &mut ValidationErrors) {
        if name.trim().is_empty() {
            errors.add("name", "can't be blank");
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.add("name", "is too long (maximum is 255 characters)");
        }
    }

    /// Validate the contract value is present and not negative
    pub fn validate_amount(&self, amount: Option<Decimal>, errors: &mut ValidationErrors) {
        match amount {
            None => errors.add("amount", "can't be blank"),
            Some(amount) if amount < Decimal::ZERO => {
                errors.add("amount", "must be greater than or equal to 0")
            }
            Some(_) => {}
        }
    }
}

impl<T: ProjectData> Contract<T> for ProjectBaseContract {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_name(entity.name(), &mut errors);
        self.validate_amount(entity.amount(), &mut errors);

        errors.into_result()
    }
}
