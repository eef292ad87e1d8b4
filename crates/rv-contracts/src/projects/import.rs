//! Contract for bulk replacement of the store
//!
//! Applied to imports and backup restores before anything is committed.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rv_core::error::ValidationErrors;
use rv_models::{money, Id, Project};

use super::base::ProjectBaseContract;
use crate::base::{Contract, ValidationResult};

/// Contract for a whole replacement payload
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportContract {
    base: ProjectBaseContract,
}

impl ImportContract {
    pub fn new() -> Self {
        Self {
            base: ProjectBaseContract::new(),
        }
    }

    fn validate_record(&self, project: &Project) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        self.base.validate_name(&project.name, &mut errors);
        self.base.validate_amount(Some(project.amount), &mut errors);

        if project.id == Id::MAX {
            errors.add("id", "is out of range");
        }
        for (index, payment) in project.payments.iter().enumerate() {
            if payment.amount < Decimal::ZERO {
                errors.add(
                    format!("payments[{}].amount", index),
                    "must be greater than or equal to 0",
                );
            }
            if payment.id == Id::MAX {
                errors.add(format!("payments[{}].id", index), "is out of range");
            }
        }
        if money::checked_sum(project.payments.iter().map(|p| p.amount)).is_none() {
            errors.add("payments", "collected total is out of range");
        }

        errors
    }
}

impl Contract<[Project]> for ImportContract {
    fn validate(&self, projects: &[Project]) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        let mut project_ids = HashSet::new();
        let mut payment_ids = HashSet::new();

        for (index, project) in projects.iter().enumerate() {
            let prefix = format!("projects[{}]", index);

            errors.merge(self.validate_record(project).nested(&prefix));

            if !project_ids.insert(project.id) {
                errors.add(format!("{}.id", prefix), format!("{} is used by another project", project.id));
            }
            for payment in &project.payments {
                if !payment_ids.insert(payment.id) {
                    errors.add(
                        format!("{}.payments", prefix),
                        format!("payment id {} is used more than once", payment.id),
                    );
                }
            }
        }

        errors.into_result()
    }
}
