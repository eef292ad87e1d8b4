//! Create contract for projects

use crate::base::{Contract, ValidationResult};
use super::base::{ProjectBaseContract, ProjectData};

/// Contract for creating a new project
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateProjectContract {
    base: ProjectBaseContract,
}

impl CreateProjectContract {
    pub fn new() -> Self {
        Self {
            base: ProjectBaseContract::new(),
        }
    }
}

impl<T: ProjectData> Contract<T> for CreateProjectContract {
    fn validate(&self, entity: &T) -> ValidationResult {
        self.base.validate(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rv_models::CreateProjectDto;

    #[test]
    fn test_create_requires_amount() {
        let contract = CreateProjectContract::new();

        let draft = CreateProjectDto {
            name: "A".to_string(),
            ..Default::default()
        };
        assert!(contract.validate(&draft).is_err());

        let draft = CreateProjectDto::new("A", Decimal::from(100));
        assert!(contract.validate(&draft).is_ok());
    }
}
