//! Create contract for payments

use rust_decimal::Decimal;
use rv_core::error::ValidationErrors;
use rv_models::NewPayment;

use crate::base::{Contract, ValidationResult};

/// Contract for adding a payment to a project
#[derive(Debug, Default, Clone, Copy)]
pub struct CreatePaymentContract;

impl CreatePaymentContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<NewPayment> for CreatePaymentContract {
    fn validate(&self, draft: &NewPayment) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        match draft.amount {
            None => errors.add("amount", "can't be blank"),
            Some(amount) if amount < Decimal::ZERO => {
                errors.add("amount", "must be greater than or equal to 0")
            }
            Some(_) => {}
        }
        if draft.date.is_none() {
            errors.add("date", "can't be blank");
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_complete_draft_is_valid() {
        let draft = NewPayment::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Decimal::from(40));
        assert!(CreatePaymentContract::new().validate(&draft).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let errors = CreatePaymentContract::new()
            .validate(&NewPayment::default())
            .unwrap_err();
        assert!(errors.has_error("amount"));
        assert!(errors.has_error("date"));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let draft = NewPayment::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Decimal::ZERO);
        assert!(CreatePaymentContract::new().validate(&draft).is_ok());
    }
}
