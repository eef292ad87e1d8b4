//! Payment model
//!
//! One dated settlement against a project's contract value. Payments are
//! created and deleted, never edited.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::optional_date;

/// Payment ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Id,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Payment {
    pub fn new(id: Id, date: NaiveDate, amount: Decimal) -> Self {
        Self { id, date, amount }
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Id {
        self.id
    }
}

/// Payment draft as submitted by a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

impl NewPayment {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date: Some(date),
            amount: Some(amount),
        }
    }

    /// Complete payment, or `None` while a required field is missing
    pub fn into_payment(self, id: Id) -> Option<Payment> {
        Some(Payment::new(id, self.date?, self.amount?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_reads_server_row() {
        let json = r#"{"id": 12, "project_id": 3, "date": "2024-05-01", "amount": 2500.5}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();

        assert_eq!(payment.id, 12);
        assert_eq!(payment.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(payment.amount, Decimal::new(25005, 1));
    }

    #[test]
    fn test_incomplete_draft_has_no_payment() {
        let draft: NewPayment = serde_json::from_str(r#"{"date": "", "amount": 10}"#).unwrap();
        assert!(draft.date.is_none());
        assert!(draft.into_payment(1).is_none());
    }
}
