//! Payment row representer

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_core::traits::Id;
use rv_models::Payment;
use serde::Serialize;

/// A created payment as the original server reported it
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub id: Id,
    pub project_id: Id,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl PaymentRow {
    pub fn new(project_id: Id, payment: &Payment) -> Self {
        Self {
            id: payment.id,
            project_id,
            date: payment.date,
            amount: payment.amount,
        }
    }
}
