//! Project status and its derivation rules
//!
//! Adding and removing payments use different rules. On add, a project that
//! is neither settled nor past due keeps whatever status it had. On remove,
//! the status is derived from scratch, which can demote a Completed project.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    #[serde(alias = "进行中")]
    InProgress,
    #[serde(alias = "已完成")]
    Completed,
    #[serde(alias = "逾期风险")]
    OverdueRisk,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::OverdueRisk => "overdue_risk",
        }
    }
}

/// Status as shown to a reader, reconciled with the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Completed,
    InProgress,
    Overdue,
}

/// Past its settlement date and not fully collected.
///
/// A project without a settlement date is never overdue.
pub fn is_overdue(
    payment_date: Option<NaiveDate>,
    collected: Decimal,
    amount: Decimal,
    today: NaiveDate,
) -> bool {
    collected < amount && payment_date.is_some_and(|due| due < today)
}

/// Status after a payment was appended
pub fn derive_status_on_add(
    current: ProjectStatus,
    collected: Decimal,
    amount: Decimal,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ProjectStatus {
    if collected >= amount {
        ProjectStatus::Completed
    } else if payment_date.is_some_and(|due| due < today) {
        ProjectStatus::OverdueRisk
    } else {
        current
    }
}

/// Status after a payment was removed
pub fn derive_status_on_remove(
    collected: Decimal,
    amount: Decimal,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ProjectStatus {
    derive_status_on_add(ProjectStatus::InProgress, collected, amount, payment_date, today)
}
