//! Project model
//!
//! A billable engagement with one counterparty, tracked until fully paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

use super::record::ProjectRecord;
use crate::money;
use crate::payment::Payment;
use crate::serde_helpers::{null_as_default, optional_date};
use crate::status::{self, DisplayStatus, ProjectStatus};

/// Project aggregate
///
/// Serialized through [`ProjectRecord`], which adds the derived `collected`
/// and `remaining` figures for readers and ignores them on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ProjectRecord", into = "ProjectRecord")]
pub struct Project {
    pub id: Id,

    /// Display name
    pub name: String,

    /// Counterparty; empty when unknown
    pub entity: String,

    /// Invoicing details (tax number, bank)
    pub invoice_info: String,

    pub sign_date: Option<NaiveDate>,

    /// Expected full-settlement date
    pub payment_date: Option<NaiveDate>,

    pub manager: String,
    pub contact: String,

    /// Contract value
    pub amount: Decimal,

    /// Stored status, see [`Project::display_status`] for what readers see
    pub status: ProjectStatus,

    /// Ledger in insertion order
    pub payments: Vec<Payment>,
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Project {
    /// Create a project with an empty ledger
    pub fn new(id: Id, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            ..Default::default()
        }
    }

    /// Sum of all ledger entries, clamped to the `Decimal` range
    pub fn collected(&self) -> Decimal {
        money::saturating_sum(self.payments.iter().map(|p| p.amount))
    }

    /// Collected total after adding `amount`, `None` when out of range
    pub fn collected_with(&self, amount: Decimal) -> Option<Decimal> {
        money::checked_sum(self.payments.iter().map(|p| p.amount).chain(Some(amount)))
    }

    /// Outstanding balance; negative when overpaid
    pub fn remaining(&self) -> Decimal {
        self.amount.saturating_sub(self.collected())
    }

    pub fn is_settled(&self) -> bool {
        self.collected() >= self.amount
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        status::is_overdue(self.payment_date, self.collected(), self.amount, today)
    }

    /// Collected share of the contract value, capped at 100
    pub fn progress_percent(&self) -> Decimal {
        if self.amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        money::percentage(self.collected(), self.amount).min(Decimal::ONE_HUNDRED)
    }

    /// Reconcile the stored status with the ledger.
    ///
    /// Settled projects always display as completed.
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        if self.is_settled() {
            DisplayStatus::Completed
        } else if self.is_overdue(today) {
            DisplayStatus::Overdue
        } else {
            DisplayStatus::InProgress
        }
    }

    /// Append a payment and re-derive the status with the add rule.
    ///
    /// Returns `false` without touching the project when the collected
    /// total would leave the `Decimal` range.
    pub fn add_payment(&mut self, payment: Payment, today: NaiveDate) -> bool {
        let Some(collected) = self.collected_with(payment.amount) else {
            return false;
        };
        self.payments.push(payment);
        self.status = status::derive_status_on_add(
            self.status,
            collected,
            self.amount,
            self.payment_date,
            today,
        );
        true
    }

    /// Remove a payment and re-derive the status with the remove rule.
    ///
    /// Returns `false` without touching the project when the id is unknown.
    pub fn remove_payment(&mut self, payment_id: Id, today: NaiveDate) -> bool {
        let before = self.payments.len();
        self.payments.retain(|p| p.id != payment_id);
        if self.payments.len() == before {
            return false;
        }
        self.status = status::derive_status_on_remove(
            self.collected(),
            self.amount,
            self.payment_date,
            today,
        );
        true
    }

    pub fn payment(&self, payment_id: Id) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == payment_id)
    }

    /// Entity name used as the rollup key
    pub fn entity_or(&self, fallback: &str) -> String {
        let entity = self.entity.trim();
        if entity.is_empty() {
            fallback.to_string()
        } else {
            entity.to_string()
        }
    }
}

/// DTO for creating a new project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoice_info: String,
    #[serde(default, deserialize_with = "optional_date")]
    pub sign_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manager: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl CreateProjectDto {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount),
            ..Default::default()
        }
    }

    /// Build the project this draft describes, with an empty ledger
    pub fn into_project(self, id: Id) -> Project {
        Project {
            id,
            name: self.name.trim().to_string(),
            entity: self.entity,
            invoice_info: self.invoice_info,
            sign_date: self.sign_date,
            payment_date: self.payment_date,
            manager: self.manager,
            contact: self.contact,
            amount: self.amount.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            payments: Vec::new(),
        }
    }

    /// Fill blank fields of `self` from `other`
    pub fn merge_missing(&mut self, other: CreateProjectDto) {
        fn fill(target: &mut String, source: String) {
            if target.trim().is_empty() {
                *target = source;
            }
        }
        fill(&mut self.name, other.name);
        fill(&mut self.entity, other.entity);
        fill(&mut self.invoice_info, other.invoice_info);
        fill(&mut self.manager, other.manager);
        fill(&mut self.contact, other.contact);
        self.sign_date = self.sign_date.or(other.sign_date);
        self.payment_date = self.payment_date.or(other.payment_date);
        self.amount = self.amount.or(other.amount);
        self.status = self.status.or(other.status);
    }
}
