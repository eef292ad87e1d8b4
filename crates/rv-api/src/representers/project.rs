//! Project summary representer

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_core::traits::Id;
use rv_models::{DisplayStatus, Project};
use serde::Serialize;

/// Derived figures for one project, as shown on the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Id,
    pub name: String,
    pub entity: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub collected: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
    pub display_status: DisplayStatus,
    pub overdue: bool,
    pub payment_count: usize,
}

impl ProjectSummary {
    pub fn represent(project: &Project, today: NaiveDate) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            entity: project.entity.clone(),
            amount: project.amount,
            collected: project.collected(),
            remaining: project.remaining(),
            progress: project.progress_percent().round_dp(1),
            display_status: project.display_status(today),
            overdue: project.is_overdue(today),
            payment_count: project.payments.len(),
        }
    }
}
