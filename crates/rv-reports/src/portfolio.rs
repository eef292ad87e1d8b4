//! Portfolio-level totals

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_models::money::{percentage, saturating_sum};
use rv_models::Project;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total: usize,
    pub overdue: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_collected: Decimal,
    /// Percentage of the contract value collected, 0 for an empty portfolio
    #[serde(with = "rust_decimal::serde::float")]
    pub collection_rate: Decimal,
}

pub fn portfolio_stats(projects: &[Project], today: NaiveDate) -> PortfolioStats {
    let total_amount = saturating_sum(projects.iter().map(|p| p.amount));
    let total_collected = saturating_sum(projects.iter().map(Project::collected));

    PortfolioStats {
        total: projects.len(),
        overdue: projects.iter().filter(|p| p.is_overdue(today)).count(),
        total_amount,
        total_collected,
        collection_rate: percentage(total_collected, total_amount),
    }
}
