//! Dashboard statistics representer

use chrono::NaiveDate;
use rv_models::Project;
use rv_reports::{entity_rollup, portfolio_stats, status_distribution, EntityRollup, PortfolioStats, StatusDistribution};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub portfolio: PortfolioStats,
    pub distribution: StatusDistribution,
    pub entities: Vec<EntityRollup>,
}

impl DashboardStats {
    pub fn compute(projects: &[Project], today: NaiveDate) -> Self {
        Self {
            portfolio: portfolio_stats(projects, today),
            distribution: status_distribution(projects, today),
            entities: entity_rollup(projects),
        }
    }
}
