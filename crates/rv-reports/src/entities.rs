//! Rollup by counterparty

use std::collections::HashMap;

use rust_decimal::Decimal;
use rv_models::money::percentage;
use rv_models::Project;
use serde::Serialize;

/// Bucket for projects without a counterparty
pub const UNCLASSIFIED: &str = "unclassified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRollup {
    pub entity: String,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub collected: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub collection_rate: Decimal,
    pub projects: Vec<Project>,
}

impl EntityRollup {
    fn new(entity: String) -> Self {
        Self {
            entity,
            count: 0,
            amount: Decimal::ZERO,
            collected: Decimal::ZERO,
            remaining: Decimal::ZERO,
            collection_rate: Decimal::ZERO,
            projects: Vec::new(),
        }
    }

    fn push(&mut self, project: &Project) {
        self.count += 1;
        self.amount = self.amount.saturating_add(project.amount);
        self.collected = self.collected.saturating_add(project.collected());
        self.projects.push(project.clone());
    }
}

/// Group projects by entity, largest contract value first.
///
/// Entities with equal amounts keep the order they were first seen in.
pub fn entity_rollup(projects: &[Project]) -> Vec<EntityRollup> {
    let mut rollups: Vec<EntityRollup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for project in projects {
        let entity = project.entity_or(UNCLASSIFIED);
        let slot = *index.entry(entity.clone()).or_insert_with(|| {
            rollups.push(EntityRollup::new(entity));
            rollups.len() - 1
        });
        rollups[slot].push(project);
    }

    for rollup in &mut rollups {
        rollup.remaining = rollup.amount.saturating_sub(rollup.collected);
        rollup.collection_rate = percentage(rollup.collected, rollup.amount);
    }

    // sort_by is stable
    rollups.sort_by(|a, b| b.amount.cmp(&a.amount));
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rv_models::Payment;

    fn project(id: i64, entity: &str, amount: i64) -> Project {
        let mut project = Project::new(id, format!("P{}", id), Decimal::from(amount));
        project.entity = entity.to_string();
        project
    }

    #[test]
    fn test_groups_and_sorts_descending() {
        let mut paid = project(3, "Acme", 50);
        paid.payments.push(Payment::new(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Decimal::from(25)));

        let projects = vec![project(1, "Acme", 100), project(2, "Globex", 400), paid];
        let rollup = entity_rollup(&projects);

        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].entity, "Globex");
        assert_eq!(rollup[1].entity, "Acme");
        assert_eq!(rollup[1].count, 2);
        assert_eq!(rollup[1].amount, Decimal::from(150));
        assert_eq!(rollup[1].collected, Decimal::from(25));
        assert_eq!(rollup[1].remaining, Decimal::from(125));
    }

    #[test]
    fn test_blank_entity_is_unclassified() {
        let rollup = entity_rollup(&[project(1, "", 10), project(2, "  ", 20)]);
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].entity, UNCLASSIFIED);
        assert_eq!(rollup[0].count, 2);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let projects = vec![project(1, "Beta", 10), project(2, "Alpha", 10), project(3, "Gamma", 10)];
        let names: Vec<_> = entity_rollup(&projects).into_iter().map(|r| r.entity).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_rollup_preserves_totals() {
        let projects: Vec<Project> = (0..20)
            .map(|i| project(i, ["A", "B", "", "C"][(i % 4) as usize], i * 7 + 1))
            .collect();
        let rollup = entity_rollup(&projects);

        let amount: Decimal = rollup.iter().map(|r| r.amount).sum();
        let count: usize = rollup.iter().map(|r| r.count).sum();
        assert_eq!(amount, projects.iter().map(|p| p.amount).sum::<Decimal>());
        assert_eq!(count, projects.len());
    }
}
