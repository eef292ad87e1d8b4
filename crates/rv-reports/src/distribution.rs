//! Status distribution
//!
//! Every project lands in exactly one bucket, using the same rule as
//! [`Project::display_status`].

use chrono::NaiveDate;
use rv_models::{DisplayStatus, Project};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl StatusDistribution {
    pub fn total(&self) -> usize {
        self.completed + self.in_progress + self.overdue
    }

    fn record(&mut self, status: DisplayStatus) {
        match status {
            DisplayStatus::Completed => self.completed += 1,
            DisplayStatus::InProgress => self.in_progress += 1,
            DisplayStatus::Overdue => self.overdue += 1,
        }
    }
}

pub fn status_distribution(projects: &[Project], today: NaiveDate) -> StatusDistribution {
    let mut distribution = StatusDistribution::default();
    for project in projects {
        distribution.record(project.display_status(today));
    }
    distribution
}
