//! # rv-reports
//!
//! Statistics computed from a snapshot of the project store.
//!
//! ## Structure
//!
//! - `portfolio` - Totals, collection rate and overdue count
//! - `entities` - Per-counterparty rollup
//! - `distribution` - Completed / in progress / overdue partition
//!
//! Every function is pure and recomputes from scratch.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use rv_models::Project;
//! use rv_reports::{portfolio_stats, status_distribution};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let projects = vec![Project::new(1, "A", Decimal::from(100))];
//!
//! let stats = portfolio_stats(&projects, today);
//! assert_eq!(stats.total, 1);
//! assert_eq!(status_distribution(&projects, today).total(), 1);
//! ```

pub mod distribution;
pub mod entities;
pub mod portfolio;

// Re-exports for convenience
pub use distribution::{status_distribution, StatusDistribution};
pub use entities::{entity_rollup, EntityRollup, UNCLASSIFIED};
pub use portfolio::{portfolio_stats, PortfolioStats};
