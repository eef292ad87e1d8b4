//! Wire record for projects
//!
//! Used by the REST surface, backups and JSON import/export.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rv_core::traits::Id;
use serde::{Deserialize, Serialize};

use super::model::Project;
use crate::payment::Payment;
use crate::serde_helpers::{null_as_default, optional_date};
use crate::status::ProjectStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Id,
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
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<Payment>,

    /// Derived; written for readers, never trusted on input
    #[serde(skip_deserializing, serialize_with = "rust_decimal::serde::float::serialize")]
    pub collected: Decimal,
    #[serde(skip_deserializing, serialize_with = "rust_decimal::serde::float::serialize")]
    pub remaining: Decimal,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            entity: record.entity,
            invoice_info: record.invoice_info,
            sign_date: record.sign_date,
            payment_date: record.payment_date,
            manager: record.manager,
            contact: record.contact,
            amount: record.amount,
            status: record.status,
            payments: record.payments,
        }
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        let collected = project.collected();
        let remaining = project.remaining();
        Self {
            id: project.id,
            name: project.name,
            entity: project.entity,
            invoice_info: project.invoice_info,
            sign_date: project.sign_date,
            payment_date: project.payment_date,
            manager: project.manager,
            contact: project.contact,
            amount: project.amount,
            status: project.status,
            payments: project.payments,
            collected,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected_is_written_but_not_read() {
        let json = r#"{
            "id": 3,
            "name": "Warehouse fit-out",
            "entity": "Acme",
            "signDate": "2023-01-15",
            "paymentDate": "",
            "amount": 100,
            "status": "进行中",
            "collected": 9999,
            "payments": [{"id": 1, "date": "2023-02-01", "amount": 40}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.collected(), Decimal::from(40));
        assert!(project.payment_date.is_none());

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["collected"], serde_json::json!(40.0));
        assert_eq!(value["remaining"], serde_json::json!(60.0));
        assert_eq!(value["signDate"], serde_json::json!("2023-01-15"));
        assert_eq!(value["status"], serde_json::json!("in_progress"));
    }

    #[test]
    fn test_missing_amount_is_rejected() {
        let result = serde_json::from_str::<Project>(r#"{"id": 1, "name": "A"}"#);
        assert!(result.is_err());
    }
}
