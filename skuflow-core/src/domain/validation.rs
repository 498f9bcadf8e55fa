// skuflow-core/src/domain/validation.rs

use serde::{Deserialize, Serialize};

use crate::domain::completeness::FieldCheck;
use crate::domain::record::UnifiedRecord;

/// Issues found on one record, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "SKU")]
    pub sku: String,
    pub issues: Vec<String>,
}

/// Every failing check, in evaluation order. No check short-circuits another.
pub fn failed_checks(record: &UnifiedRecord) -> Vec<FieldCheck> {
    FieldCheck::ALL
        .into_iter()
        .filter(|check| check.fails(record))
        .collect()
}

/// Human-readable issues for one record; empty when the record is complete.
pub fn validate_record(record: &UnifiedRecord) -> Vec<String> {
    failed_checks(record)
        .into_iter()
        .map(|check| check.issue().to_string())
        .collect()
}

/// Issue entries for every incomplete record, preserving record order.
pub fn collect_issues(records: &[UnifiedRecord]) -> Vec<ValidationIssue> {
    records
        .iter()
        .filter_map(|record| {
            let issues = validate_record(record);
            (!issues.is_empty()).then(|| ValidationIssue {
                sku: record.sku.clone(),
                issues,
            })
        })
        .collect()
}
