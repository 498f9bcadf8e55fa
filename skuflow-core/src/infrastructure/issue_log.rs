//! Append-only JSONL issue log: one `{ts, sku, issues}` object per line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationIssue;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{append_lines, ensure_dir};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLogEntry {
    pub ts: String,
    pub sku: String,
    pub issues: Vec<String>,
}

/// Appends one line per issue. Returns the number of lines written.
pub fn append_issues(
    path: &Path,
    ts: &str,
    issues: &[ValidationIssue],
) -> Result<usize, InfrastructureError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let lines = issues
        .iter()
        .map(|issue| {
            serde_json::to_string(&IssueLogEntry {
                ts: ts.to_string(),
                sku: issue.sku.clone(),
                issues: issue.issues.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    append_lines(path, lines)
}
