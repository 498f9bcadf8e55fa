// skuflow-core/src/application/report.rs

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::domain::kpi::{KpiSnapshot, aggregate};
use crate::domain::queue::{QueueItem, build_queue};
use crate::domain::record::UnifiedRecord;
use crate::domain::validation::{ValidationIssue, collect_issues};

// --- DTOs ---
// These structures are exactly what the artifacts contain.

/// `data_overview.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub generated_at: String,
    pub kpi: KpiSnapshot,
    pub issue_count: usize,
}

/// `render_queue.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueArtifact {
    pub generated_at: String,
    pub items: Vec<QueueItem>,
}

/// Row of the AutoGen table in the HTML overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoGenRow {
    pub sku: String,
    pub brand: String,
    pub variety: String,
    pub story: String,
    pub title: String,
}

impl AutoGenRow {
    fn from_record(record: &UnifiedRecord) -> Self {
        Self {
            sku: record.sku.clone(),
            brand: record.brand_label().to_string(),
            variety: record.variety_label().to_string(),
            story: record.story_label().to_string(),
            title: record.title.clone(),
        }
    }
}

/// Everything derived from one record set. Pure; no timestamps.
#[derive(Debug, Clone)]
pub struct Report {
    pub kpi: KpiSnapshot,
    pub issues: Vec<ValidationIssue>,
    pub queue: Vec<QueueItem>,
    pub auto_gen_rows: Vec<AutoGenRow>,
}

impl Report {
    pub fn build(records: &[UnifiedRecord]) -> Self {
        Self {
            kpi: aggregate(records),
            issues: collect_issues(records),
            queue: build_queue(records),
            auto_gen_rows: records
                .iter()
                .filter(|record| record.auto_gen.is_enabled())
                .map(AutoGenRow::from_record)
                .collect(),
        }
    }

    pub fn snapshot(&self, generated_at: &str) -> ReportSnapshot {
        ReportSnapshot {
            generated_at: generated_at.to_string(),
            kpi: self.kpi.clone(),
            issue_count: self.issues.len(),
        }
    }

    pub fn queue_artifact(&self, generated_at: &str) -> QueueArtifact {
        QueueArtifact {
            generated_at: generated_at.to_string(),
            items: self.queue.clone(),
        }
    }

    /// One row per (SKU, issue) pair.
    pub fn issue_rows(&self) -> Vec<[&str; 2]> {
        self.issues
            .iter()
            .flat_map(|issue| {
                issue
                    .issues
                    .iter()
                    .map(move |message| [issue.sku.as_str(), message.as_str()])
            })
            .collect()
    }

    /// Context handed to the HTML template. Tables are plain rows of cells.
    pub fn template_context(&self, title: &str, generated_at: &str) -> Value {
        let auto_gen_rows: Vec<[&str; 5]> = self
            .auto_gen_rows
            .iter()
            .map(|r| [&r.sku, &r.brand, &r.variety, &r.story, &r.title].map(String::as_str))
            .collect();

        json!({
            "title": title,
            "generated_at": generated_at,
            "kpi": self.kpi,
            "by_brand": distribution_rows(&self.kpi.by_brand),
            "by_variety": distribution_rows(&self.kpi.by_variety),
            "by_story": distribution_rows(&self.kpi.by_story),
            "auto_gen_rows": auto_gen_rows,
            "issue_rows": self.issue_rows(),
        })
    }
}

fn distribution_rows(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    counts.iter().map(|(label, n)| (label.as_str(), *n)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::record::{Assets, AutoGen, CopyText, Prompts};

    fn record(sku: &str, brand: &str, auto_gen: bool) -> UnifiedRecord {
        UnifiedRecord {
            sku: sku.into(),
            title: format!("{sku} title"),
            brand_code: brand.into(),
            variety_code: "V1".into(),
            story_id: "S1".into(),
            story_title: "S1".into(),
            auto_gen: AutoGen::Flag(auto_gen),
            copy: CopyText {
                short: "short".into(),
                long: "long".into(),
                keywords: vec![],
            },
            prompts: Prompts {
                image: "img".into(),
                layout: "grid".into(),
                tone: String::new(),
            },
            assets: Assets::default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_views() {
        let records = vec![record("A1", "B1", true), record("A2", "B1", false)];
        let report = Report::build(&records);

        assert_eq!(report.kpi.total, 2);
        assert_eq!(report.auto_gen_rows.len(), 1);
        assert_eq!(report.queue.len(), 1);
        // assets missing: refImages, brandPalette, logoRef on both records
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issue_rows().len(), 6);
        assert_eq!(report.issue_rows()[0], ["A1", "Assets.refImages missing"]);
    }

    #[test]
    fn test_template_context_shape() {
        let report = Report::build(&[record("A1", "B1", true)]);
        let ctx = report.template_context("skuflow", "2026-01-01T00:00:00.000Z");

        assert_eq!(ctx["by_brand"][0], json!(["B1", 1]));
        assert_eq!(ctx["auto_gen_rows"][0][4], json!("A1 title"));
        assert_eq!(ctx["kpi"]["autoGen"], json!(1));
    }

    #[test]
    fn test_snapshot_counts_issues() {
        let report = Report::build(&[record("A1", "B1", true)]);
        let snapshot = report.snapshot("ts");

        assert_eq!(snapshot.issue_count, 1);
        assert_eq!(snapshot.generated_at, "ts");
    }
}
