// skuflow-core/src/application/render.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

use crate::application::merge::timestamp;
use crate::application::ports::TemplateEngine;
use crate::application::report::Report;
use crate::domain::error::DomainError;
use crate::domain::kpi::KpiSnapshot;
use crate::domain::project::{ArtifactPaths, ColumnMap, PipelineConfig};
use crate::domain::record::{MergedRecord, UnifiedRecord};
use crate::error::SkuflowError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, ensure_dir};
use crate::infrastructure::issue_log::append_issues;
use crate::infrastructure::template::DATA_OVERVIEW_TEMPLATE;

#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub records: usize,
    pub issues: usize,
    pub queue_items: usize,
    pub kpi: KpiSnapshot,
    pub artifacts: Vec<PathBuf>,
}

/// Reads `records[]` from the merged document.
///
/// Each element may be canonical or legacy nested; legacy ones are adapted.
pub fn load_merged_records(
    path: &Path,
    columns: &ColumnMap,
) -> Result<Vec<UnifiedRecord>, SkuflowError> {
    if !path.exists() {
        return Err(InfrastructureError::SourceMissing(path.to_path_buf()).into());
    }

    let source_read = |message: String| InfrastructureError::SourceRead {
        path: path.to_path_buf(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| source_read(e.to_string()))?;
    let document: Value =
        serde_json::from_str(&content).map_err(|e| source_read(e.to_string()))?;
    parse_merged_records(&document, columns)
}

pub fn parse_merged_records(
    document: &Value,
    columns: &ColumnMap,
) -> Result<Vec<UnifiedRecord>, SkuflowError> {
    let Some(records) = document.get("records").and_then(Value::as_array) else {
        return Err(DomainError::InvalidMergedInput("`records` is not an array".to_string()).into());
    };

    records
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let parsed = if MergedRecord::looks_legacy(value) {
                serde_json::from_value::<MergedRecord>(value.clone())
                    .map(|legacy| UnifiedRecord::from_merged(&legacy, columns))
            } else {
                serde_json::from_value::<UnifiedRecord>(value.clone())
            };

            parsed.map_err(|e| {
                SkuflowError::Domain(DomainError::InvalidRecord {
                    index,
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

/// Render stage: validate, aggregate, queue, then persist every artifact.
///
/// The HTML is rendered in memory before anything is written. The three report
/// artifacts are written atomically in order; the issue log is appended last.
#[instrument(skip_all)]
pub fn run_render<T>(
    engine: &T,
    config: &PipelineConfig,
    paths: &ArtifactPaths,
    now: DateTime<Utc>,
) -> Result<RenderSummary, SkuflowError>
where
    T: TemplateEngine + ?Sized,
{
    let records = load_merged_records(&paths.merged_input, &config.columns)?;
    info!(records = records.len(), "Merged records loaded");

    let report = Report::build(&records);
    let generated_at = timestamp(now);

    let html = engine.render(
        DATA_OVERVIEW_TEMPLATE,
        &report.template_context(&config.name, &generated_at),
    )?;

    ensure_dir(&paths.report_dir)?;
    ensure_dir(&paths.queue_dir)?;

    let mut writer = ArtifactWriter::default();
    writer.write(&paths.report_html, html)?;
    writer.write_json(&paths.report_json, &report.snapshot(&generated_at))?;
    writer.write_json(&paths.queue, &report.queue_artifact(&generated_at))?;

    let logged = append_issues(&paths.issue_log, &generated_at, &report.issues)
        .map_err(|e| writer.failure(&paths.issue_log, e))?;

    info!(
        issues = report.issues.len(),
        logged,
        queue_items = report.queue.len(),
        "Report artifacts written"
    );

    Ok(RenderSummary {
        records: records.len(),
        issues: report.issues.len(),
        queue_items: report.queue.len(),
        kpi: report.kpi,
        artifacts: writer.into_written(),
    })
}

/// Tracks which artifacts made it to disk so a failure can name them.
#[derive(Default)]
struct ArtifactWriter {
    written: Vec<PathBuf>,
}

impl ArtifactWriter {
    fn write(&mut self, path: &Path, content: impl AsRef<[u8]>) -> Result<(), SkuflowError> {
        atomic_write(path, content).map_err(|e| self.failure(path, e))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }

    fn write_json<S: Serialize>(&mut self, path: &Path, value: &S) -> Result<(), SkuflowError> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| self.failure(path, InfrastructureError::from(e)))?;
        self.write(path, content)
    }

    fn failure(&self, path: &Path, source: InfrastructureError) -> SkuflowError {
        let written: Vec<String> = self
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        error!(artifact = ?path, written = ?written, error = %source, "Artifact write failed");

        SkuflowError::ArtifactWrite {
            artifact: path.display().to_string(),
            written,
            source,
        }
    }

    fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}
