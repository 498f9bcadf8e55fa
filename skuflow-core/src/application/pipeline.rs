// skuflow-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument};

use crate::application::merge::{run_merge, timestamp};
use crate::application::ports::TemplateEngine;
use crate::application::render::run_render;
use crate::domain::kpi::KpiSnapshot;
use crate::domain::project::{ArtifactPaths, PipelineConfig};
use crate::error::SkuflowError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::SheetSource;

/// Written to `run_results.json` after a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    pub generated_at: String,
    pub records: usize,
    pub duplicate_skus: usize,
    pub issues: usize,
    pub queue_items: usize,
    pub kpi: KpiSnapshot,
    pub artifacts: Vec<String>,
    pub duration_ms: u128,
}

/// Merge then render. Each run recomputes everything from the sheets.
#[instrument(skip_all, fields(project = %config.name))]
pub fn run_pipeline<S, T>(
    source: &S,
    engine: &T,
    config: &PipelineConfig,
    paths: &ArtifactPaths,
    now: DateTime<Utc>,
) -> Result<RunResult, SkuflowError>
where
    S: SheetSource + ?Sized,
    T: TemplateEngine + ?Sized,
{
    let start_time = Instant::now();
    info!("Starting pipeline");

    // 1. MERGE (sheets -> grouped_input.json)
    let merged = run_merge(source, config, paths, now)?;

    // 2. RENDER (grouped_input.json -> report, queue, issue log)
    let rendered = run_render(engine, config, paths, now)?;

    let mut artifacts = vec![merged.output.display().to_string()];
    artifacts.extend(rendered.artifacts.iter().map(|p| p.display().to_string()));
    artifacts.push(paths.issue_log.display().to_string());

    let result = RunResult {
        success: true,
        generated_at: timestamp(now),
        records: rendered.records,
        duplicate_skus: merged.duplicate_skus,
        issues: rendered.issues,
        queue_items: rendered.queue_items,
        kpi: rendered.kpi,
        artifacts,
        duration_ms: start_time.elapsed().as_millis(),
    };

    let content = serde_json::to_string_pretty(&result)
        .map_err(|e| SkuflowError::InternalError(format!("Failed to serialize run results: {e}")))?;
    atomic_write(&paths.run_results, content)?;

    info!(
        records = result.records,
        issues = result.issues,
        queue_items = result.queue_items,
        duration_ms = result.duration_ms as u64,
        "Pipeline complete"
    );

    Ok(result)
}
