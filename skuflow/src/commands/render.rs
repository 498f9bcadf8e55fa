// skuflow/src/commands/render.rs
//
// USE CASE: Render the data overview from an existing merged document.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use skuflow_core::application::run_render;
use skuflow_core::infrastructure::template::JinjaRenderer;

use super::load_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, paths) = load_project(&project_dir)?;
    let engine = JinjaRenderer::new().context("Failed to load report template")?;

    println!("📊 Rendering data overview...");
    match run_render(&engine, &config, &paths, Utc::now()) {
        Ok(summary) => {
            for artifact in &summary.artifacts {
                println!("   - {}", artifact.display());
            }
            println!(
                "✨ {} records, {} with issues (logged to {})",
                summary.records,
                summary.issues,
                paths.issue_log.display()
            );
        }
        Err(e) => {
            eprintln!("❌ Render failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
