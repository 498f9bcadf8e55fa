// skuflow/src/commands/run.rs
//
// USE CASE: Run the full pipeline (merge then render).

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use skuflow_core::application::run_pipeline;
use skuflow_core::infrastructure::sheets::FileSheetSource;
use skuflow_core::infrastructure::template::JinjaRenderer;

use super::load_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    let (config, paths) = load_project(&project_dir)?;

    // B. Adapters
    let source = FileSheetSource::new(&paths.sheets_dir, config.sheets.clone());
    let engine = JinjaRenderer::new().context("Failed to load report template")?;

    // C. Run the Pipeline (Application Layer)
    match run_pipeline(&source, &engine, &config, &paths, Utc::now()) {
        Ok(result) => {
            println!(
                "   Records: {} · Issues: {} · Queue: {}",
                result.records, result.issues, result.queue_items
            );
            for artifact in &result.artifacts {
                println!("   - {}", artifact);
            }
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
