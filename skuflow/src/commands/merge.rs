// skuflow/src/commands/merge.rs
//
// USE CASE: Merge the sheets into the grouped input document.

use std::path::PathBuf;

use chrono::Utc;
use skuflow_core::application::run_merge;
use skuflow_core::infrastructure::sheets::FileSheetSource;

use super::load_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, paths) = load_project(&project_dir)?;
    let source = FileSheetSource::new(&paths.sheets_dir, config.sheets.clone());

    println!("🔗 Merging sheets from {}...", paths.sheets_dir.display());
    match run_merge(&source, &config, &paths, Utc::now()) {
        Ok(summary) => {
            if summary.duplicate_skus > 0 {
                println!("   ⚠️  {} duplicate SKU(s) kept", summary.duplicate_skus);
            }
            println!(
                "✨ {} records written to {}",
                summary.records,
                summary.output.display()
            );
        }
        Err(e) => {
            eprintln!("❌ Merge failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
