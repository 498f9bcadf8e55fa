// skuflow/src/commands/clean.rs
//
// USE CASE: Clean build artifacts.

use std::path::PathBuf;

use skuflow_core::application::clean_project;

use super::load_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, _) = load_project(&project_dir)?;

    match clean_project(&project_dir, &config) {
        Ok(removed) => {
            for path in removed {
                println!("   🗑️  Artifact removed: {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("❌ Clean failed: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
