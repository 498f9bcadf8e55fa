// skuflow/src/commands/mod.rs

pub mod clean;
pub mod merge;
pub mod render;
pub mod run;
pub mod stats;
pub mod trigger;

use std::path::Path;

use anyhow::Context;
use skuflow_core::domain::project::{ArtifactPaths, PipelineConfig};
use skuflow_core::infrastructure::config::load_pipeline_config;

/// Config plus every artifact location, shared by all project-level commands.
pub(crate) fn load_project(project_dir: &Path) -> anyhow::Result<(PipelineConfig, ArtifactPaths)> {
    println!("⚙️  Loading configuration...");
    let config = load_pipeline_config(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    let paths = ArtifactPaths::resolve(project_dir, &config);
    Ok((config, paths))
}
