// skuflow-core/src/application/clean.rs

use crate::domain::project::PipelineConfig;
use crate::error::SkuflowError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Removes the configured clean targets (the artifact directory by default).
///
/// Returns the paths that were actually removed.
pub fn clean_project(project_dir: &Path, config: &PipelineConfig) -> Result<Vec<PathBuf>, SkuflowError> {
    info!("Cleaning project artifacts");

    let targets = if config.clean_targets.is_empty() {
        vec![config.target_path.clone()]
    } else {
        config.clean_targets.clone()
    };

    let mut removed = Vec::new();
    for target_rel_path in targets {
        // Path traversal guard: relative, no `..`
        let rel = Path::new(&target_rel_path);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(SkuflowError::UnsafePath(target_rel_path));
        }

        let full_path = project_dir.join(rel);
        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            info!(path = ?full_path, "Artifact removed");
            removed.push(full_path);
        }
    }

    Ok(removed)
}
