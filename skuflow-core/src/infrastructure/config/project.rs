// skuflow-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::{PipelineConfig, TriggerConfig};
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["skuflow.yaml", "skuflow_project.yaml"];

pub const ENV_TARGET_PATH: &str = "SKUFLOW_TARGET_PATH";
pub const ENV_SHEETS_PATH: &str = "SKUFLOW_SHEETS_PATH";
pub const ENV_LOGS_PATH: &str = "SKUFLOW_LOGS_PATH";

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    // 1. Locate the project file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading pipeline configuration");

    // 2. Base YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: PipelineConfig = serde_yaml::from_str(&content)?;

    // 3. Environment overrides (layering)
    // e.g. SKUFLOW_TARGET_PATH=/tmp/build skuflow run
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    // 4. Fail before any stage runs
    config.validate()?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(
        root.display().to_string(),
    ))
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_TARGET_PATH) {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup(ENV_SHEETS_PATH) {
        info!(old = ?config.sheets_path, new = ?val, "Overriding sheets path via ENV");
        config.sheets_path = val;
    }
    if let Some(val) = lookup(ENV_LOGS_PATH) {
        info!(old = ?config.logs_path, new = ?val, "Overriding logs path via ENV");
        config.logs_path = val;
    }
}

/// The shared trigger secret, read from the environment variable named in the config.
pub fn resolve_trigger_secret(trigger: &TriggerConfig) -> Result<String, InfrastructureError> {
    resolve_secret_with(trigger, |key| std::env::var(key).ok())
}

fn resolve_secret_with<F>(trigger: &TriggerConfig, lookup: F) -> Result<String, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&trigger.token_env)
        .filter(|secret| !secret.trim().is_empty())
        .ok_or_else(|| InfrastructureError::MissingSecret(trigger.token_env.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_project_dir() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("skuflow.yaml"),
            "name: catalog\nsheets-path: sheets\n",
        )?;

        let config = load_pipeline_config(dir.path())?;
        assert_eq!(config.name, "catalog");
        assert_eq!(config.sheets_path, "sheets");
        Ok(())
    }

    #[test]
    fn test_missing_config_file() -> Result<()> {
        let dir = tempdir()?;
        let err = load_pipeline_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigNotFound(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("skuflow.yaml"), "name: \"\"\n")?;

        let err = load_pipeline_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigInvalid(_)));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PipelineConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == ENV_TARGET_PATH).then(|| "/tmp/out".to_string())
        });

        assert_eq!(config.target_path, "/tmp/out");
        assert_eq!(config.sheets_path, "data/sheets");
    }

    #[test]
    fn test_secret_resolution() {
        let trigger = TriggerConfig::default();

        let secret = resolve_secret_with(&trigger, |_| Some("s3cret".to_string()));
        assert_eq!(secret.unwrap(), "s3cret");

        let missing = resolve_secret_with(&trigger, |_| Some("  ".to_string()));
        assert!(matches!(missing, Err(InfrastructureError::MissingSecret(_))));
    }
}
