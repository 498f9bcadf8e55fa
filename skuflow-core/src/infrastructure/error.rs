// skuflow-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(skuflow::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- SOURCES (Sheets) ---
    #[error("Source table not found at '{}'", .0.display())]
    #[diagnostic(
        code(skuflow::infra::source_missing),
        help("Export the sheet into the sheets directory before running the pipeline.")
    )]
    SourceMissing(PathBuf),

    #[error("Failed to read source table '{}': {message}", .path.display())]
    #[diagnostic(code(skuflow::infra::source_read))]
    SourceRead { path: PathBuf, message: String },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(skuflow::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(skuflow::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("No skuflow.yaml or skuflow_project.yaml found in '{0}'")]
    #[diagnostic(
        code(skuflow::infra::config_missing),
        help("Run the command from the project root or pass --project-dir.")
    )]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(skuflow::infra::config_invalid),
        help("Sheet file names and column names must not be empty.")
    )]
    ConfigInvalid(#[from] validator::ValidationErrors),

    #[error("Trigger secret is not configured (expected environment variable '{0}')")]
    #[diagnostic(code(skuflow::infra::secret_missing))]
    MissingSecret(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(skuflow::infra::template),
        help("Check the Jinja syntax of the report template.")
    )]
    TemplateError(#[from] minijinja::Error),
}
