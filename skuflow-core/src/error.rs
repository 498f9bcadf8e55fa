// skuflow-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkuflowError {
    // --- DOMAIN ERRORS (Merged input, records) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ARTIFACTS ---
    // `written` lists the artifacts that were already persisted in this run.
    #[error("Failed to write artifact '{artifact}' (already written: [{}]): {source}", .written.join(", "))]
    ArtifactWrite {
        artifact: String,
        written: Vec<String>,
        #[source]
        source: InfrastructureError,
    },

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SkuflowError {
    fn from(err: std::io::Error) -> Self {
        SkuflowError::Infrastructure(InfrastructureError::Io(err))
    }
}
