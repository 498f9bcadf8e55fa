// skuflow-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid merged input: {0}")]
    #[diagnostic(
        code(skuflow::domain::merged_input),
        help("Re-run `skuflow merge` to regenerate the merged document.")
    )]
    InvalidMergedInput(String),

    #[error("Record #{index} could not be read: {message}")]
    #[diagnostic(code(skuflow::domain::record))]
    InvalidRecord { index: usize, message: String },
}
