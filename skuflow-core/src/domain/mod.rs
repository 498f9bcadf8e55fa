pub mod adapter;
pub mod completeness;
pub mod error;
pub mod index;
pub mod kpi;
pub mod merge;
pub mod project;
pub mod queue;
pub mod record;
pub mod validation;

// Handy re-exports to keep imports short elsewhere
pub use completeness::FieldCheck;
pub use error::DomainError;
pub use record::{AutoGen, MergedRecord, RawRow, UnifiedRecord};
