// skuflow-core/src/domain/project/mod.rs

pub mod configuration;
pub use configuration::{
    ArtifactPaths, ColumnMap, PipelineConfig, SheetFiles, SheetKind, TriggerConfig,
};
