// skuflow-core/src/application/mod.rs

pub mod clean;
pub mod merge;
pub mod pipeline;
pub mod ports;
pub mod render;
pub mod report;
pub mod trigger;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use skuflow_core::application::{run_pipeline, clean_project};`
// without knowing the file layout.

pub use clean::clean_project;
pub use merge::{MergedDocument, run_merge};
pub use pipeline::{RunResult, run_pipeline};
pub use render::{load_merged_records, run_render};
pub use report::Report;
pub use trigger::{TriggerRequest, TriggerResponse, handle_trigger, health};
