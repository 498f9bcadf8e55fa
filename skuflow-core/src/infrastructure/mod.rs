// skuflow-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod fs;
pub mod issue_log;
pub mod sheets;
pub mod template;
