// skuflow-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Where the sheets come from.
pub mod ports;

// 2. Domain (business core)
// Records, reference index, merge, completeness checks, KPIs, queue.
// Depends on nothing else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV/JSON sheets, config files, Jinja report template, atomic writes, issue log.
// Depends on the Domain and the Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Merge stage, render stage, full pipeline, trigger boundary, clean.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use skuflow_core::SkuflowError;
pub use error::SkuflowError;
