// skuflow/src/commands/trigger.rs
//
// USE CASE: Authenticated trigger and liveness probe, from the command line.
// Prints the same JSON body an HTTP adapter would send back.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use skuflow_core::application::{TriggerRequest, TriggerResponse, handle_trigger, run_pipeline};
use skuflow_core::infrastructure::config::resolve_trigger_secret;
use skuflow_core::infrastructure::sheets::FileSheetSource;
use skuflow_core::infrastructure::template::JinjaRenderer;

use super::load_project;

pub fn execute(project_dir: PathBuf, token: Option<String>) -> anyhow::Result<()> {
    let (config, paths) = load_project(&project_dir)?;
    let secret = resolve_trigger_secret(&config.trigger)
        .context("Trigger secret is required before accepting requests")?;

    let request = TriggerRequest {
        body_token: token,
        ..TriggerRequest::default()
    };

    let response = handle_trigger(&request, &secret, &paths.run_lock, || {
        let source = FileSheetSource::new(&paths.sheets_dir, config.sheets.clone());
        let engine = JinjaRenderer::new()?;
        run_pipeline(&source, &engine, &config, &paths, Utc::now())
    });

    emit(&response)
}

pub fn health() -> anyhow::Result<()> {
    emit(&skuflow_core::application::health(Utc::now()))
}

fn emit(response: &TriggerResponse) -> anyhow::Result<()> {
    tracing::debug!(status = response.status_code, "Trigger response");
    println!("{}", serde_json::to_string(&response.body)?);
    if !response.is_success() {
        eprintln!("❌ Trigger refused (status {})", response.status_code);
        std::process::exit(1);
    }
    Ok(())
}
