// skuflow-core/src/application/trigger.rs

// Transport-agnostic trigger boundary. An HTTP adapter (or the CLI) builds a
// `TriggerRequest`, calls `handle_trigger`, and maps the `TriggerResponse` status
// and JSON body onto its own wire format.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::path::Path;
use tracing::{error, info, warn};

use crate::application::merge::timestamp;
use crate::error::SkuflowError;
use crate::infrastructure::fs::RunLock;

pub const STATUS_OK: u16 = 200;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_BUSY: u16 = 409;
pub const STATUS_FAILED: u16 = 500;

const BEARER_PREFIX: &str = "Bearer ";

/// Every place a caller may put the shared token.
#[derive(Debug, Clone, Default)]
pub struct TriggerRequest {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    pub query_token: Option<String>,
    pub body_token: Option<String>,
}

impl TriggerRequest {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            body_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Bearer header first, then query, then body.
    pub fn token(&self) -> Option<&str> {
        let bearer = self
            .authorization
            .as_deref()
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::trim);

        [bearer, self.query_token.as_deref(), self.body_token.as_deref()]
            .into_iter()
            .flatten()
            .find(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerResponse {
    pub status_code: u16,
    pub body: Value,
}

impl TriggerResponse {
    fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

pub fn authorize(request: &TriggerRequest, secret: &str) -> bool {
    !secret.is_empty() && request.token() == Some(secret)
}

/// Runs `pipeline` once the token checks out and no other run holds the lock.
///
/// The lock lives next to the artifacts and is released when the run ends,
/// successful or not, or when the process dies.
pub fn handle_trigger<F, R>(
    request: &TriggerRequest,
    secret: &str,
    lock_path: &Path,
    pipeline: F,
) -> TriggerResponse
where
    F: FnOnce() -> Result<R, SkuflowError>,
{
    if !authorize(request, secret) {
        warn!("Trigger rejected: invalid or missing token");
        return TriggerResponse::new(STATUS_UNAUTHORIZED, json!({"error": "Unauthorized"}));
    }

    let _lock = match RunLock::try_acquire(lock_path) {
        Ok(Some(lock)) => lock,
        Ok(None) => {
            warn!(lock = ?lock_path, "Trigger rejected: a run is already in progress");
            return TriggerResponse::new(
                STATUS_BUSY,
                json!({"error": "Pipeline already running"}),
            );
        }
        Err(e) => {
            error!(error = %e, "Could not acquire run lock");
            return TriggerResponse::new(STATUS_FAILED, json!({"error": e.to_string()}));
        }
    };

    info!("Trigger accepted");
    match pipeline() {
        Ok(_) => TriggerResponse::new(
            STATUS_OK,
            json!({"status": "ok", "message": "Pipeline complete"}),
        ),
        Err(e) => {
            error!(error = %e, "Triggered pipeline failed");
            TriggerResponse::new(STATUS_FAILED, json!({"error": e.to_string()}))
        }
    }
}

pub fn health(now: DateTime<Utc>) -> TriggerResponse {
    TriggerResponse::new(STATUS_OK, json!({"ok": true, "ts": timestamp(now)}))
}
