//! Sheets exported by the fetch step: a JSON array of `{ header: cell }` objects.

use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::record::RawRow;
use crate::infrastructure::error::InfrastructureError;

pub fn read_json_rows(path: &Path) -> Result<Vec<RawRow>, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::SourceMissing(path.to_path_buf()));
    }

    let source_read = |message: String| InfrastructureError::SourceRead {
        path: path.to_path_buf(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| source_read(e.to_string()))?;
    parse_json_rows(&content).map_err(|e| source_read(e.to_string()))
}

pub fn parse_json_rows(content: &str) -> Result<Vec<RawRow>, serde_json::Error> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(content)?;
    Ok(objects
        .into_iter()
        .filter(|obj| !obj.is_empty())
        .map(|obj| obj.into_iter().map(|(k, v)| (k, cell_text(v))).collect())
        .collect())
}

/// Every cell becomes text, the same way a spreadsheet export would print it.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
