//! CSV sheets: header row + string cells.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::record::RawRow;
use crate::infrastructure::error::InfrastructureError;

/// Read a CSV sheet into row maps keyed by the header row.
///
/// Blank lines are skipped. Cells are kept verbatim (no trimming, no coercion);
/// rows shorter than the header get `""` for the missing columns.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::SourceMissing(path.to_path_buf()));
    }

    let source_read = |message: String| InfrastructureError::SourceRead {
        path: path.to_path_buf(),
        message,
    };
    let file = std::fs::File::open(path).map_err(|e| source_read(e.to_string()))?;
    parse_csv_rows(file).map_err(|e| source_read(e.to_string()))
}

pub fn parse_csv_rows<R: Read>(input: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.clone(), record.get(idx).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
