// skuflow-core/src/infrastructure/sheets/mod.rs

pub mod delimited;
pub mod json_rows;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::domain::project::{SheetFiles, SheetKind};
use crate::domain::record::RawRow;
use crate::error::SkuflowError;
use crate::ports::SheetSource;

/// Reads the four sheets from a local directory (CSV, or the fetch step's JSON export).
pub struct FileSheetSource {
    root: PathBuf,
    files: SheetFiles,
}

impl FileSheetSource {
    pub fn new(root: impl Into<PathBuf>, files: SheetFiles) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn path_for(&self, kind: SheetKind) -> PathBuf {
        self.root.join(self.files.file_for(kind))
    }
}

impl SheetSource for FileSheetSource {
    #[instrument(skip(self))]
    fn load(&self, kind: SheetKind) -> Result<Vec<RawRow>, SkuflowError> {
        let path = self.path_for(kind);
        let rows = read_rows(&path)?;
        debug!(sheet = %kind, rows = rows.len(), "Sheet loaded");
        Ok(rows)
    }
}

fn read_rows(path: &Path) -> Result<Vec<RawRow>, SkuflowError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let rows = if is_json {
        json_rows::read_json_rows(path)?
    } else {
        delimited::read_csv_rows(path)?
    };
    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loads_csv_and_json_sheets() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("products.csv"), "SKU\nA1\nA2\n")?;
        fs::write(dir.path().join("brands.json"), r#"[{"브랜드코드": "B1"}]"#)?;

        let files = SheetFiles {
            product: "products.csv".into(),
            brand: "brands.json".into(),
            ..SheetFiles::default()
        };
        let source = FileSheetSource::new(dir.path(), files);

        assert_eq!(source.load(SheetKind::Product)?.len(), 2);
        assert_eq!(source.load(SheetKind::Brand)?.len(), 1);
        assert!(source.load(SheetKind::Story).is_err());
        Ok(())
    }
}
