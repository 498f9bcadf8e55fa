// skuflow-core/src/application/merge.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::domain::merge::{MergeEngine, SheetSet, find_duplicate_skus};
use crate::domain::project::{ArtifactPaths, ColumnMap, PipelineConfig, SheetKind};
use crate::domain::record::UnifiedRecord;
use crate::error::SkuflowError;
use crate::infrastructure::fs::{atomic_write, ensure_dir};
use crate::ports::SheetSource;

pub const MERGE_SOURCE_TAG: &str = "sheets|merge";

/// The merge stage's artifact, consumed by the render stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedDocument {
    pub records: Vec<UnifiedRecord>,
    pub source: String,
    pub generated_at: String,
}

#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub records: usize,
    pub duplicate_skus: usize,
    pub output: PathBuf,
}

/// ISO-8601 UTC with millisecond precision, as written into every artifact.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Loads the four sheets. Any missing or unreadable sheet aborts the run.
pub fn load_sheets<S>(source: &S) -> Result<SheetSet, SkuflowError>
where
    S: SheetSource + ?Sized,
{
    Ok(SheetSet {
        products: source.load(SheetKind::Product)?,
        brands: source.load(SheetKind::Brand)?,
        varieties: source.load(SheetKind::Variety)?,
        stories: source.load(SheetKind::Story)?,
    })
}

#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub records: Vec<UnifiedRecord>,
    /// `(sku, occurrences)` for every SKU seen more than once, in first-seen order.
    pub duplicates: Vec<(String, usize)>,
}

/// Joins the sheets and flattens every merged row into the canonical schema.
pub fn merge_sheets(sheets: &SheetSet, columns: &ColumnMap) -> MergeOutput {
    let engine = MergeEngine::new(columns, sheets);
    let merged = engine.merge(&sheets.products);

    let duplicates = find_duplicate_skus(&merged);
    for (sku, count) in &duplicates {
        warn!(sku = %sku, count, "Duplicate SKU in product sheet; keeping every row");
    }

    MergeOutput {
        records: merged
            .iter()
            .map(|record| UnifiedRecord::from_merged(record, columns))
            .collect(),
        duplicates,
    }
}

#[instrument(skip_all)]
pub fn run_merge<S>(
    source: &S,
    config: &PipelineConfig,
    paths: &ArtifactPaths,
    now: DateTime<Utc>,
) -> Result<MergeSummary, SkuflowError>
where
    S: SheetSource + ?Sized,
{
    info!("Loading sheets");
    let sheets = load_sheets(source)?;
    info!(
        products = sheets.products.len(),
        brands = sheets.brands.len(),
        varieties = sheets.varieties.len(),
        stories = sheets.stories.len(),
        "Sheets loaded"
    );

    let output = merge_sheets(&sheets, &config.columns);
    let duplicate_skus = output.duplicates.len();

    let document = MergedDocument {
        records: output.records,
        source: MERGE_SOURCE_TAG.to_string(),
        generated_at: timestamp(now),
    };

    ensure_dir(&paths.target_dir)?;
    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| SkuflowError::InternalError(format!("Failed to serialize merged document: {e}")))?;
    atomic_write(&paths.merged_input, content)?;

    info!(records = document.records.len(), path = ?paths.merged_input, "Merged document written");

    Ok(MergeSummary {
        records: document.records.len(),
        duplicate_skus,
        output: paths.merged_input.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::record::{AutoGen, RawRow};
    use crate::domain::validation::validate_record;
    use std::collections::BTreeMap;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>()
    }

    struct MemorySource(SheetSet);

    impl SheetSource for MemorySource {
        fn load(&self, kind: SheetKind) -> Result<Vec<RawRow>, SkuflowError> {
            Ok(match kind {
                SheetKind::Product => self.0.products.clone(),
                SheetKind::Brand => self.0.brands.clone(),
                SheetKind::Variety => self.0.varieties.clone(),
                SheetKind::Story => self.0.stories.clone(),
            })
        }
    }

    fn sheets() -> SheetSet {
        SheetSet {
            products: vec![
                row(&[("SKU", "A1"), ("브랜드코드", "B1"), ("스토리ID", " "), ("AUTO_GEN", "true")]),
                row(&[("SKU", "A2"), ("브랜드코드", "ZZ"), ("AUTO_GEN", "false")]),
            ],
            brands: vec![row(&[("브랜드코드", "B1"), ("BRAND_NAME", "BrandX")])],
            varieties: vec![],
            stories: vec![],
        }
    }

    #[test]
    fn test_end_to_end_record() {
        let records = merge_sheets(&sheets(), &ColumnMap::default()).records;

        assert_eq!(records.len(), 2);
        let a1 = &records[0];
        assert_eq!(a1.sku, "A1");
        assert_eq!(a1.brand_name, "BrandX");
        assert_eq!(a1.auto_gen, AutoGen::Flag(true));
        assert_eq!(a1.story_title, "");
        assert!(validate_record(a1).contains(&"StoryId missing".to_string()));

        // unmatched brand code: empty name, labelled by its code
        assert_eq!(records[1].brand_name, "");
        assert_eq!(records[1].brand_label(), "ZZ");
    }

    #[test]
    fn test_padded_story_id_is_trimmed_and_valid() {
        let mut set = sheets();
        set.products[0].insert("스토리ID".into(), " S1 ".into());

        let records = merge_sheets(&set, &ColumnMap::default()).records;
        let a1 = &records[0];

        assert_eq!(a1.story_id, "S1");
        // no story sheet row for S1: the title falls back to the id
        assert_eq!(a1.story_title, "S1");
        assert!(!validate_record(a1).contains(&"StoryId missing".to_string()));
    }

    #[test]
    fn test_run_merge_writes_document() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = PipelineConfig::default();
        let paths = ArtifactPaths::resolve(dir.path(), &config);
        let now = DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")?.with_timezone(&Utc);

        let summary = run_merge(&MemorySource(sheets()), &config, &paths, now)?;
        assert_eq!(summary.records, 2);
        assert_eq!(summary.duplicate_skus, 0);

        let doc: MergedDocument =
            serde_json::from_str(&std::fs::read_to_string(&paths.merged_input)?)?;
        assert_eq!(doc.source, MERGE_SOURCE_TAG);
        assert_eq!(doc.generated_at, "2026-03-01T09:00:00.000Z");
        assert_eq!(doc.records.len(), 2);
        Ok(())
    }

    #[test]
    fn test_duplicate_skus_are_kept() {
        let mut set = sheets();
        set.products.push(row(&[("SKU", "A1")]));

        let output = merge_sheets(&set, &ColumnMap::default());
        assert_eq!(output.records.len(), 3);
        assert_eq!(output.duplicates, vec![("A1".to_string(), 2)]);
    }
}
