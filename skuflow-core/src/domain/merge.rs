// skuflow-core/src/domain/merge.rs

use std::collections::{BTreeMap, HashMap};

use crate::domain::index::ReferenceIndex;
use crate::domain::project::ColumnMap;
use crate::domain::record::{MergedRecord, RawRow, normalize_auto_gen_text};

/// The four loaded sheets of one run.
#[derive(Debug, Clone, Default)]
pub struct SheetSet {
    pub products: Vec<RawRow>,
    pub brands: Vec<RawRow>,
    pub varieties: Vec<RawRow>,
    pub stories: Vec<RawRow>,
}

/// Joins product rows onto the brand, variety and story reference sheets.
pub struct MergeEngine<'a> {
    columns: &'a ColumnMap,
    brands: ReferenceIndex,
    varieties: ReferenceIndex,
    stories: ReferenceIndex,
}

impl<'a> MergeEngine<'a> {
    pub fn new(columns: &'a ColumnMap, sheets: &SheetSet) -> Self {
        Self {
            columns,
            brands: ReferenceIndex::build(&sheets.brands, &columns.brand_code),
            varieties: ReferenceIndex::build(&sheets.varieties, &columns.variety_code),
            stories: ReferenceIndex::build(&sheets.stories, &columns.story_id),
        }
    }

    /// One merged record per product row, in input order. Pure.
    pub fn merge(&self, products: &[RawRow]) -> Vec<MergedRecord> {
        products.iter().map(|row| self.merge_row(row)).collect()
    }

    fn merge_row(&self, row: &RawRow) -> MergedRecord {
        let brand_code = trimmed(row, &self.columns.brand_code);
        let variety_code = trimmed(row, &self.columns.variety_code);
        let story_id = trimmed(row, &self.columns.story_id);

        MergedRecord {
            sku: cell(row, &self.columns.sku).to_string(),
            title: cell(row, &self.columns.title).to_string(),
            brand: self.brands.lookup(brand_code).clone(),
            variety: self.varieties.lookup(variety_code).clone(),
            story: self.stories.lookup(story_id).clone(),
            auto_gen: normalize_auto_gen_text(row.get(&self.columns.auto_gen).map(String::as_str)),
            product: row.clone(),
        }
    }

    pub fn brand_index(&self) -> &ReferenceIndex {
        &self.brands
    }

    pub fn variety_index(&self) -> &ReferenceIndex {
        &self.varieties
    }

    pub fn story_index(&self) -> &ReferenceIndex {
        &self.stories
    }
}

/// SKUs that occur more than once, with their occurrence count, in first-seen order.
pub fn find_duplicate_skus(records: &[MergedRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: BTreeMap<usize, &str> = BTreeMap::new();

    for (position, record) in records.iter().enumerate() {
        let count = counts.entry(record.sku.as_str()).or_insert(0);
        if *count == 0 {
            order.insert(position, record.sku.as_str());
        }
        *count += 1;
    }

    order
        .into_values()
        .filter_map(|sku| {
            let count = counts.get(sku).copied().unwrap_or(0);
            (count > 1 && !sku.is_empty()).then(|| (sku.to_string(), count))
        })
        .collect()
}

pub(crate) fn cell<'r>(row: &'r RawRow, column: &str) -> &'r str {
    row.get(column).map(String::as_str).unwrap_or("")
}

pub(crate) fn trimmed<'r>(row: &'r RawRow, column: &str) -> &'r str {
    cell(row, column).trim()
}
