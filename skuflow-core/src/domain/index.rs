// skuflow-core/src/domain/index.rs

use std::collections::HashMap;

use crate::domain::record::{EMPTY_ROW, RawRow};

/// Lookup table from a key column (brand code, variety code, story id) to its full row.
///
/// Duplicate keys are last-write-wins. Blank keys are inserted like any other;
/// the merge engine trims and guards on its side.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    key_column: String,
    rows: HashMap<String, RawRow>,
}

impl ReferenceIndex {
    pub fn build(rows: &[RawRow], key_column: &str) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            let key = row.get(key_column).cloned().unwrap_or_default();
            index.insert(key, row.clone());
        }

        Self {
            key_column: key_column.to_string(),
            rows: index,
        }
    }

    /// Never fails: a miss yields the shared empty row.
    pub fn lookup(&self, key: &str) -> &RawRow {
        self.rows.get(key).unwrap_or(&EMPTY_ROW)
    }

    pub fn get(&self, key: &str) -> Option<&RawRow> {
        self.rows.get(key)
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
