// skuflow-core/src/domain/queue.rs

use serde::{Deserialize, Serialize};

use crate::domain::completeness::FieldCheck;
use crate::domain::record::UnifiedRecord;
use crate::domain::validation::failed_checks;

pub const BASE_PRIORITY: i32 = 100;
pub const MISSING_ASSET_PENALTY: i32 = 20;
/// Lowest score an item can reach, whatever the number of penalties.
pub const PRIORITY_FLOOR: i32 = 0;

/// One render candidate in the downstream work queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "BrandCode")]
    pub brand_code: String,
    #[serde(rename = "StoryId")]
    pub story_id: String,
    #[serde(rename = "layoutHint")]
    pub layout_hint: String,
    pub priority: i32,
}

/// 100 minus 20 per missing critical asset (refImages, brandPalette, logoRef).
pub fn priority(record: &UnifiedRecord) -> i32 {
    let missing = failed_checks(record)
        .into_iter()
        .filter(|check| FieldCheck::CRITICAL_ASSETS.contains(check))
        .count() as i32;

    (BASE_PRIORITY - MISSING_ASSET_PENALTY * missing).max(PRIORITY_FLOOR)
}

/// AutoGen records only, highest priority first. Ties keep encounter order.
pub fn build_queue(records: &[UnifiedRecord]) -> Vec<QueueItem> {
    let mut items: Vec<QueueItem> = records
        .iter()
        .filter(|record| record.auto_gen.is_enabled())
        .map(|record| QueueItem {
            sku: record.sku.clone(),
            brand_code: record.brand_code.clone(),
            story_id: record.story_id.clone(),
            layout_hint: record.prompts.layout.clone(),
            priority: priority(record),
        })
        .collect();

    // `sort_by` is stable
    items.sort_by(|a, b| b.priority.cmp(&a.priority));
    items
}
