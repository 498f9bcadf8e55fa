// skuflow-core/src/domain/adapter.rs
//
// Legacy nested shape -> canonical UnifiedRecord.
// Both the merge stage and the render stage (for older merged documents) go through here.

use crate::domain::merge::{cell, trimmed};
use crate::domain::project::ColumnMap;
use crate::domain::record::{
    Assets, AutoGen, CopyText, MergedRecord, Meta, Prompts, RawRow, UnifiedRecord,
};

const LIST_SEPARATORS: [char; 3] = [',', '|', '\n'];

impl UnifiedRecord {
    pub fn from_merged(merged: &MergedRecord, columns: &ColumnMap) -> Self {
        let product = &merged.product;

        // Older documents carry no product row: recover the codes from the referenced rows.
        let brand_code = code_or(product, &merged.brand, &columns.brand_code);
        let variety_code = code_or(product, &merged.variety, &columns.variety_code);
        let story_id = code_or(product, &merged.story, &columns.story_id);

        let story_title = match trimmed(&merged.story, &columns.story_title) {
            "" => story_id.clone(),
            title => title.to_string(),
        };

        let mut brand_palette = split_list(cell(&merged.brand, &columns.brand_palette));
        if brand_palette.is_empty() {
            brand_palette = split_list(cell(product, &columns.brand_palette));
        }

        let logo_ref = Some(trimmed(product, &columns.logo_ref))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        UnifiedRecord {
            sku: merged.sku.clone(),
            title: merged.title.clone(),
            brand_name: trimmed(&merged.brand, &columns.brand_name).to_string(),
            variety_name: trimmed(&merged.variety, &columns.variety_name).to_string(),
            brand_code,
            variety_code,
            story_id,
            story_title,
            auto_gen: AutoGen::Flag(merged.auto_gen),
            copy: CopyText {
                short: cell(product, &columns.copy_short).to_string(),
                long: cell(product, &columns.copy_long).to_string(),
                keywords: split_list(cell(product, &columns.keywords)),
            },
            prompts: Prompts {
                image: cell(product, &columns.prompt_image).to_string(),
                layout: cell(product, &columns.prompt_layout).to_string(),
                tone: cell(product, &columns.prompt_tone).to_string(),
            },
            assets: Assets {
                ref_images: split_list(cell(product, &columns.ref_images)),
                brand_palette,
                logo_ref,
            },
            meta: Meta {
                price: parse_price(cell(product, &columns.price)),
                updated_at: Some(trimmed(product, &columns.updated_at))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            },
        }
    }
}

fn code_or(product: &RawRow, reference: &RawRow, column: &str) -> String {
    match trimmed(product, column) {
        "" => trimmed(reference, column).to_string(),
        code => code.to_string(),
    }
}

/// Splits a multi-value cell on `,`, `|` or newlines, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts `12000`, `12,000` and `12000.5`; anything else is treated as absent.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}
