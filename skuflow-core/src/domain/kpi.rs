// skuflow-core/src/domain/kpi.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::completeness::FieldCheck;
use crate::domain::record::UnifiedRecord;

/// Aggregate counts over one run's record set. Fully derived, recomputed every run.
///
/// Distributions are keyed by display label and kept in a `BTreeMap` so two runs
/// over the same input serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total: usize,
    pub auto_gen: usize,
    pub by_brand: BTreeMap<String, usize>,
    pub by_variety: BTreeMap<String, usize>,
    pub by_story: BTreeMap<String, usize>,
    pub missing: MissingCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MissingCounts {
    pub copy_short: usize,
    pub copy_long: usize,
    pub prompt_image: usize,
    pub prompt_layout: usize,
    pub ref_images: usize,
    pub brand_palette: usize,
    pub logo_ref: usize,
}

impl MissingCounts {
    fn bump(&mut self, check: FieldCheck) {
        let slot = match check {
            FieldCheck::CopyShort => &mut self.copy_short,
            FieldCheck::CopyLong => &mut self.copy_long,
            FieldCheck::PromptImage => &mut self.prompt_image,
            FieldCheck::PromptLayout => &mut self.prompt_layout,
            FieldCheck::RefImages => &mut self.ref_images,
            FieldCheck::BrandPalette => &mut self.brand_palette,
            FieldCheck::LogoRef => &mut self.logo_ref,
            // Identifier and type checks are not tallied.
            _ => return,
        };
        *slot += 1;
    }

    pub fn assets(&self) -> usize {
        self.ref_images + self.brand_palette + self.logo_ref
    }

    pub fn copy_and_prompts(&self) -> usize {
        self.copy_short + self.copy_long + self.prompt_image + self.prompt_layout
    }
}

pub fn aggregate(records: &[UnifiedRecord]) -> KpiSnapshot {
    let mut kpi = KpiSnapshot {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        if record.auto_gen.is_enabled() {
            kpi.auto_gen += 1;
        }

        *kpi.by_brand.entry(record.brand_label().to_string()).or_insert(0) += 1;
        *kpi.by_variety.entry(record.variety_label().to_string()).or_insert(0) += 1;
        *kpi.by_story.entry(record.story_label().to_string()).or_insert(0) += 1;

        for check in FieldCheck::CONTENT {
            if check.fails(record) {
                kpi.missing.bump(check);
            }
        }
    }

    kpi
}
