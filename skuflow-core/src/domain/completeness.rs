// skuflow-core/src/domain/completeness.rs
//
// The single set of field-completeness predicates. The validator itemizes them,
// the KPI aggregator counts them, the queue scores the critical-asset subset.

use crate::domain::record::UnifiedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCheck {
    Sku,
    AutoGenType,
    BrandCode,
    VarietyCode,
    StoryId,
    CopyShort,
    CopyLong,
    PromptImage,
    PromptLayout,
    RefImages,
    BrandPalette,
    LogoRef,
}

impl FieldCheck {
    /// Evaluation order. Issue lists follow it exactly.
    pub const ALL: [FieldCheck; 12] = [
        FieldCheck::Sku,
        FieldCheck::AutoGenType,
        FieldCheck::BrandCode,
        FieldCheck::VarietyCode,
        FieldCheck::StoryId,
        FieldCheck::CopyShort,
        FieldCheck::CopyLong,
        FieldCheck::PromptImage,
        FieldCheck::PromptLayout,
        FieldCheck::RefImages,
        FieldCheck::BrandPalette,
        FieldCheck::LogoRef,
    ];

    /// Content checks tallied in the KPI snapshot.
    pub const CONTENT: [FieldCheck; 7] = [
        FieldCheck::CopyShort,
        FieldCheck::CopyLong,
        FieldCheck::PromptImage,
        FieldCheck::PromptLayout,
        FieldCheck::RefImages,
        FieldCheck::BrandPalette,
        FieldCheck::LogoRef,
    ];

    /// Assets whose absence lowers render priority.
    pub const CRITICAL_ASSETS: [FieldCheck; 3] = [
        FieldCheck::RefImages,
        FieldCheck::BrandPalette,
        FieldCheck::LogoRef,
    ];

    pub fn issue(self) -> &'static str {
        match self {
            FieldCheck::Sku => "SKU missing",
            FieldCheck::AutoGenType => "AutoGen must be boolean",
            FieldCheck::BrandCode => "BrandCode missing",
            FieldCheck::VarietyCode => "VarietyCode missing",
            FieldCheck::StoryId => "StoryId missing",
            FieldCheck::CopyShort => "Copy.short missing",
            FieldCheck::CopyLong => "Copy.long missing",
            FieldCheck::PromptImage => "Prompts.image missing",
            FieldCheck::PromptLayout => "Prompts.layout missing",
            FieldCheck::RefImages => "Assets.refImages missing",
            FieldCheck::BrandPalette => "Assets.brandPalette missing",
            FieldCheck::LogoRef => "Assets.logoRef missing",
        }
    }

    /// True when the record fails this check.
    pub fn fails(self, record: &UnifiedRecord) -> bool {
        match self {
            FieldCheck::Sku => record.sku.is_empty(),
            FieldCheck::AutoGenType => !record.auto_gen.is_boolean(),
            FieldCheck::BrandCode => record.brand_code.is_empty(),
            FieldCheck::VarietyCode => record.variety_code.is_empty(),
            FieldCheck::StoryId => record.story_id.is_empty(),
            FieldCheck::CopyShort => blank(&record.copy.short),
            FieldCheck::CopyLong => blank(&record.copy.long),
            FieldCheck::PromptImage => blank(&record.prompts.image),
            FieldCheck::PromptLayout => blank(&record.prompts.layout),
            FieldCheck::RefImages => record.assets.ref_images.is_empty(),
            FieldCheck::BrandPalette => record.assets.brand_palette.is_empty(),
            FieldCheck::LogoRef => record.assets.logo_ref.as_deref().is_none_or(str::is_empty),
        }
    }
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}
