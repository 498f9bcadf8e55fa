// skuflow-core/src/domain/record.rs

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One spreadsheet line: column name -> cell text. No type coercion happens at load time.
pub type RawRow = BTreeMap<String, String>;

/// Shared empty row returned on reference misses.
pub static EMPTY_ROW: RawRow = BTreeMap::new();

// --- AUTOGEN FLAG ---

/// The automation flag as read from a merged document.
///
/// Records produced by the merge stage always carry `Flag`. Documents written by
/// other tools may hold anything in that slot; the value is preserved as `Malformed`
/// so validation can report it instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoGen {
    Flag(bool),
    Malformed(Value),
}

impl AutoGen {
    /// Value used when the field is absent from a document.
    pub fn absent() -> Self {
        AutoGen::Malformed(Value::Null)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, AutoGen::Flag(true))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, AutoGen::Flag(_))
    }
}

impl Default for AutoGen {
    fn default() -> Self {
        AutoGen::Flag(false)
    }
}

impl From<bool> for AutoGen {
    fn from(value: bool) -> Self {
        AutoGen::Flag(value)
    }
}

/// Normalizes a heterogeneous truthy value into a boolean.
///
/// Native booleans are kept as-is; anything else is stringified, lowercased and
/// compared to `"true"`. Absent values are false.
pub fn normalize_auto_gen(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => normalize_auto_gen_text(Some(text)),
        Some(other) => other.to_string().to_lowercase() == "true",
        None => false,
    }
}

/// Text-cell variant of [`normalize_auto_gen`] used on sheet rows.
pub fn normalize_auto_gen_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| text.to_lowercase() == "true")
}

// --- CANONICAL RECORD ---

/// Reads a field of the canonical record, falling back to the type's default when the
/// document holds a value of the wrong shape (`"refImages": "a.png"`, `"Copy": null`, ...).
///
/// The record still loads and the completeness checks report the field as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CopyText {
    #[serde(deserialize_with = "lenient")]
    pub short: String,
    #[serde(deserialize_with = "lenient")]
    pub long: String,
    #[serde(deserialize_with = "lenient")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    #[serde(deserialize_with = "lenient")]
    pub image: String,
    #[serde(deserialize_with = "lenient")]
    pub layout: String,
    #[serde(deserialize_with = "lenient")]
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Assets {
    #[serde(deserialize_with = "lenient")]
    pub ref_images: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub brand_palette: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub logo_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub updated_at: Option<String>,
}

/// The canonical, flattened record consumed by validation, KPIs, the queue and the report.
///
/// Validity is never stored here; it is recomputed from the completeness checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct UnifiedRecord {
    #[serde(rename = "SKU", deserialize_with = "lenient")]
    pub sku: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub brand_code: String,
    #[serde(deserialize_with = "lenient")]
    pub brand_name: String,
    #[serde(deserialize_with = "lenient")]
    pub variety_code: String,
    #[serde(deserialize_with = "lenient")]
    pub variety_name: String,
    #[serde(deserialize_with = "lenient")]
    pub story_id: String,
    #[serde(deserialize_with = "lenient")]
    pub story_title: String,
    #[serde(default = "AutoGen::absent")]
    pub auto_gen: AutoGen,
    #[serde(deserialize_with = "lenient")]
    pub copy: CopyText,
    #[serde(deserialize_with = "lenient")]
    pub prompts: Prompts,
    #[serde(deserialize_with = "lenient")]
    pub assets: Assets,
    #[serde(deserialize_with = "lenient")]
    pub meta: Meta,
}

impl UnifiedRecord {
    pub fn brand_label(&self) -> &str {
        display_label(&self.brand_name, &self.brand_code)
    }

    pub fn variety_label(&self) -> &str {
        display_label(&self.variety_name, &self.variety_code)
    }

    pub fn story_label(&self) -> &str {
        display_label(&self.story_title, &self.story_id)
    }
}

/// Display name, falling back to the code when the name is empty.
fn display_label<'a>(name: &'a str, code: &'a str) -> &'a str {
    if name.is_empty() { code } else { name }
}

// --- LEGACY NESTED RECORD ---

pub const LEGACY_TITLE_KEY: &str = "상품명";
pub const LEGACY_BRAND_KEY: &str = "브랜드";
pub const LEGACY_VARIETY_KEY: &str = "품종";
pub const LEGACY_STORY_KEY: &str = "스토리";
pub const LEGACY_AUTO_GEN_KEY: &str = "AUTO_GEN";
pub const LEGACY_PRODUCT_KEY: &str = "상품";

/// Output of the merge engine: referenced rows embedded whole under localized keys.
///
/// `product` keeps the full source row so the canonical adapter can read copy,
/// prompt and asset columns. Documents from older tools omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MergedRecord {
    #[serde(rename = "SKU", default)]
    pub sku: String,
    #[serde(rename = "상품명", default)]
    pub title: String,
    #[serde(rename = "브랜드", default)]
    pub brand: RawRow,
    #[serde(rename = "품종", default)]
    pub variety: RawRow,
    #[serde(rename = "스토리", default)]
    pub story: RawRow,
    #[serde(
        rename = "AUTO_GEN",
        default,
        deserialize_with = "deserialize_truthy"
    )]
    pub auto_gen: bool,
    #[serde(rename = "상품", default, skip_serializing_if = "RawRow::is_empty")]
    pub product: RawRow,
}

impl MergedRecord {
    /// True when a JSON object carries the legacy nested keys rather than the canonical ones.
    pub fn looks_legacy(value: &Value) -> bool {
        value.as_object().is_some_and(|obj| {
            [LEGACY_BRAND_KEY, LEGACY_VARIETY_KEY, LEGACY_STORY_KEY, LEGACY_AUTO_GEN_KEY]
                .iter()
                .any(|key| obj.contains_key(*key))
        })
    }
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(normalize_auto_gen(value.as_ref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_truthy_variants() {
        for value in [json!(true), json!("true"), json!("TRUE"), json!("True")] {
            assert!(normalize_auto_gen(Some(&value)), "{value} should be true");
        }
        for value in [json!(false), json!("false"), json!(""), json!("0"), json!(1)] {
            assert!(!normalize_auto_gen(Some(&value)), "{value} should be false");
        }
        assert!(!normalize_auto_gen(None));
    }

    #[test]
    fn test_normalize_text_cells() {
        assert!(normalize_auto_gen_text(Some("tRuE")));
        assert!(!normalize_auto_gen_text(Some(" true")));
        assert!(!normalize_auto_gen_text(None));
    }

    #[test]
    fn test_unified_record_wire_keys() {
        let record = UnifiedRecord {
            sku: "A1".into(),
            brand_code: "B1".into(),
            auto_gen: AutoGen::Flag(true),
            assets: Assets {
                ref_images: vec!["img.png".into()],
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["SKU"], "A1");
        assert_eq!(value["BrandCode"], "B1");
        assert_eq!(value["AutoGen"], true);
        assert_eq!(value["Assets"]["refImages"][0], "img.png");
        assert!(value["Assets"].get("logoRef").is_none());
        assert!(value["Copy"]["keywords"].is_array());
    }

    #[test]
    fn test_missing_auto_gen_is_malformed() {
        let record: UnifiedRecord = serde_json::from_value(json!({ "SKU": "A1" })).unwrap();
        assert_eq!(record.auto_gen, AutoGen::Malformed(Value::Null));
        assert!(!record.auto_gen.is_enabled());

        let record: UnifiedRecord =
            serde_json::from_value(json!({ "SKU": "A1", "AutoGen": "true" })).unwrap();
        assert!(!record.auto_gen.is_boolean());
        assert!(!record.auto_gen.is_enabled());
    }

    #[test]
    fn test_labels_fall_back_to_codes() {
        let record = UnifiedRecord {
            brand_code: "B1".into(),
            variety_code: "V1".into(),
            variety_name: "Fuji".into(),
            ..Default::default()
        };
        assert_eq!(record.brand_label(), "B1");
        assert_eq!(record.variety_label(), "Fuji");
        assert_eq!(record.story_label(), "");
    }

    #[test]
    fn test_legacy_detection_and_flag() {
        let legacy = json!({ "SKU": "A1", "브랜드": {}, "AUTO_GEN": "TRUE" });
        assert!(MergedRecord::looks_legacy(&legacy));
        assert!(!MergedRecord::looks_legacy(&json!({ "SKU": "A1", "BrandCode": "B1" })));

        let merged: MergedRecord = serde_json::from_value(legacy).unwrap();
        assert!(merged.auto_gen);
        assert!(merged.product.is_empty());
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_to_defaults() {
        let record: UnifiedRecord = serde_json::from_value(json!({
            "SKU": 42,
            "BrandCode": "B1",
            "AutoGen": true,
            "Copy": null,
            "Prompts": { "image": ["not", "text"], "layout": "grid" },
            "Assets": { "refImages": "a.png", "brandPalette": ["#fff"], "logoRef": 7 },
            "Meta": { "Price": "cheap" }
        }))
        .unwrap();

        assert_eq!(record.sku, "");
        assert_eq!(record.brand_code, "B1");
        assert_eq!(record.copy, CopyText::default());
        assert_eq!(record.prompts.image, "");
        assert_eq!(record.prompts.layout, "grid");
        assert!(record.assets.ref_images.is_empty());
        assert_eq!(record.assets.brand_palette, vec!["#fff".to_string()]);
        assert_eq!(record.assets.logo_ref, None);
        assert_eq!(record.meta.price, None);
    }
}
