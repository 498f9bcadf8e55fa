// skuflow-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use validator::Validate;

/// The four tabular sources the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Product,
    Brand,
    Variety,
    Story,
}

impl SheetKind {
    pub fn label(self) -> &'static str {
        match self {
            SheetKind::Product => "product master",
            SheetKind::Brand => "brand guide",
            SheetKind::Variety => "variety dictionary",
            SheetKind::Story => "story plot",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct PipelineConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "sheets-path", default = "default_sheets_path")]
    pub sheets_path: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "logs-path", default = "default_logs_path")]
    pub logs_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    #[validate(nested)]
    #[serde(default)]
    pub sheets: SheetFiles,

    #[validate(nested)]
    #[serde(default)]
    pub columns: ColumnMap,

    #[serde(default)]
    pub trigger: TriggerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: "skuflow".to_string(),
            version: default_version(),
            sheets_path: default_sheets_path(),
            target_path: default_target_path(),
            logs_path: default_logs_path(),
            clean_targets: default_clean_targets(),
            sheets: SheetFiles::default(),
            columns: ColumnMap::default(),
            trigger: TriggerConfig::default(),
        }
    }
}

/// File names of the four sheets inside `sheets-path`.
/// A `.json` extension selects the fetch step's JSON row format, anything else is read as CSV.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
pub struct SheetFiles {
    #[validate(length(min = 1))]
    pub product: String,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(length(min = 1))]
    pub variety: String,
    #[validate(length(min = 1))]
    pub story: String,
}

impl SheetFiles {
    pub fn file_for(&self, kind: SheetKind) -> &str {
        match kind {
            SheetKind::Product => &self.product,
            SheetKind::Brand => &self.brand,
            SheetKind::Variety => &self.variety,
            SheetKind::Story => &self.story,
        }
    }
}

impl Default for SheetFiles {
    fn default() -> Self {
        Self {
            product: "상품마스터.csv".to_string(),
            brand: "브랜드가이드.csv".to_string(),
            variety: "품종사전.csv".to_string(),
            story: "스토리플롯.csv".to_string(),
        }
    }
}

/// Column names read from the sheets. Defaults follow the product master headers.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default, rename_all = "kebab-case")]
pub struct ColumnMap {
    // Join keys (shared between the product master and the reference sheets)
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub brand_code: String,
    #[validate(length(min = 1))]
    pub variety_code: String,
    #[validate(length(min = 1))]
    pub story_id: String,

    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub auto_gen: String,

    // Reference sheet display columns
    #[validate(length(min = 1))]
    pub brand_name: String,
    #[validate(length(min = 1))]
    pub variety_name: String,
    #[validate(length(min = 1))]
    pub story_title: String,
    #[validate(length(min = 1))]
    pub brand_palette: String,

    // Product content columns
    #[validate(length(min = 1))]
    pub copy_short: String,
    #[validate(length(min = 1))]
    pub copy_long: String,
    #[validate(length(min = 1))]
    pub keywords: String,
    #[validate(length(min = 1))]
    pub prompt_image: String,
    #[validate(length(min = 1))]
    pub prompt_layout: String,
    #[validate(length(min = 1))]
    pub prompt_tone: String,
    #[validate(length(min = 1))]
    pub ref_images: String,
    #[validate(length(min = 1))]
    pub logo_ref: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub updated_at: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            sku: "SKU".to_string(),
            brand_code: "브랜드코드".to_string(),
            variety_code: "품종코드".to_string(),
            story_id: "스토리ID".to_string(),
            title: "상품명".to_string(),
            auto_gen: "AUTO_GEN".to_string(),
            brand_name: "BRAND_NAME".to_string(),
            variety_name: "VARIETY_NAME".to_string(),
            story_title: "STORY_TITLE".to_string(),
            brand_palette: "BRAND_PALETTE".to_string(),
            copy_short: "COPY_SHORT".to_string(),
            copy_long: "COPY_LONG".to_string(),
            keywords: "KEYWORDS".to_string(),
            prompt_image: "PROMPT_IMAGE".to_string(),
            prompt_layout: "PROMPT_LAYOUT".to_string(),
            prompt_tone: "PROMPT_TONE".to_string(),
            ref_images: "REF_IMAGES".to_string(),
            logo_ref: "LOGO_REF".to_string(),
            price: "PRICE".to_string(),
            updated_at: "UPDATED_AT".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct TriggerConfig {
    /// Name of the environment variable holding the shared trigger secret.
    pub token_env: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            token_env: "SKUFLOW_TRIGGER_TOKEN".to_string(),
        }
    }
}

/// Every file location of a run, resolved once from the project directory.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub sheets_dir: PathBuf,
    pub target_dir: PathBuf,
    pub merged_input: PathBuf,
    pub report_dir: PathBuf,
    pub report_html: PathBuf,
    pub report_json: PathBuf,
    pub queue_dir: PathBuf,
    pub queue: PathBuf,
    pub run_results: PathBuf,
    pub logs_dir: PathBuf,
    pub issue_log: PathBuf,
    pub run_lock: PathBuf,
}

impl ArtifactPaths {
    pub fn resolve(project_dir: &Path, config: &PipelineConfig) -> Self {
        let target_dir = project_dir.join(&config.target_path);
        let report_dir = target_dir.join("report");
        let queue_dir = target_dir.join("queues");
        let logs_dir = project_dir.join(&config.logs_path);

        Self {
            sheets_dir: project_dir.join(&config.sheets_path),
            merged_input: target_dir.join("grouped_input.json"),
            report_html: report_dir.join("data_overview.html"),
            report_json: report_dir.join("data_overview.json"),
            queue: queue_dir.join("render_queue.json"),
            run_results: target_dir.join("run_results.json"),
            issue_log: logs_dir.join("data_visual_check.jsonl"),
            run_lock: target_dir.join(".skuflow.lock"),
            target_dir,
            report_dir,
            queue_dir,
            logs_dir,
        }
    }

    pub fn sheet(&self, files: &SheetFiles, kind: SheetKind) -> PathBuf {
        self.sheets_dir.join(files.file_for(kind))
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_sheets_path() -> String {
    "data/sheets".to_string()
}
fn default_target_path() -> String {
    "dist".to_string()
}
fn default_logs_path() -> String {
    "logs".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["dist".to_string()]
}
