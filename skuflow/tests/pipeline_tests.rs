use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const TRIGGER_SECRET: &str = "test-secret";

const PRODUCTS: &str = "\
SKU,상품명,브랜드코드,품종코드,스토리ID,AUTO_GEN,COPY_SHORT,COPY_LONG,PROMPT_IMAGE,PROMPT_LAYOUT,REF_IMAGES,LOGO_REF
A1,<script>alert(1)</script>,B1,V1,S1,TRUE,short,long,img,grid,a.png,logo.svg
A2,Pear,B1,V1,S1,true,short,long,img,hero,,
A3,Plum,B2,V2,S1,false,short,long,img,grid,c.png,logo.svg
A4,Fig,B2,V1,,TRUE,,,,,,
";
const BRANDS: &str = "브랜드코드,BRAND_NAME,BRAND_PALETTE\nB1,BrandX,#fff|#000\nB2,BrandY,\n";
const VARIETIES: &str = "품종코드,VARIETY_NAME\nV1,Fuji\nV2,Gala\n";
const STORIES: &str = "스토리ID,STORY_TITLE\nS1,Harvest\n";

/// A throwaway project: config file plus the four sheets.
struct SkuflowTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl SkuflowTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().join("catalog");
        let sheets = root.join("data/sheets");
        fs::create_dir_all(&sheets)?;

        fs::write(root.join("skuflow.yaml"), "name: catalog\nversion: 1.0.0\n")?;
        fs::write(sheets.join("상품마스터.csv"), PRODUCTS)?;
        fs::write(sheets.join("브랜드가이드.csv"), BRANDS)?;
        fs::write(sheets.join("품종사전.csv"), VARIETIES)?;
        fs::write(sheets.join("스토리플롯.csv"), STORIES)?;

        Ok(Self { _tmp: tmp, root })
    }

    fn skuflow(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skuflow"));
        cmd.current_dir(&self.root);
        cmd.env("SKUFLOW_TRIGGER_TOKEN", TRIGGER_SECRET);
        cmd
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn read_json(&self, rel: &str) -> Result<Value> {
        let path = self.path(rel);
        let content =
            fs::read_to_string(&path).with_context(|| format!("{} not generated", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn queue_summary(queue: &Value) -> String {
    queue["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| format!("{}={}", item["SKU"].as_str().unwrap_or("?"), item["priority"]))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

#[test]
fn test_run_produces_every_artifact() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    for artifact in [
        "dist/grouped_input.json",
        "dist/report/data_overview.html",
        "dist/report/data_overview.json",
        "dist/queues/render_queue.json",
        "dist/run_results.json",
        "logs/data_visual_check.jsonl",
    ] {
        assert!(env.path(artifact).exists(), "{artifact} missing");
    }

    let merged = env.read_json("dist/grouped_input.json")?;
    assert_eq!(merged["source"], "sheets|merge");
    assert_eq!(merged["records"].as_array().map(Vec::len), Some(4));

    let snapshot = env.read_json("dist/report/data_overview.json")?;
    assert_eq!(snapshot["kpi"]["total"], 4);
    assert_eq!(snapshot["kpi"]["autoGen"], 3);
    assert_eq!(snapshot["kpi"]["byBrand"]["BrandX"], 2);
    assert_eq!(snapshot["issueCount"], 3);

    // AutoGen only, highest priority first
    let queue = env.read_json("dist/queues/render_queue.json")?;
    insta::assert_snapshot!(queue_summary(&queue), @"A1=100 A2=60 A4=40");

    let log = fs::read_to_string(env.path("logs/data_visual_check.jsonl"))?;
    assert_eq!(log.lines().count(), 3);
    Ok(())
}

#[test]
fn test_report_escapes_markup() -> Result<()> {
    let env = SkuflowTestEnv::new()?;
    env.skuflow().arg("run").assert().success();

    let html = fs::read_to_string(env.path("dist/report/data_overview.html"))?;
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    Ok(())
}

#[test]
fn test_rerun_is_deterministic() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow().arg("run").assert().success();
    let first_kpi = env.read_json("dist/report/data_overview.json")?["kpi"].clone();
    let first_queue = env.read_json("dist/queues/render_queue.json")?["items"].clone();

    env.skuflow().arg("run").assert().success();
    let second_kpi = env.read_json("dist/report/data_overview.json")?["kpi"].clone();
    let second_queue = env.read_json("dist/queues/render_queue.json")?["items"].clone();

    assert_eq!(
        serde_json::to_string(&first_kpi)?,
        serde_json::to_string(&second_kpi)?
    );
    assert_eq!(first_queue, second_queue);

    // the issue log is appended, never rewritten
    let log = fs::read_to_string(env.path("logs/data_visual_check.jsonl"))?;
    assert_eq!(log.lines().count(), 6);
    Ok(())
}

#[test]
fn test_missing_sheet_fails_and_names_the_file() -> Result<()> {
    let env = SkuflowTestEnv::new()?;
    fs::remove_file(env.path("data/sheets/품종사전.csv"))?;

    env.skuflow()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("품종사전.csv"));

    assert!(!env.path("dist/report/data_overview.html").exists());
    Ok(())
}

#[test]
fn test_render_requires_merged_input() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("grouped_input.json"));
    Ok(())
}

#[test]
fn test_merge_then_render_and_stats() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow().arg("merge").assert().success();
    assert!(!env.path("dist/report").exists());

    env.skuflow().arg("render").assert().success();
    assert!(env.path("dist/queues/render_queue.json").exists());

    env.skuflow()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total records").and(predicate::str::contains("BrandY")));
    Ok(())
}

#[test]
fn test_trigger_rejects_wrong_token() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .args(["trigger", "--token", "wrong"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unauthorized"));

    assert!(!env.path("dist/grouped_input.json").exists());
    Ok(())
}

#[test]
fn test_trigger_runs_pipeline() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .args(["trigger", "--token", TRIGGER_SECRET])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline complete"));

    assert!(env.path("dist/report/data_overview.html").exists());
    // lock released after the run
    env.skuflow()
        .args(["trigger", "--token", TRIGGER_SECRET])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_trigger_without_secret_is_a_config_error() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .env_remove("SKUFLOW_TRIGGER_TOKEN")
        .args(["trigger", "--token", TRIGGER_SECRET])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SKUFLOW_TRIGGER_TOKEN"));
    Ok(())
}

#[test]
fn test_health() -> Result<()> {
    let env = SkuflowTestEnv::new()?;

    env.skuflow()
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ok":true"#));
    Ok(())
}

#[test]
fn test_clean_removes_artifacts() -> Result<()> {
    let env = SkuflowTestEnv::new()?;
    env.skuflow().arg("run").assert().success();

    env.skuflow().arg("clean").assert().success();

    assert!(!env.path("dist").exists());
    // the issue log lives outside the artifact directory
    assert!(env.path("logs/data_visual_check.jsonl").exists());
    Ok(())
}
