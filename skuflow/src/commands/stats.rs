// skuflow/src/commands/stats.rs
//
// USE CASE: Print the KPI summary of the current merged document.

use std::collections::BTreeMap;
use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use skuflow_core::application::{Report, load_merged_records};
use skuflow_core::domain::kpi::KpiSnapshot;

use super::load_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, paths) = load_project(&project_dir)?;

    let records = match load_merged_records(&paths.merged_input, &config.columns) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("❌ Cannot read merged document: {}", e);
            eprintln!("👉 Have you run 'skuflow merge'?");
            std::process::exit(1);
        }
    };

    let report = Report::build(&records);
    println!("{}", kpi_table(&report.kpi, report.issues.len()));

    for (title, counts) in [
        ("Brand", &report.kpi.by_brand),
        ("Variety", &report.kpi.by_variety),
        ("Story", &report.kpi.by_story),
    ] {
        println!("{}", distribution_table(title, counts));
    }

    Ok(())
}

fn kpi_table(kpi: &KpiSnapshot, issue_count: usize) -> Table {
    let mut table = styled_table(["Metric", "Count"]);
    let missing = &kpi.missing;

    let rows: [(&str, usize); 12] = [
        ("Total records", kpi.total),
        ("AUTO_GEN targets", kpi.auto_gen),
        ("Records with issues", issue_count),
        ("Missing Assets.refImages", missing.ref_images),
        ("Missing Assets.brandPalette", missing.brand_palette),
        ("Missing Assets.logoRef", missing.logo_ref),
        ("Missing Copy.short", missing.copy_short),
        ("Missing Copy.long", missing.copy_long),
        ("Missing Prompts.image", missing.prompt_image),
        ("Missing Prompts.layout", missing.prompt_layout),
        ("Missing assets (total)", missing.assets()),
        ("Missing copy/prompts (total)", missing.copy_and_prompts()),
    ];

    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, label.starts_with("Missing"))]);
    }
    table
}

fn distribution_table(title: &str, counts: &BTreeMap<String, usize>) -> Table {
    let mut table = styled_table([title, "Count"]);
    for (label, count) in counts {
        let label = if label.is_empty() { "(empty)" } else { label };
        table.add_row(vec![Cell::new(label), count_cell(*count, false)]);
    }
    table
}

fn styled_table(headers: [&str; 2]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn count_cell(count: usize, highlight: bool) -> Cell {
    let cell = Cell::new(count);
    if highlight && count > 0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}
