// skuflow/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skuflow")]
#[command(about = "Sheet merge, completeness report and render queue for product catalogs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the full pipeline (sheets -> merged records -> report + queue)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔗 Joins the four sheets by key and writes the merged document
    Merge {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📊 Validates the merged document and writes the report, queue and issue log
    Render {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📋 Prints the KPI summary of the current merged document
    Stats {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔐 Authenticated trigger: runs the pipeline if the token matches the shared secret
    Trigger {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Shared secret presented by the caller
        #[arg(long, env = "SKUFLOW_TOKEN")]
        token: Option<String>,
    },

    /// 💓 Liveness probe
    Health,

    /// 🧹 Cleans build artifacts (dist/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
