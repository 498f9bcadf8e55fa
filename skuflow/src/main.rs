// skuflow/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug skuflow run ... to see the details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir),
        Commands::Merge { project_dir } => commands::merge::execute(project_dir),
        Commands::Render { project_dir } => commands::render::execute(project_dir),
        Commands::Stats { project_dir } => commands::stats::execute(project_dir),
        Commands::Trigger { project_dir, token } => commands::trigger::execute(project_dir, token),
        Commands::Health => commands::trigger::health(),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
