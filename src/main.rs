//! Toposcope CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "toposcope")]
#[command(about = "Map graph topologies into 3D scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a scene file and write the renderer snapshot as JSON
    Render {
        /// Scene description (.toml, .json, .yaml)
        #[arg(short, long)]
        config: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report counts and component structure of a scene's graph
    Inspect {
        /// Scene description (.toml, .json, .yaml)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered JSON can be piped from stdout
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "toposcope={level},toposcope_core={level},toposcope_mappers={level}",
            level = log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Toposcope v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Render { config, output } => commands::render(config, output),
        Commands::Inspect { config } => commands::inspect(config),
        Commands::Version => {
            println!("Toposcope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
