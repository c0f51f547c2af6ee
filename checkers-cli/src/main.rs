//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the game server
//! - play: Run AI self-play games
//! - analyze: Evaluate a saved board

mod analyze;
mod play;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_core::EngineConfig;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers rules engine, minimax AI and game server")]
struct Cli {
    /// Fixed seed for AI tie-breaking
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Engine configuration JSON file (depth, heuristics, bonuses)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve(server::ServerArgs),
    /// Play AI against itself
    Play(play::PlayArgs),
    /// Evaluate a board and show the AI's choice
    Analyze(analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let engine = load_engine_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Serve(args) => server::run(args, engine),
        Commands::Play(args) => play::run(args, engine),
        Commands::Analyze(args) => analyze::run(args, engine),
    }
}

/// Engine settings from `--config`, with `--seed` taking precedence
fn load_engine_config(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load engine config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
