mod game;
mod term;

use std::{fs::File, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use gridsnake::Engine;
use tracing_subscriber::EnvFilter;

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Map file to play on instead of the default walled board
    map: Option<PathBuf>,

    /// Seed for food placement, for a repeatable game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut engine = match cli.seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::new(),
    };

    if let Some(path) = &cli.map {
        let loaded = engine.load_map(path)
            .with_context(|| format!("Failed to load map {}", path.display()))?;
        if !loaded {
            eprintln!("Could not read {}, playing the default board", path.display());
        }
    }

    let mut game = game::SnakeGame::new(engine, cli.map)?;
    game.initialize()?;

    // Restore the terminal whatever the game loop returned
    let result = match game.show_intro() {
        Ok(true) => game.play(),
        Ok(false) => Ok(()),
        Err(e) => Err(e),
    };
    game.restore()?;

    result
}
