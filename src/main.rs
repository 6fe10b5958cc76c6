//! Quincy Pong entry point
//!
//! Runs the fixed-rate loop headless: input comes from an optional script,
//! audio cues go to the log, and the score line is printed whenever it changes.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quincy_pong::Settings;
use quincy_pong::audio::LogAudio;
use quincy_pong::game::{Game, TextRenderer};
use quincy_pong::input::{InputSource, NoInput, ScriptedInput};

#[derive(Parser, Debug)]
#[command(name = "quincy-pong")]
#[command(about = "Run a headless two-paddle Pong session")]
struct Args {
    /// JSON settings file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed used for serve angles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// JSON input script: [{ "tick": n, "event": { "Pressed": "A" } }, ...]
    #[arg(long)]
    script: Option<PathBuf>,

    /// Pace the loop at the configured tick rate
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Quincy Pong starting...");

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let input: Box<dyn InputSource> = match &args.script {
        Some(path) => Box::new(
            ScriptedInput::load(path)
                .with_context(|| format!("loading input script {}", path.display()))?,
        ),
        None => Box::new(NoInput),
    };

    let audio = LogAudio::new(&settings);
    let renderer = TextRenderer::new(io::stdout().lock());
    let mut game =
        Game::new(&settings, input, audio, renderer).context("invalid game configuration")?;

    let summary = game
        .run(Some(args.ticks), args.realtime)
        .context("writing frame output")?;

    println!();
    println!("=== FINAL SCORE ===");
    println!("  Player 1:     {}", summary.player1);
    println!("  Player 2:     {}", summary.player2);
    println!("  Ticks:        {}", summary.ticks);
    println!("  Paddle hits:  {}", summary.paddle_hits);
    Ok(())
}
