//! Orbit Defender entry point
//!
//! Runs the simulation headless: input comes from the built-in demo pilot or
//! a recorded script, frames are reported through the log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use orbit_defender::Game;
use orbit_defender::Settings;
use orbit_defender::platform::{DemoInput, InputSource, ScriptedInput};
use orbit_defender::renderer::LogSink;

#[derive(Parser)]
#[command(name = "orbit-defender")]
#[command(about = "Fixed-tick arcade shooter simulation (headless)")]
struct Args {
    /// JSON settings file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spawner RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Demo length in ticks before the pilot presses quit
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Replay a recorded input script instead of the demo pilot
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log a status line every N frames (0 = only the final frame)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("invalid settings file {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    log::info!("Orbit Defender starting (seed {})", settings.seed);

    let score = match &args.script {
        Some(path) => {
            let input = ScriptedInput::load(path)
                .with_context(|| format!("failed to load input script {}", path.display()))?;
            play(settings, input, args.report_every)?
        }
        None => play(settings, DemoInput::new(args.ticks), args.report_every)?,
    };

    println!("Final score: {score}");
    Ok(())
}

fn play(settings: Settings, input: impl InputSource, report_every: u64) -> Result<u64> {
    let mut game = Game::new(settings, input, LogSink::new(report_every))
        .context("failed to start the game")?;
    let summary = game.run().context("game loop failed")?;
    Ok(summary.score)
}
