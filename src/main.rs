//! Brickout headless runner
//!
//! Plays a run without a window: the paddle is driven by the autopilot (or
//! held still), notifications go to the log, and a summary is printed at the end.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use brickout::consts::{LEVEL_COUNT, TICKS_PER_SECOND};
use brickout::{FixedStepper, Game, LogPresenter, ReactivationPolicy, Settings};

/// Settings picked up from the working directory when `--settings` is not given
const DEFAULT_SETTINGS_PATH: &str = "brickout.json";

#[derive(Parser, Debug)]
#[command(about = "Run a Brickout game headlessly", version)]
struct Args {
    /// JSON settings file (missing fields use defaults). Without it,
    /// `brickout.json` is used if present.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the run seed
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 60 * 60 * TICKS_PER_SECOND)]
    ticks: u64,
    /// Override the first level (1..=30)
    #[arg(long)]
    start_level: Option<u32>,
    /// Picking up an active effect: `refresh` or `ignore`
    #[arg(long)]
    reactivation: Option<String>,
    /// Drive the game through the frame accumulator at this frame time
    /// instead of one tick per step
    #[arg(long)]
    frame_ms: Option<f32>,
    /// Let the paddle play by itself
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    autopilot: bool,
    /// Print the final game state as JSON
    #[arg(long)]
    dump: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Brickout (headless) starting...");

    let mut settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::load_or_default(DEFAULT_SETTINGS_PATH).0,
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(level) = args.start_level {
        if !(1..=LEVEL_COUNT).contains(&level) {
            bail!("--start-level must be within 1..={LEVEL_COUNT}, got {level}");
        }
        settings.start_level = level;
    }
    if let Some(name) = &args.reactivation {
        settings.reactivation = ReactivationPolicy::from_str(name)
            .with_context(|| format!("unknown --reactivation {name:?}"))?;
    }
    log::info!("Re-activation policy: {}", settings.reactivation.as_str());

    let mut presenter = LogPresenter::default();
    let mut game = Game::new(settings);
    game.set_autopilot(args.autopilot);
    game.start(&mut presenter);
    let ticks = match args.frame_ms {
        Some(frame_ms) => {
            if frame_ms <= 0.0 {
                bail!("--frame-ms must be > 0, got {frame_ms}");
            }
            let mut stepper = FixedStepper::new();
            let mut ticks = 0;
            while ticks < args.ticks && !game.is_over() {
                ticks += u64::from(stepper.advance(&mut game, frame_ms / 1000.0, &mut presenter));
            }
            ticks
        }
        None => game.run(args.ticks, &mut presenter),
    };

    let state = game.state();
    println!(
        "{:?} after {ticks} ticks ({:.1}s): level {}/{LEVEL_COUNT}, score {}, lives {}",
        state.phase,
        ticks as f64 / TICKS_PER_SECOND as f64,
        state.level,
        state.score,
        state.lives
    );
    if args.dump {
        println!("{}", serde_json::to_string_pretty(state)?);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner in the browser
}
