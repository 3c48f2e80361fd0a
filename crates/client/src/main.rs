//! Headless battle simulator.
//!
//! Loads a player roster and an encounter, then runs the battle with the
//! [`autopilot::Autopilot`] at the menu until it terminates.
//!
//! ```bash
//! battle-sim --encounter meadow
//! battle-sim --encounter rival --seed 7 --json
//! RUST_LOG=battle_core=debug battle-sim --encounter path/to/cave.ron
//! ```

mod autopilot;
mod config;
mod logging;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::Result;
use battle_content::{ConfigLoader, ContentFactory, EncounterLoader, EncounterSpec, RosterLoader};
use battle_core::{BattlePhase, BattleSession, PcgRng};
use clap::Parser;

use crate::autopilot::Autopilot;
use crate::config::SimConfig;
use crate::summary::RunSummary;

/// Run an autopiloted monster battle
#[derive(Parser, Debug)]
#[command(name = "battle-sim")]
#[command(about = "Headless monster battle simulator", long_about = None)]
#[command(version)]
struct Args {
    /// Encounter name under `<data-dir>/encounters`, or a path to a RON file
    #[arg(short, long, default_value = "meadow")]
    encounter: String,

    /// Player roster RON file (default: `<data-dir>/player_roster.ron`)
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Battle config TOML file (default: `<data-dir>/config.toml`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for opponent decisions and wild monster state
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 0.05)]
    dt: f64,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let env = SimConfig::from_env();

    let log_file = args.log_file.clone().or(env.log_file.clone());
    let _guard = logging::setup_logging(log_file.as_deref())?;

    if !args.dt.is_finite() || args.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let factory = match args.data_dir.clone().or(env.data_dir.clone()) {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::debug!(data_dir = %factory.data_dir().display(), "content directory");

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    if let Some(seed) = args.seed.or(env.seed) {
        config.seed = seed;
    }

    let player = match &args.roster {
        Some(path) => RosterLoader::load(path)?,
        None => factory.load_player_roster()?,
    };
    let spec = load_encounter(&factory, &args.encounter)?;
    let opponents = spec.opponent_roster(&PcgRng, config.seed)?;

    tracing::info!(
        encounter = %args.encounter,
        seed = config.seed,
        player = player.len(),
        opponent = opponents.len(),
        "Starting battle"
    );

    let seed = config.seed;
    let mut session = BattleSession::new(player, opponents, spec.encounter, config);
    let autopilot = Autopilot;

    let mut ticks = 0u64;
    let mut events = 0usize;
    loop {
        let input = autopilot.next_input(&session.view());
        let phase = session.tick(args.dt, input);
        ticks += 1;

        for event in session.drain_events() {
            events += 1;
            tracing::info!(tick = ticks, "{event:?}");
        }

        if phase == BattlePhase::Terminated {
            break;
        }
        if ticks >= args.max_ticks {
            tracing::warn!(ticks, "tick limit reached, stopping");
            break;
        }
    }

    let final_view = session.view();
    let summary = RunSummary {
        encounter: args.encounter.clone(),
        seed,
        ticks,
        elapsed_secs: ticks as f64 * args.dt,
        events,
        outcome: session.finish(),
        final_view,
    };

    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        print!("{}", summary.to_text());
    }
    Ok(())
}

/// Resolves `encounter` as a file path when it names an existing file,
/// otherwise as a name inside the content directory.
fn load_encounter(factory: &ContentFactory, encounter: &str) -> Result<EncounterSpec> {
    let path = Path::new(encounter);
    if path.is_file() {
        EncounterLoader::load(path)
    } else {
        factory.load_encounter(encounter)
    }
}
