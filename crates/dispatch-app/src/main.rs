use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dispatch_app::control;
use dispatch_app::game_loop::{LoopSettings, Pacing};
use dispatch_app::session::{self, SessionPlan};
use dispatch_app::state::AppState;
use dispatch_app::summary::SessionSummary;
use dispatch_core::commands::PlayerCommand;
use dispatch_core::config::DispatchConfig;
use dispatch_core::constants::{DEFAULT_SEED, TICK_MS};
use dispatch_core::state::DispatchSnapshot;
use dispatch_core::types::SimMillis;
use dispatch_sim::engine::SimConfig;

/// Run a dispatch board session and print a JSON summary.
#[derive(Debug, Parser)]
#[command(name = "dispatch-run", version)]
struct Args {
    /// JSON file overriding timing, capacity and point values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Simulated session length in seconds.
    #[arg(long, default_value_t = 300)]
    duration_secs: u64,

    /// Simulated milliseconds per tick in headless mode.
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: SimMillis,

    /// Run on the game loop thread against the wall clock.
    #[arg(long)]
    realtime: bool,

    /// Let the autopilot dispatch units.
    #[arg(long)]
    autopilot: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let dispatch = match &args.config {
        Some(path) => DispatchConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    let config = SimConfig {
        seed: args.seed,
        dispatch,
        ..Default::default()
    };
    let duration_ms = args.duration_secs * 1_000;

    let snapshot = if args.realtime {
        run_realtime(config, duration_ms, args.autopilot)?
    } else {
        let plan = SessionPlan {
            duration_ms,
            tick_ms: args.tick_ms,
            autopilot: args.autopilot,
        };
        session::run_headless(config, plan).context("starting headless session")?
    };

    let summary = SessionSummary::from_snapshot(args.seed, &snapshot);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_realtime(
    config: SimConfig,
    duration_ms: SimMillis,
    autopilot: bool,
) -> Result<DispatchSnapshot> {
    let state = AppState::new();
    let settings = LoopSettings {
        pacing: Pacing::Realtime,
        autopilot,
    };
    control::start_simulation(&state, config, settings)?;
    control::send_command(&state, PlayerCommand::Start)?;

    loop {
        std::thread::sleep(Duration::from_millis(250));
        let elapsed = control::get_snapshot(&state)?.map_or(0, |s| s.time.elapsed_ms);
        if elapsed >= duration_ms {
            break;
        }
    }

    control::stop_simulation(&state)?;
    let snapshot =
        control::get_snapshot(&state)?.context("game loop never published a snapshot")?;
    info!(
        elapsed_secs = snapshot.time.elapsed_secs(),
        "realtime session finished"
    );
    Ok(snapshot)
}
