//! Game loop thread: owns the engine, ticks it at a fixed rate and publishes
//! snapshots.
//!
//! Commands arrive over an `mpsc` channel and are the only way to reach the
//! engine. The latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use dispatch_core::constants::TICK_RATE;
use dispatch_core::enums::SimPhase;
use dispatch_core::state::DispatchSnapshot;
use dispatch_core::types::SimMillis;
use dispatch_sim::engine::DispatchEngine;

use crate::autopilot;
use crate::state::GameLoopCommand;

/// Wall time between two ticks.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Feed the measured wall-clock time since the previous tick.
    Realtime,
    /// Feed a fixed simulated delta per tick, regardless of wall time.
    Fixed { delta_ms: SimMillis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    pub pacing: Pacing,
    /// Let the autopilot queue assignments after every tick.
    pub autopilot: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            pacing: Pacing::Realtime,
            autopilot: false,
        }
    }
}

/// Spawn the game loop thread around `engine`.
///
/// Returns the command sender for the control layer and the thread handle.
pub fn spawn_game_loop(
    engine: DispatchEngine,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<DispatchSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("dispatch-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, settings, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Runs until a `Shutdown` command or channel disconnect.
fn run_game_loop(
    mut engine: DispatchEngine,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<DispatchSnapshot>>,
) {
    let started = Instant::now();
    let mut fed_ms: SimMillis = 0;
    let mut next_tick_time = started;

    loop {
        // 1. Drain all pending commands
        if drain_commands(&mut engine, &cmd_rx) {
            debug!("game loop shutting down");
            return;
        }

        // 2. Advance one tick (the engine freezes time while paused)
        let delta = match settings.pacing {
            Pacing::Realtime => {
                let total = started.elapsed().as_millis() as SimMillis;
                let delta = total - fed_ms;
                fed_ms = total;
                delta
            }
            Pacing::Fixed { delta_ms } => delta_ms,
        };
        let snapshot = engine.tick(delta);

        // 3. Autopilot reacts to what the board shows now
        if settings.autopilot && engine.phase() == SimPhase::Running {
            engine.queue_commands(autopilot::plan(&snapshot));
        }

        // 4. Store latest snapshot for polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => {
                warn!("snapshot lock poisoned, stopping game loop");
                return;
            }
        }

        // 5. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: skip ahead rather than catch up
            next_tick_time = now;
        }
    }
}

/// Queue everything waiting on the channel. Returns true on shutdown.
fn drain_commands(
    engine: &mut DispatchEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return true,
            Err(mpsc::TryRecvError::Empty) => return false,
            Err(mpsc::TryRecvError::Disconnected) => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::commands::PlayerCommand;
    use dispatch_sim::engine::SimConfig;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Start))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Start)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_at_shutdown() {
        let mut engine = DispatchEngine::new(SimConfig::default());
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Start))
            .unwrap();
        assert!(!drain_commands(&mut engine, &rx));
        assert_eq!(engine.tick(0).phase, SimPhase::Running);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(drain_commands(&mut engine, &rx));
        drop(tx);
        assert!(drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_fixed_pacing_loop_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let engine = DispatchEngine::new(SimConfig::default());
        let settings = LoopSettings {
            pacing: Pacing::Fixed { delta_ms: 1_000 },
            autopilot: true,
        };
        let (tx, handle) = spawn_game_loop(engine, settings, latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Start))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let elapsed = latest
                .lock()
                .unwrap()
                .as_ref()
                .map_or(0, |s: &DispatchSnapshot| s.time.elapsed_ms);
            if elapsed >= 10_000 || Instant::now() > deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.phase, SimPhase::Running);
        assert!(snap.time.elapsed_ms >= 10_000);
        assert!(snap.score.dispatches > 0);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 30Hz = 33.333ms per tick
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
