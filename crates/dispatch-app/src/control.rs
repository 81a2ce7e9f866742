//! Control surface for a running session.
//!
//! These functions bridge a caller (CLI, UI shell, tests) to the game loop
//! thread. They never touch the engine directly.

use tracing::info;

use dispatch_core::commands::PlayerCommand;
use dispatch_core::state::DispatchSnapshot;
use dispatch_sim::engine::{DispatchEngine, SimConfig};

use crate::error::ControlError;
use crate::game_loop::{self, LoopSettings};
use crate::state::{AppState, GameLoopCommand};

/// Validate `config`, build the engine and spawn the game loop thread.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
    settings: LoopSettings,
) -> Result<(), ControlError> {
    let mut running = state.running.lock()?;
    if *running {
        return Err(ControlError::AlreadyRunning);
    }

    let seed = config.seed;
    let engine = DispatchEngine::try_new(config)?;
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(engine, settings, state.latest_snapshot.clone())
            .map_err(ControlError::Spawn)?;

    *state.command_tx.lock()? = Some(cmd_tx);
    *state.loop_handle.lock()? = Some(handle);
    *running = true;

    info!(seed, ?settings, "game loop started");
    Ok(())
}

/// Forward a player command to the game loop.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| ControlError::ChannelClosed),
        None => Err(ControlError::NotStarted),
    }
}

/// The snapshot published by the most recent tick, if any.
pub fn get_snapshot(state: &AppState) -> Result<Option<DispatchSnapshot>, ControlError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Shut the loop down and wait for its thread. The last snapshot stays
/// available.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let mut running = state.running.lock()?;
    if !*running {
        return Err(ControlError::NotStarted);
    }

    if let Some(tx) = state.command_tx.lock()?.take() {
        // A loop that already exited has dropped its receiver.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_handle.lock()?.take() {
        handle.join().map_err(|_| ControlError::ChannelClosed)?;
    }
    *running = false;

    info!("game loop stopped");
    Ok(())
}
