//! State shared between the control surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use dispatch_core::commands::PlayerCommand;
use dispatch_core::state::DispatchSnapshot;

/// Messages sent from the control layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared control state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`. The latest
/// snapshot is shared with the loop thread through an `Arc`.
pub struct AppState {
    /// `None` until `start_simulation` succeeds.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the loop thread after every tick.
    pub latest_snapshot: Arc<Mutex<Option<DispatchSnapshot>>>,
    pub running: Mutex<bool>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
        assert!(state.loop_handle.lock().unwrap().is_none());
    }
}
