//! Errors surfaced by the control layer.

use thiserror::Error;

use dispatch_core::config::ConfigError;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop channel closed")]
    ChannelClosed,

    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl<T> From<std::sync::PoisonError<T>> for ControlError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ControlError::LockPoisoned
    }
}
