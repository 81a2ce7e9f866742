//! Dispatch board driver.
//!
//! Wires the headless engine to a game loop thread and a small control
//! surface, and hosts the autopilot and the `dispatch-run` session tools.

pub mod autopilot;
pub mod control;
pub mod error;
pub mod game_loop;
pub mod session;
pub mod state;
pub mod summary;

pub use dispatch_core as core;
pub use error::ControlError;
