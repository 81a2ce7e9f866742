//! Simulation engine for the dispatch board.
//!
//! Owns the unit pool, the incident set and the arrival queue, runs the
//! per-tick systems in a fixed order, and produces `DispatchSnapshot`s
//! for the presentation layer.

pub mod arrivals;
pub mod clock;
pub mod dispatch;
pub mod engine;
pub mod incidents;
pub mod pool;
pub mod scenario;
pub mod scoring;
pub mod systems;
pub mod world;

pub use dispatch_core as core;
pub use engine::{DispatchEngine, SimConfig};
