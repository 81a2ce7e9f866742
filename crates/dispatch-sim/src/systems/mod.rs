//! Per-tick systems that operate on the dispatch world.
//!
//! Systems are plain functions over `&mut DispatchWorld`. They hold no state
//! of their own. The engine calls them in a fixed order each tick.

pub mod arrivals;
pub mod incident_progress;
pub mod incident_spawner;
pub mod snapshot;
pub mod unit_release;
