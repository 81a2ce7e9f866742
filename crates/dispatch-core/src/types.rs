//! Fundamental identifier and simulation time types.

use serde::{Deserialize, Serialize};

/// Simulated milliseconds since the start of a session.
pub type SimMillis = u64;

/// Stable identifier of a unit in the station roster.
pub type UnitId = u32;

/// Identifier of an incident, unique within a session.
pub type IncidentId = u32;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks that advanced simulated time.
    pub tick: u64,
    /// Simulated time elapsed since start.
    pub elapsed_ms: SimMillis,
    /// Delta applied by the most recent tick (zero while paused).
    pub last_delta_ms: SimMillis,
}

impl SimTime {
    /// Advance by one tick of `delta_ms` simulated milliseconds.
    pub fn advance(&mut self, delta_ms: SimMillis) {
        self.tick += 1;
        self.elapsed_ms += delta_ms;
        self.last_delta_ms = delta_ms;
    }

    /// Elapsed simulated time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
