//! Player commands sent from the presentation layer to the simulation.
//!
//! Invalid commands are never errors: the engine ignores them, the same way
//! a dispatch board disables buttons for actions that cannot be taken.

use serde::{Deserialize, Serialize};

use crate::enums::UnitType;
use crate::types::{IncidentId, UnitId};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Start or resume the clock.
    Start,
    /// Pause the clock.
    Pause,
    /// Stop the clock and restore the initial station state.
    Reset,

    // --- Dispatch ---
    /// Send the next idle unit of `unit_type` to an incident.
    Assign {
        incident_id: IncidentId,
        unit_type: UnitType,
    },
    /// Withdraw an arrived unit from an incident that has not started work.
    Unassign {
        incident_id: IncidentId,
        unit_type: UnitType,
        unit_id: UnitId,
    },
}
