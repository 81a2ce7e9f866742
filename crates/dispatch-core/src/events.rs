//! Events emitted by the simulation for scoring and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{IncidentId, SimMillis, UnitId};

/// A state transition surfaced by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DispatchEvent {
    /// The generator put a new incident on the board.
    IncidentReported {
        incident_id: IncidentId,
        name: String,
        deadline_ms: SimMillis,
    },
    /// A unit left the station for an incident.
    UnitDispatched {
        unit_id: UnitId,
        unit_type: UnitType,
        incident_id: IncidentId,
    },
    /// A unit reached its incident. `attached` is false if the incident
    /// was gone or already closed by then.
    UnitArrived {
        unit_id: UnitId,
        incident_id: IncidentId,
        attached: bool,
    },
    /// Requirements met; work started.
    IncidentStarted { incident_id: IncidentId },
    /// Terminal transition. Emitted exactly once per incident.
    IncidentClosed {
        incident_id: IncidentId,
        outcome: Outcome,
    },
    /// An arrived unit was detached from an incident's roster.
    UnitWithdrawn {
        unit_id: UnitId,
        incident_id: IncidentId,
    },
    /// A unit started its drive back. `left_incident` names the open
    /// incident it was detached from, if any.
    UnitReturning {
        unit_id: UnitId,
        left_incident: Option<IncidentId>,
    },
    /// A unit is back at the station and idle.
    UnitReleased { unit_id: UnitId },
}
