//! Simulation records: units, incidents and the static data they are built from.
//!
//! Records are plain data structs. Transitions live in `dispatch-sim`,
//! which owns the collections these records are stored in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{IncidentId, SimMillis, UnitId};

/// Roster entry used to build the unit pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub callsign: String,
    pub unit_type: UnitType,
}

/// Catalog entry an incident is materialized from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentTemplate {
    pub name: String,
    /// Required unit count per type. Every count must be > 0.
    pub requirements: BTreeMap<UnitType, u32>,
}

/// What a committed unit is currently bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub incident_id: IncidentId,
    pub phase: AssignmentPhase,
}

/// A response unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub callsign: String,
    pub unit_type: UnitType,
    pub status: UnitStatus,
    /// Instant the unit auto-releases to idle. `None` while idle.
    pub commit_until_ms: Option<SimMillis>,
    /// `None` while idle, and while committed to an incident it could not join.
    pub assignment: Option<Assignment>,
}

/// An incident on the dispatch board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub template_name: String,
    pub requirements: BTreeMap<UnitType, u32>,
    /// Units that have arrived on scene, per type, in arrival order.
    pub assigned: BTreeMap<UnitType, Vec<UnitId>>,
    /// Roster as it stood when the incident closed. Empty until then.
    pub responders: BTreeMap<UnitType, Vec<UnitId>>,
    pub status: IncidentStatus,
    pub created_at_ms: SimMillis,
    pub deadline_ms: SimMillis,
    pub started_at_ms: Option<SimMillis>,
    /// Fraction of work done, in [0, 1].
    pub progress: f64,
    /// Work time accrued while in progress; `progress` is derived from it.
    pub worked_ms: SimMillis,
    pub last_update_ms: SimMillis,
    /// Set once, on the terminal transition.
    pub outcome: Option<Outcome>,
    pub closed_at_ms: Option<SimMillis>,
    pub last_message: String,
}
