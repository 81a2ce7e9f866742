//! Dispatch snapshot: the complete visible state handed to the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::Assignment;
use crate::enums::*;
use crate::events::DispatchEvent;
use crate::types::{IncidentId, SimMillis, SimTime, UnitId};

/// Complete read model, rebuilt from engine state after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub units: Vec<UnitView>,
    pub incidents: Vec<IncidentView>,
    pub station: StationView,
    /// Open plus in-progress incidents.
    pub open_incidents: u32,
    pub max_open_incidents: u32,
    pub score: ScoreView,
    /// Events produced since the previous snapshot.
    pub events: Vec<DispatchEvent>,
}

/// A unit on the station board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub callsign: String,
    pub unit_type: UnitType,
    pub status: UnitStatus,
    /// Time until the unit is idle again (0 when idle).
    pub remaining_commitment_ms: SimMillis,
    pub assignment: Option<Assignment>,
}

/// An incident card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentView {
    pub id: IncidentId,
    pub name: String,
    pub requirements: BTreeMap<UnitType, u32>,
    /// Arrived units per required type.
    pub assigned_counts: BTreeMap<UnitType, u32>,
    pub assigned_units: BTreeMap<UnitType, Vec<UnitId>>,
    /// Units that were on scene when the incident closed.
    pub responders: BTreeMap<UnitType, Vec<UnitId>>,
    /// Dispatched units per required type that have not arrived yet.
    pub en_route_counts: BTreeMap<UnitType, u32>,
    pub requirements_met: bool,
    pub status: IncidentStatus,
    pub progress: f64,
    pub created_at_ms: SimMillis,
    pub deadline_ms: SimMillis,
    /// Time left until the deadline, clamped at zero.
    pub deadline_remaining_ms: SimMillis,
    pub started_at_ms: Option<SimMillis>,
    pub outcome: Option<Outcome>,
    pub last_message: String,
}

/// Station summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationView {
    pub ready: u32,
    pub committed: u32,
    pub total: u32,
    /// Idle units per type.
    pub available_by_type: BTreeMap<UnitType, u32>,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub total: i64,
    pub dispatches: u32,
    pub resolved_on_time: u32,
    pub resolved_late: u32,
    pub escalated: u32,
}
