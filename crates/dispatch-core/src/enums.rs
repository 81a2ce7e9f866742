//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability type of a response unit.
///
/// Serialized with the short German station codes used on the dispatch board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Löschfahrzeug: fire engine.
    #[serde(rename = "LF")]
    Engine,
    /// Drehleiter: aerial ladder.
    #[serde(rename = "DLK")]
    AerialLadder,
    /// Rüstwagen: heavy rescue truck.
    #[serde(rename = "RW")]
    RescueTruck,
    /// Einsatzleitwagen: command vehicle.
    #[serde(rename = "ELW")]
    CommandVehicle,
    /// Rettungswagen: ambulance.
    #[serde(rename = "RTW")]
    Ambulance,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Engine,
        UnitType::AerialLadder,
        UnitType::RescueTruck,
        UnitType::CommandVehicle,
        UnitType::Ambulance,
    ];

    /// Short station code, also used in callsigns.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Engine => "LF",
            Self::AerialLadder => "DLK",
            Self::RescueTruck => "RW",
            Self::CommandVehicle => "ELW",
            Self::Ambulance => "RTW",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unit lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// At the station, available for dispatch.
    #[default]
    Idle,
    /// Dispatched, driving to the incident.
    TravelingToScene,
    /// Working at the scene.
    OnScene,
    /// Driving back to the station.
    TravelingBack,
}

impl UnitStatus {
    /// Any status other than idle counts as committed.
    pub fn is_committed(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Phase of a unit's current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPhase {
    ToScene,
    AtScene,
    Returning,
}

/// Incident lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    /// Waiting for its requirements to be met.
    #[default]
    Open,
    /// All required units on scene, work progressing.
    InProgress,
    /// Work completed. Terminal.
    Resolved,
    /// Deadline passed before work started. Terminal.
    Escalated,
}

impl IncidentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Escalated)
    }

    /// Open or in progress; counts against the open-incident cap.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

/// Scored outcome of an incident's terminal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Resolved at or before the deadline.
    OnTime,
    /// Resolved after the deadline.
    Late,
    /// Escalated without work having started.
    Missed,
}

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimPhase {
    /// Freshly initialized or reset; clock stopped.
    #[default]
    Ready,
    Running,
    Paused,
}
