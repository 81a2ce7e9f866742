//! End-of-session summary printed by `dispatch-run`.

use serde::Serialize;

use dispatch_core::enums::IncidentStatus;
use dispatch_core::state::{DispatchSnapshot, ScoreView};
use dispatch_core::types::SimMillis;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncidentTally {
    pub reported: u32,
    pub open: u32,
    pub in_progress: u32,
    pub resolved: u32,
    pub escalated: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub simulated_ms: SimMillis,
    pub ticks: u64,
    pub score: ScoreView,
    pub incidents: IncidentTally,
    pub units_committed: u32,
}

impl SessionSummary {
    pub fn from_snapshot(seed: u64, snapshot: &DispatchSnapshot) -> Self {
        let mut incidents = IncidentTally::default();
        for incident in &snapshot.incidents {
            incidents.reported += 1;
            match incident.status {
                IncidentStatus::Open => incidents.open += 1,
                IncidentStatus::InProgress => incidents.in_progress += 1,
                IncidentStatus::Resolved => incidents.resolved += 1,
                IncidentStatus::Escalated => incidents.escalated += 1,
            }
        }

        Self {
            seed,
            simulated_ms: snapshot.time.elapsed_ms,
            ticks: snapshot.time.tick,
            score: snapshot.score.clone(),
            incidents,
            units_committed: snapshot.station.committed,
        }
    }
}
