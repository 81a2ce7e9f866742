//! Snapshot system: builds the read model from the world.
//!
//! Read-only apart from draining the events collected since the last
//! snapshot, which the caller passes in.

use dispatch_core::components::{Incident, Unit};
use dispatch_core::config::DispatchConfig;
use dispatch_core::enums::{SimPhase, UnitType};
use dispatch_core::events::DispatchEvent;
use dispatch_core::state::*;
use dispatch_core::types::SimMillis;

use crate::arrivals::ArrivalQueue;
use crate::incidents::{assigned_counts, requirements_met};
use crate::pool::UnitPool;
use crate::world::DispatchWorld;

pub fn build_snapshot(
    world: &DispatchWorld,
    phase: SimPhase,
    config: &DispatchConfig,
    events: Vec<DispatchEvent>,
) -> DispatchSnapshot {
    let now = world.now();

    DispatchSnapshot {
        time: world.clock.time(),
        phase,
        units: world
            .pool
            .units()
            .iter()
            .map(|unit| unit_view(unit, now))
            .collect(),
        incidents: world
            .incidents
            .as_slice()
            .iter()
            .map(|incident| incident_view(incident, &world.arrivals, now))
            .collect(),
        station: station_view(&world.pool),
        open_incidents: world.incidents.active_count(),
        max_open_incidents: config.max_open_incidents,
        score: world.score.view(),
        events,
    }
}

fn unit_view(unit: &Unit, now: SimMillis) -> UnitView {
    UnitView {
        id: unit.id,
        callsign: unit.callsign.clone(),
        unit_type: unit.unit_type,
        status: unit.status,
        remaining_commitment_ms: unit
            .commit_until_ms
            .map_or(0, |until| until.saturating_sub(now)),
        assignment: unit.assignment,
    }
}

fn incident_view(
    incident: &Incident,
    arrivals: &ArrivalQueue,
    now: SimMillis,
) -> IncidentView {
    let en_route_counts = incident
        .requirements
        .keys()
        .map(|&unit_type| (unit_type, arrivals.en_route(incident.id, unit_type) as u32))
        .collect();

    IncidentView {
        id: incident.id,
        name: incident.template_name.clone(),
        requirements: incident.requirements.clone(),
        assigned_counts: assigned_counts(incident),
        assigned_units: incident.assigned.clone(),
        responders: incident.responders.clone(),
        en_route_counts,
        requirements_met: requirements_met(incident),
        status: incident.status,
        progress: incident.progress,
        created_at_ms: incident.created_at_ms,
        deadline_ms: incident.deadline_ms,
        deadline_remaining_ms: incident.deadline_ms.saturating_sub(now),
        started_at_ms: incident.started_at_ms,
        outcome: incident.outcome,
        last_message: incident.last_message.clone(),
    }
}

fn station_view(pool: &UnitPool) -> StationView {
    let total = pool.units().len() as u32;
    let committed = pool.committed_count();
    StationView {
        ready: total - committed,
        committed,
        total,
        available_by_type: UnitType::ALL
            .iter()
            .map(|&unit_type| (unit_type, pool.available_count(unit_type)))
            .collect(),
    }
}
