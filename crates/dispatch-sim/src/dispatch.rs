//! Assignment coordinator: sends units out and takes them off rosters.
//!
//! Every rejection here is silent: the request is logged at trace level and
//! nothing changes. A dispatch scores immediately and schedules exactly one
//! arrival; withdrawing a unit never cancels that arrival.

use tracing::{debug, trace, warn};

use dispatch_core::config::DispatchConfig;
use dispatch_core::enums::{IncidentStatus, UnitType};
use dispatch_core::events::DispatchEvent;
use dispatch_core::types::{IncidentId, UnitId};

use crate::arrivals::PendingArrival;
use crate::incidents::{self, requirements_met};
use crate::systems::incident_progress::escalate_if_overdue;
use crate::world::DispatchWorld;

/// Send the lowest-id idle unit of `unit_type` to `incident_id`.
/// Returns the dispatched unit, or `None` if the request was ignored.
pub fn assign(
    world: &mut DispatchWorld,
    config: &DispatchConfig,
    incident_id: IncidentId,
    unit_type: UnitType,
) -> Option<UnitId> {
    match world.incidents.get(incident_id) {
        Some(incident) if incident.status.is_active() => {}
        Some(incident) => {
            trace!(incident_id, status = ?incident.status, "assign ignored: incident closed");
            return None;
        }
        None => {
            trace!(incident_id, "assign ignored: unknown incident");
            return None;
        }
    }

    let Some(unit_id) = world.pool.find_available(unit_type) else {
        trace!(incident_id, %unit_type, "assign ignored: no idle unit");
        return None;
    };

    let arrive_at = world.now() + config.travel_ms;
    if !world.pool.reserve(unit_id, arrive_at, incident_id) {
        return None;
    }
    world
        .arrivals
        .schedule(arrive_at, unit_id, unit_type, incident_id);

    debug!(
        unit = %world.pool.callsign(unit_id),
        incident_id,
        arrive_at,
        "unit dispatched"
    );
    world.record(
        DispatchEvent::UnitDispatched {
            unit_id,
            unit_type,
            incident_id,
        },
        &config.points,
    );
    Some(unit_id)
}

/// Detach an arrived unit from an incident that has not started work.
/// The unit itself stays committed. Returns whether anything changed.
pub fn unassign(
    world: &mut DispatchWorld,
    config: &DispatchConfig,
    incident_id: IncidentId,
    unit_type: UnitType,
    unit_id: UnitId,
) -> bool {
    let callsign = world.pool.callsign(unit_id);
    let Some(incident) = world.incidents.get_mut(incident_id) else {
        trace!(incident_id, "unassign ignored: unknown incident");
        return false;
    };
    if incident.status != IncidentStatus::Open {
        trace!(incident_id, status = ?incident.status, "unassign ignored: incident not open");
        return false;
    }
    if !incidents::detach(incident, unit_type, unit_id) {
        trace!(incident_id, unit_id, "unassign ignored: unit not on roster");
        return false;
    }
    incident.last_message = format!("{callsign} withdrawn.");

    debug!(unit = %callsign, incident_id, "unit withdrawn");
    world.record(
        DispatchEvent::UnitWithdrawn {
            unit_id,
            incident_id,
        },
        &config.points,
    );
    true
}

/// Apply one arrival at its scheduled fire time.
///
/// The target incident is re-checked first: it may have escalated or
/// started since the dispatch. The unit is attached only to an open or
/// in-progress incident, and is committed on scene either way.
pub fn apply_arrival(world: &mut DispatchWorld, config: &DispatchConfig, arrival: PendingArrival) {
    let at = arrival.fire_at;
    let callsign = world.pool.callsign(arrival.unit_id);
    let mut events = Vec::new();
    let mut attached = false;
    let mut started_roster: Vec<UnitId> = Vec::new();

    if let Some(incident) = world.incidents.get_mut(arrival.incident_id) {
        if let Some(closed) = escalate_if_overdue(incident, at) {
            events.push(closed);
        }

        if incident.status.is_active() {
            incident
                .assigned
                .entry(arrival.unit_type)
                .or_default()
                .push(arrival.unit_id);
            incident.last_message = format!("{callsign} arrived ({}).", arrival.unit_type);
            attached = true;

            if incident.status == IncidentStatus::Open && requirements_met(incident) {
                incident.status = IncidentStatus::InProgress;
                incident.started_at_ms = Some(at);
                incident.last_update_ms = at;
                started_roster = incident.assigned.values().flatten().copied().collect();
            }
        }
    }

    let until = at + config.on_scene_commitment_ms();
    let bound_to = attached.then_some(arrival.incident_id);
    if !world.pool.commit_on_scene(arrival.unit_id, until, bound_to) {
        warn!(unit = %callsign, "arrival for a unit that was not traveling");
    }
    // Units already waiting on scene stay until the work is done.
    for &unit_id in &started_roster {
        world.pool.extend_commitment(unit_id, until);
    }

    debug!(
        unit = %callsign,
        incident_id = arrival.incident_id,
        attached,
        "unit arrived"
    );
    events.push(DispatchEvent::UnitArrived {
        unit_id: arrival.unit_id,
        incident_id: arrival.incident_id,
        attached,
    });
    if !started_roster.is_empty() {
        debug!(incident_id = arrival.incident_id, started_at = at, "incident started");
        events.push(DispatchEvent::IncidentStarted {
            incident_id: arrival.incident_id,
        });
    }

    for event in events {
        world.record(event, &config.points);
    }
}
