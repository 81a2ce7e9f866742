//! Unit release system.
//!
//! Runs before any availability query or incident evaluation in a tick.
//! On-scene units whose remaining commitment is only the drive back start
//! returning; units whose commitment has fully elapsed become idle.

use tracing::debug;

use dispatch_core::config::DispatchConfig;
use dispatch_core::enums::IncidentStatus;
use dispatch_core::events::DispatchEvent;

use crate::incidents;
use crate::world::DispatchWorld;

pub fn run(world: &mut DispatchWorld, config: &DispatchConfig) {
    let now = world.now();

    for started in world.pool.begin_returns(now, config.travel_ms) {
        let unit_id = started.unit_id;
        let callsign = world.pool.callsign(unit_id);
        let unit_type = world.pool.get(unit_id).map(|u| u.unit_type);

        // A crew still waiting at an unstarted incident leaves its roster.
        let mut left_incident = None;
        if let (Some(incident_id), Some(unit_type)) = (started.incident_id, unit_type) {
            if let Some(incident) = world.incidents.get_mut(incident_id) {
                if incident.status == IncidentStatus::Open
                    && incidents::detach(incident, unit_type, unit_id)
                {
                    incident.last_message = format!("{callsign} left the scene.");
                    left_incident = Some(incident_id);
                }
            }
        }

        debug!(unit = %callsign, ?left_incident, "unit returning");
        world.record(
            DispatchEvent::UnitReturning {
                unit_id,
                left_incident,
            },
            &config.points,
        );
    }

    for unit_id in world.pool.release_expired(now) {
        debug!(unit = %world.pool.callsign(unit_id), "unit back in service");
        world.record(DispatchEvent::UnitReleased { unit_id }, &config.points);
    }
}
