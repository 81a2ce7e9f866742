//! Autopilot dispatcher: plays the board from snapshots.
//!
//! Works through open incidents in creation order and asks for every unit
//! type still short of its requirement, counting units already en route.
//! It never issues more requests than there are idle units.

use std::collections::BTreeMap;

use dispatch_core::commands::PlayerCommand;
use dispatch_core::enums::{IncidentStatus, UnitType};
use dispatch_core::state::DispatchSnapshot;

/// Commands that fill the open incidents in `snapshot` as far as the
/// station allows.
pub fn plan(snapshot: &DispatchSnapshot) -> Vec<PlayerCommand> {
    let mut idle: BTreeMap<UnitType, u32> = snapshot.station.available_by_type.clone();
    let mut commands = Vec::new();

    for incident in snapshot
        .incidents
        .iter()
        .filter(|inc| inc.status == IncidentStatus::Open)
    {
        for (&unit_type, &need) in &incident.requirements {
            let arrived = incident.assigned_counts.get(&unit_type).copied().unwrap_or(0);
            let coming = incident.en_route_counts.get(&unit_type).copied().unwrap_or(0);
            let short = need.saturating_sub(arrived + coming);

            let free = idle.entry(unit_type).or_default();
            let sent = short.min(*free);
            *free -= sent;
            commands.extend((0..sent).map(|_| PlayerCommand::Assign {
                incident_id: incident.id,
                unit_type,
            }));
        }
    }
    commands
}
