//! Incident set: every incident of the session, in creation order.
//!
//! Terminal incidents stay in the set as history until a reset. Their
//! rosters move to `responders` on closing, so the live rosters of all
//! incidents never share a unit.

use std::collections::BTreeMap;

use dispatch_core::components::{Incident, IncidentTemplate};
use dispatch_core::enums::{IncidentStatus, UnitType};
use dispatch_core::types::{IncidentId, SimMillis, UnitId};

#[derive(Debug, Clone)]
pub struct IncidentSet {
    /// Sorted by id, which is also creation order.
    incidents: Vec<Incident>,
    next_id: IncidentId,
}

impl Default for IncidentSet {
    fn default() -> Self {
        Self {
            incidents: Vec::new(),
            next_id: 1,
        }
    }
}

impl IncidentSet {
    /// Materialize a new open incident from `template`.
    pub fn open(
        &mut self,
        template: &IncidentTemplate,
        created_at_ms: SimMillis,
        deadline_ms: SimMillis,
    ) -> IncidentId {
        let id = self.next_id;
        self.next_id += 1;

        let assigned: BTreeMap<UnitType, Vec<UnitId>> = template
            .requirements
            .keys()
            .map(|&unit_type| (unit_type, Vec::new()))
            .collect();

        self.incidents.push(Incident {
            id,
            template_name: template.name.clone(),
            requirements: template.requirements.clone(),
            assigned,
            responders: BTreeMap::new(),
            status: IncidentStatus::Open,
            created_at_ms,
            deadline_ms,
            started_at_ms: None,
            progress: 0.0,
            worked_ms: 0,
            last_update_ms: created_at_ms,
            outcome: None,
            closed_at_ms: None,
            last_message: String::new(),
        });
        id
    }

    pub fn get(&self, id: IncidentId) -> Option<&Incident> {
        self.index_of(id).map(|i| &self.incidents[i])
    }

    pub fn get_mut(&mut self, id: IncidentId) -> Option<&mut Incident> {
        self.index_of(id).map(move |i| &mut self.incidents[i])
    }

    fn index_of(&self, id: IncidentId) -> Option<usize> {
        self.incidents.binary_search_by_key(&id, |inc| inc.id).ok()
    }

    pub fn as_slice(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Incident> {
        self.incidents.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Incidents counting against the open-incident cap.
    pub fn active_count(&self) -> u32 {
        self.incidents
            .iter()
            .filter(|inc| inc.status.is_active())
            .count() as u32
    }
}

/// Every required type has at least the required number of arrived units.
pub fn requirements_met(incident: &Incident) -> bool {
    incident.requirements.iter().all(|(unit_type, &need)| {
        let have = incident.assigned.get(unit_type).map_or(0, Vec::len);
        have >= need as usize
    })
}

/// Arrived unit count per required type.
pub fn assigned_counts(incident: &Incident) -> BTreeMap<UnitType, u32> {
    incident
        .requirements
        .keys()
        .map(|&unit_type| {
            let have = incident.assigned.get(&unit_type).map_or(0, Vec::len);
            (unit_type, have as u32)
        })
        .collect()
}

/// Remove `unit_id` from the roster of `unit_type`. Returns whether it was listed.
pub fn detach(incident: &mut Incident, unit_type: UnitType, unit_id: UnitId) -> bool {
    let Some(ids) = incident.assigned.get_mut(&unit_type) else {
        return false;
    };
    let before = ids.len();
    ids.retain(|&id| id != unit_id);
    ids.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> IncidentTemplate {
        IncidentTemplate {
            name: "Small kitchen fire".to_string(),
            requirements: BTreeMap::from([(UnitType::Engine, 1), (UnitType::Ambulance, 1)]),
        }
    }

    #[test]
    fn open_initializes_empty_rosters() {
        let mut set = IncidentSet::default();
        let id = set.open(&template(), 1_000, 19_000);
        let incident = set.get(id).unwrap();
        assert_eq!(incident.status, IncidentStatus::Open);
        assert_eq!(incident.assigned.len(), 2);
        assert!(incident.assigned.values().all(Vec::is_empty));
        assert_eq!(incident.last_update_ms, 1_000);
        assert_eq!(incident.progress, 0.0);
        assert!(!requirements_met(incident));
    }

    #[test]
    fn ids_are_sequential_and_lookup_works() {
        let mut set = IncidentSet::default();
        let a = set.open(&template(), 0, 18_000);
        let b = set.open(&template(), 5_500, 23_500);
        assert_eq!((a, b), (1, 2));
        assert_eq!(set.get(2).unwrap().created_at_ms, 5_500);
        assert!(set.get(3).is_none());
        assert_eq!(set.active_count(), 2);
    }

    #[test]
    fn requirements_met_counts_per_type() {
        let mut set = IncidentSet::default();
        let id = set.open(&template(), 0, 18_000);
        let incident = set.get_mut(id).unwrap();
        incident.assigned.get_mut(&UnitType::Engine).unwrap().push(1);
        assert!(!requirements_met(incident));
        incident.assigned.get_mut(&UnitType::Ambulance).unwrap().push(3);
        assert!(requirements_met(incident));

        let counts = assigned_counts(incident);
        assert_eq!(counts[&UnitType::Engine], 1);
        assert_eq!(counts[&UnitType::Ambulance], 1);
    }

    #[test]
    fn detach_only_reports_listed_units() {
        let mut set = IncidentSet::default();
        let id = set.open(&template(), 0, 18_000);
        let incident = set.get_mut(id).unwrap();
        incident.assigned.get_mut(&UnitType::Engine).unwrap().push(1);
        assert!(!detach(incident, UnitType::Engine, 2));
        assert!(!detach(incident, UnitType::AerialLadder, 1));
        assert!(detach(incident, UnitType::Engine, 1));
        assert!(incident.assigned[&UnitType::Engine].is_empty());
    }
}
