//! Unit pool: owns every unit and its lifecycle state.
//!
//! Units are created once from the roster and never removed. All status
//! changes go through the transition helpers here, which refuse to commit
//! a unit that is already committed.

use dispatch_core::components::{Assignment, Unit, UnitSpec};
use dispatch_core::enums::{AssignmentPhase, UnitStatus, UnitType};
use dispatch_core::types::{IncidentId, SimMillis, UnitId};

/// A unit that just began its return leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnStarted {
    pub unit_id: UnitId,
    pub incident_id: Option<IncidentId>,
}

#[derive(Debug, Clone, Default)]
pub struct UnitPool {
    /// Sorted by id; ids are assigned 1.. in roster order.
    units: Vec<Unit>,
}

impl UnitPool {
    pub fn from_roster(roster: &[UnitSpec]) -> Self {
        let units = roster
            .iter()
            .zip(1..)
            .map(|(spec, id)| Unit {
                id,
                callsign: spec.callsign.clone(),
                unit_type: spec.unit_type,
                status: UnitStatus::Idle,
                commit_until_ms: None,
                assignment: None,
            })
            .collect();
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.index_of(id).map(|i| &self.units[i])
    }

    fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.index_of(id).map(move |i| &mut self.units[i])
    }

    fn index_of(&self, id: UnitId) -> Option<usize> {
        self.units.binary_search_by_key(&id, |u| u.id).ok()
    }

    pub fn callsign(&self, id: UnitId) -> String {
        self.get(id)
            .map(|u| u.callsign.clone())
            .unwrap_or_else(|| format!("unit #{id}"))
    }

    /// The idle unit of `unit_type` with the lowest id.
    pub fn find_available(&self, unit_type: UnitType) -> Option<UnitId> {
        self.units
            .iter()
            .find(|u| u.unit_type == unit_type && u.status == UnitStatus::Idle)
            .map(|u| u.id)
    }

    pub fn available_count(&self, unit_type: UnitType) -> u32 {
        self.units
            .iter()
            .filter(|u| u.unit_type == unit_type && u.status == UnitStatus::Idle)
            .count() as u32
    }

    /// Commit an idle unit to travel to `incident_id` until `until`.
    /// Returns false, changing nothing, if the unit is missing or busy.
    pub fn reserve(&mut self, id: UnitId, until: SimMillis, incident_id: IncidentId) -> bool {
        let Some(unit) = self.get_mut(id) else {
            return false;
        };
        if unit.status != UnitStatus::Idle {
            return false;
        }
        unit.status = UnitStatus::TravelingToScene;
        unit.commit_until_ms = Some(until);
        unit.assignment = Some(Assignment {
            incident_id,
            phase: AssignmentPhase::ToScene,
        });
        true
    }

    /// Switch a traveling unit to on-scene work until `until`.
    /// `incident_id` is `None` when the unit could not join its incident.
    pub fn commit_on_scene(
        &mut self,
        id: UnitId,
        until: SimMillis,
        incident_id: Option<IncidentId>,
    ) -> bool {
        let Some(unit) = self.get_mut(id) else {
            return false;
        };
        if unit.status != UnitStatus::TravelingToScene {
            return false;
        }
        unit.status = UnitStatus::OnScene;
        unit.commit_until_ms = Some(until);
        unit.assignment = incident_id.map(|incident_id| Assignment {
            incident_id,
            phase: AssignmentPhase::AtScene,
        });
        true
    }

    /// Keep an on-scene unit committed at least until `until`.
    pub fn extend_commitment(&mut self, id: UnitId, until: SimMillis) {
        if let Some(unit) = self.get_mut(id) {
            if unit.status == UnitStatus::OnScene {
                unit.commit_until_ms = unit.commit_until_ms.map(|current| current.max(until));
            }
        }
    }

    pub fn release(&mut self, id: UnitId) {
        if let Some(unit) = self.get_mut(id) {
            unit.status = UnitStatus::Idle;
            unit.commit_until_ms = None;
            unit.assignment = None;
        }
    }

    /// Move on-scene units whose remaining commitment is only the drive
    /// back into `TravelingBack`.
    pub fn begin_returns(&mut self, now: SimMillis, travel_ms: SimMillis) -> Vec<ReturnStarted> {
        let mut started = Vec::new();
        for unit in &mut self.units {
            if unit.status != UnitStatus::OnScene {
                continue;
            }
            let Some(until) = unit.commit_until_ms else {
                continue;
            };
            if until.saturating_sub(travel_ms) <= now {
                unit.status = UnitStatus::TravelingBack;
                if let Some(assignment) = unit.assignment.as_mut() {
                    assignment.phase = AssignmentPhase::Returning;
                }
                started.push(ReturnStarted {
                    unit_id: unit.id,
                    incident_id: unit.assignment.map(|a| a.incident_id),
                });
            }
        }
        started
    }

    /// Release every committed unit whose window has elapsed.
    pub fn release_expired(&mut self, now: SimMillis) -> Vec<UnitId> {
        let expired: Vec<UnitId> = self
            .units
            .iter()
            .filter(|u| u.status.is_committed())
            .filter(|u| u.commit_until_ms.is_some_and(|until| until <= now))
            .map(|u| u.id)
            .collect();
        for &id in &expired {
            self.release(id);
        }
        expired
    }

    pub fn committed_count(&self) -> u32 {
        self.units
            .iter()
            .filter(|u| u.status.is_committed())
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(callsign: &str, unit_type: UnitType) -> UnitSpec {
        UnitSpec {
            callsign: callsign.to_string(),
            unit_type,
        }
    }

    fn pool() -> UnitPool {
        UnitPool::from_roster(&[
            spec("LF-1", UnitType::Engine),
            spec("LF-2", UnitType::Engine),
            spec("RTW-1", UnitType::Ambulance),
        ])
    }

    #[test]
    fn ids_follow_roster_order() {
        let pool = pool();
        let ids: Vec<UnitId> = pool.units().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(pool.callsign(2), "LF-2");
        assert!(pool.units().iter().all(|u| u.status == UnitStatus::Idle));
    }

    #[test]
    fn find_available_prefers_lowest_id() {
        let mut pool = pool();
        assert_eq!(pool.find_available(UnitType::Engine), Some(1));
        assert!(pool.reserve(1, 3_500, 10));
        assert_eq!(pool.find_available(UnitType::Engine), Some(2));
        assert!(pool.reserve(2, 3_500, 10));
        assert_eq!(pool.find_available(UnitType::Engine), None);
        assert_eq!(pool.available_count(UnitType::Ambulance), 1);
        assert_eq!(pool.find_available(UnitType::AerialLadder), None);
    }

    #[test]
    fn reserve_refuses_committed_unit() {
        let mut pool = pool();
        assert!(pool.reserve(1, 3_500, 10));
        let before = pool.get(1).cloned();
        assert!(!pool.reserve(1, 9_000, 11));
        assert_eq!(pool.get(1).cloned(), before);
        assert!(!pool.reserve(99, 3_500, 10));
    }

    #[test]
    fn unit_walks_through_full_lifecycle() {
        let mut pool = pool();
        assert!(pool.reserve(1, 3_500, 10));
        assert_eq!(pool.get(1).unwrap().status, UnitStatus::TravelingToScene);

        assert!(pool.commit_on_scene(1, 15_000, Some(10)));
        let unit = pool.get(1).unwrap();
        assert_eq!(unit.status, UnitStatus::OnScene);
        assert_eq!(unit.assignment.unwrap().phase, AssignmentPhase::AtScene);

        assert!(pool.begin_returns(11_499, 3_500).is_empty());
        let returning = pool.begin_returns(11_500, 3_500);
        assert_eq!(
            returning,
            vec![ReturnStarted {
                unit_id: 1,
                incident_id: Some(10)
            }]
        );
        assert_eq!(pool.get(1).unwrap().status, UnitStatus::TravelingBack);

        assert!(pool.release_expired(14_999).is_empty());
        assert_eq!(pool.release_expired(15_000), vec![1]);
        let unit = pool.get(1).unwrap();
        assert_eq!(unit.status, UnitStatus::Idle);
        assert_eq!(unit.commit_until_ms, None);
        assert_eq!(unit.assignment, None);
    }

    #[test]
    fn commit_on_scene_requires_travel() {
        let mut pool = pool();
        assert!(!pool.commit_on_scene(1, 15_000, Some(10)));
        assert_eq!(pool.get(1).unwrap().status, UnitStatus::Idle);
    }

    #[test]
    fn unattached_arrival_keeps_unit_committed_without_task() {
        let mut pool = pool();
        pool.reserve(3, 3_500, 10);
        assert!(pool.commit_on_scene(3, 15_000, None));
        let unit = pool.get(3).unwrap();
        assert_eq!(unit.status, UnitStatus::OnScene);
        assert_eq!(unit.assignment, None);
        assert_eq!(pool.committed_count(), 1);
    }

    #[test]
    fn extend_commitment_never_shortens() {
        let mut pool = pool();
        pool.reserve(1, 3_500, 10);
        pool.commit_on_scene(1, 15_000, Some(10));
        pool.extend_commitment(1, 12_000);
        assert_eq!(pool.get(1).unwrap().commit_until_ms, Some(15_000));
        pool.extend_commitment(1, 20_000);
        assert_eq!(pool.get(1).unwrap().commit_until_ms, Some(20_000));
    }
}
