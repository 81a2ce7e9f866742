//! Incident state machine: escalation of overdue open incidents and work
//! progress of in-progress ones.
//!
//! `open → in_progress → resolved` and `open → escalated` are the only
//! transitions. Terminal incidents are never touched again.

use tracing::info;

use dispatch_core::components::Incident;
use dispatch_core::config::DispatchConfig;
use dispatch_core::enums::{IncidentStatus, Outcome};
use dispatch_core::events::DispatchEvent;
use dispatch_core::types::SimMillis;

use crate::world::DispatchWorld;

/// Advance every incident to the current simulated time.
pub fn run(world: &mut DispatchWorld, config: &DispatchConfig) {
    let now = world.now();
    let closed: Vec<DispatchEvent> = world
        .incidents
        .iter_mut()
        .filter_map(|incident| evaluate(incident, now, config.base_resolve_ms))
        .collect();

    for event in closed {
        world.record(event, &config.points);
    }
}

/// Bring one incident up to `now`. Returns the closing event if the
/// incident reached a terminal state.
pub fn evaluate(
    incident: &mut Incident,
    now: SimMillis,
    base_resolve_ms: SimMillis,
) -> Option<DispatchEvent> {
    match incident.status {
        IncidentStatus::Resolved | IncidentStatus::Escalated => None,
        IncidentStatus::Open => {
            if let Some(event) = escalate_if_overdue(incident, now) {
                return Some(event);
            }
            incident.last_update_ms = now;
            None
        }
        IncidentStatus::InProgress => accrue_work(incident, now, base_resolve_ms),
    }
}

/// Escalate an open incident whose deadline lies before `at`.
pub fn escalate_if_overdue(incident: &mut Incident, at: SimMillis) -> Option<DispatchEvent> {
    if incident.status != IncidentStatus::Open || at <= incident.deadline_ms {
        return None;
    }
    incident.status = IncidentStatus::Escalated;
    incident.last_update_ms = at;
    incident.last_message = "Escalated: no crew started work before the deadline.".to_string();
    Some(close(incident, Outcome::Missed, at))
}

fn accrue_work(
    incident: &mut Incident,
    now: SimMillis,
    base_resolve_ms: SimMillis,
) -> Option<DispatchEvent> {
    let dt = now.saturating_sub(incident.last_update_ms);
    incident.worked_ms = (incident.worked_ms + dt).min(base_resolve_ms);
    incident.progress = progress_fraction(incident.worked_ms, base_resolve_ms);
    incident.last_update_ms = now;
    if incident.worked_ms < base_resolve_ms {
        return None;
    }

    // Judged at the evaluation time, not at the instant the work ran out.
    incident.status = IncidentStatus::Resolved;
    let outcome = if now <= incident.deadline_ms {
        incident.last_message = "Resolved on time.".to_string();
        Outcome::OnTime
    } else {
        incident.last_message = "Resolved late.".to_string();
        Outcome::Late
    };
    Some(close(incident, outcome, now))
}

fn progress_fraction(worked_ms: SimMillis, base_resolve_ms: SimMillis) -> f64 {
    if base_resolve_ms == 0 {
        return 1.0;
    }
    (worked_ms as f64 / base_resolve_ms as f64).min(1.0)
}

fn close(incident: &mut Incident, outcome: Outcome, at: SimMillis) -> DispatchEvent {
    incident.outcome = Some(outcome);
    incident.closed_at_ms = Some(at);
    // The live roster empties so a unit is never listed on two incidents.
    for (&unit_type, ids) in incident.assigned.iter_mut() {
        incident.responders.entry(unit_type).or_default().append(ids);
    }
    info!(
        incident_id = incident.id,
        name = %incident.template_name,
        ?outcome,
        at,
        "incident closed"
    );
    DispatchEvent::IncidentClosed {
        incident_id: incident.id,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dispatch_core::components::IncidentTemplate;
    use dispatch_core::enums::UnitType;

    use super::*;
    use crate::incidents::IncidentSet;

    fn open_incident(deadline_ms: SimMillis) -> Incident {
        let template = IncidentTemplate {
            name: "Water damage".to_string(),
            requirements: BTreeMap::from([(UnitType::Engine, 1)]),
        };
        let mut set = IncidentSet::default();
        let id = set.open(&template, 0, deadline_ms);
        set.get(id).cloned().unwrap()
    }

    fn started(deadline_ms: SimMillis, at: SimMillis) -> Incident {
        let mut incident = open_incident(deadline_ms);
        incident.status = IncidentStatus::InProgress;
        incident.started_at_ms = Some(at);
        incident.last_update_ms = at;
        incident
    }

    #[test]
    fn open_incident_escalates_only_after_deadline() {
        let mut incident = open_incident(18_000);
        assert!(evaluate(&mut incident, 18_000, 8_000).is_none());
        assert_eq!(incident.status, IncidentStatus::Open);

        let event = evaluate(&mut incident, 18_001, 8_000);
        assert_eq!(
            event,
            Some(DispatchEvent::IncidentClosed {
                incident_id: incident.id,
                outcome: Outcome::Missed
            })
        );
        assert_eq!(incident.status, IncidentStatus::Escalated);
        assert_eq!(incident.closed_at_ms, Some(18_001));

        assert!(evaluate(&mut incident, 40_000, 8_000).is_none());
    }

    #[test]
    fn in_progress_never_escalates() {
        let mut incident = started(5_000, 3_500);
        assert!(evaluate(&mut incident, 6_000, 8_000).is_none());
        assert_eq!(incident.status, IncidentStatus::InProgress);
        assert!(incident.progress > 0.0 && incident.progress < 1.0);
    }

    #[test]
    fn resolution_judged_at_evaluation_time() {
        let mut incident = started(11_500, 3_500);
        assert!(evaluate(&mut incident, 11_000, 8_000).is_none());
        // The work runs out at 11_500 but is only seen at 12_000.
        let event = evaluate(&mut incident, 12_000, 8_000);
        assert_eq!(
            event,
            Some(DispatchEvent::IncidentClosed {
                incident_id: incident.id,
                outcome: Outcome::Late
            })
        );
        assert_eq!(incident.closed_at_ms, Some(12_000));
        assert_eq!(incident.last_update_ms, 12_000);
        assert_eq!(incident.progress, 1.0);
    }

    #[test]
    fn resolution_on_deadline_counts_on_time() {
        let mut incident = started(11_500, 3_500);
        let event = evaluate(&mut incident, 11_500, 8_000);
        assert_eq!(
            event,
            Some(DispatchEvent::IncidentClosed {
                incident_id: incident.id,
                outcome: Outcome::OnTime
            })
        );
    }

    #[test]
    fn closing_moves_roster_to_responders() {
        let mut incident = started(20_000, 3_500);
        incident.assigned.get_mut(&UnitType::Engine).unwrap().push(1);
        evaluate(&mut incident, 11_500, 8_000);
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert!(incident.assigned[&UnitType::Engine].is_empty());
        assert_eq!(incident.responders[&UnitType::Engine], vec![1]);

        let mut missed = open_incident(1_000);
        missed.assigned.get_mut(&UnitType::Engine).unwrap().push(2);
        evaluate(&mut missed, 1_001, 8_000);
        assert_eq!(missed.status, IncidentStatus::Escalated);
        assert!(missed.assigned.values().all(Vec::is_empty));
        assert_eq!(missed.responders[&UnitType::Engine], vec![2]);
    }

    #[test]
    fn late_resolution() {
        let mut incident = started(11_499, 3_500);
        let event = evaluate(&mut incident, 11_500, 8_000);
        assert_eq!(
            event,
            Some(DispatchEvent::IncidentClosed {
                incident_id: incident.id,
                outcome: Outcome::Late
            })
        );
        assert_eq!(incident.last_message, "Resolved late.");
    }

    #[test]
    fn progress_is_monotone_and_bounded() {
        let mut incident = started(100_000, 0);
        let mut last = 0.0;
        for now in (0..=9_000).step_by(700) {
            evaluate(&mut incident, now, 8_000);
            assert!(incident.progress >= last);
            assert!((0.0..=1.0).contains(&incident.progress));
            last = incident.progress;
        }
        assert_eq!(incident.status, IncidentStatus::Resolved);
    }
}
