//! Scoring engine: turns dispatch events into point deltas.
//!
//! Only dispatches and terminal transitions score. The incident state
//! machine emits `IncidentClosed` once per incident, which is what makes
//! outcome scoring exactly-once.

use dispatch_core::config::PointValues;
use dispatch_core::enums::Outcome;
use dispatch_core::events::DispatchEvent;
use dispatch_core::state::ScoreView;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub total: i64,
    pub dispatches: u32,
    pub resolved_on_time: u32,
    pub resolved_late: u32,
    pub escalated: u32,
}

impl ScoreState {
    /// Apply the points for `event`. Returns the delta.
    pub fn apply(&mut self, event: &DispatchEvent, points: &PointValues) -> i64 {
        let delta = match event {
            DispatchEvent::UnitDispatched { .. } => {
                self.dispatches += 1;
                points.assign
            }
            DispatchEvent::IncidentClosed { outcome, .. } => match outcome {
                Outcome::OnTime => {
                    self.resolved_on_time += 1;
                    points.on_time
                }
                Outcome::Late => {
                    self.resolved_late += 1;
                    points.slow_penalty
                }
                Outcome::Missed => {
                    self.escalated += 1;
                    points.missed_penalty
                }
            },
            _ => 0,
        };
        self.total += delta;
        delta
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            total: self.total,
            dispatches: self.dispatches,
            resolved_on_time: self.resolved_on_time,
            resolved_late: self.resolved_late,
            escalated: self.escalated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::enums::UnitType;

    fn closed(outcome: Outcome) -> DispatchEvent {
        DispatchEvent::IncidentClosed {
            incident_id: 1,
            outcome,
        }
    }

    #[test]
    fn each_outcome_maps_to_one_point_value() {
        let points = PointValues::default();
        let mut score = ScoreState::default();
        assert_eq!(score.apply(&closed(Outcome::OnTime), &points), 120);
        assert_eq!(score.apply(&closed(Outcome::Late), &points), -80);
        assert_eq!(score.apply(&closed(Outcome::Missed), &points), -150);
        assert_eq!(score.total, -110);
        assert_eq!(
            (score.resolved_on_time, score.resolved_late, score.escalated),
            (1, 1, 1)
        );
    }

    #[test]
    fn dispatch_scores_flat_bonus() {
        let points = PointValues::default();
        let mut score = ScoreState::default();
        let event = DispatchEvent::UnitDispatched {
            unit_id: 1,
            unit_type: UnitType::Engine,
            incident_id: 1,
        };
        score.apply(&event, &points);
        score.apply(&event, &points);
        assert_eq!(score.total, 10);
        assert_eq!(score.dispatches, 2);
    }

    #[test]
    fn other_events_do_not_score() {
        let points = PointValues::default();
        let mut score = ScoreState::default();
        let events = [
            DispatchEvent::IncidentStarted { incident_id: 1 },
            DispatchEvent::UnitReleased { unit_id: 1 },
            DispatchEvent::UnitArrived {
                unit_id: 1,
                incident_id: 1,
                attached: true,
            },
        ];
        for event in &events {
            assert_eq!(score.apply(event, &points), 0);
        }
        assert_eq!(score, ScoreState::default());
    }
}
