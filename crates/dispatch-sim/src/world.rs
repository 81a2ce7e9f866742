//! The simulation state aggregate.
//!
//! `DispatchWorld` holds everything that changes during a session. The
//! engine owns exactly one; systems and the dispatch coordinator receive it
//! by `&mut` and are the only code that mutates it.

use dispatch_core::components::UnitSpec;
use dispatch_core::config::PointValues;
use dispatch_core::events::DispatchEvent;
use dispatch_core::types::SimMillis;

use crate::arrivals::ArrivalQueue;
use crate::clock::SimClock;
use crate::incidents::IncidentSet;
use crate::pool::UnitPool;
use crate::scoring::ScoreState;

#[derive(Debug)]
pub struct DispatchWorld {
    pub clock: SimClock,
    pub pool: UnitPool,
    pub incidents: IncidentSet,
    pub arrivals: ArrivalQueue,
    pub score: ScoreState,
    /// Time accumulated toward the next incident report.
    pub spawn_accumulator_ms: SimMillis,
    /// Events not yet handed out in a snapshot.
    pub events: Vec<DispatchEvent>,
}

impl DispatchWorld {
    pub fn new(roster: &[UnitSpec]) -> Self {
        Self {
            clock: SimClock::default(),
            pool: UnitPool::from_roster(roster),
            incidents: IncidentSet::default(),
            arrivals: ArrivalQueue::default(),
            score: ScoreState::default(),
            spawn_accumulator_ms: 0,
            events: Vec::new(),
        }
    }

    pub fn now(&self) -> SimMillis {
        self.clock.now()
    }

    /// Score an event and queue it for the next snapshot.
    pub fn record(&mut self, event: DispatchEvent, points: &PointValues) {
        self.score.apply(&event, points);
        self.events.push(event);
    }
}
