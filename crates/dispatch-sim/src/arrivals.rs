//! Deferred arrival effects, ordered by fire time.
//!
//! A dispatch schedules exactly one arrival. There is no cancellation:
//! every scheduled arrival is eventually applied by the tick loop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use dispatch_core::enums::UnitType;
use dispatch_core::types::{IncidentId, SimMillis, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingArrival {
    pub fire_at: SimMillis,
    /// Schedule order, breaks ties between equal fire times.
    pub seq: u64,
    pub unit_id: UnitId,
    pub unit_type: UnitType,
    pub incident_id: IncidentId,
}

impl Ord for PendingArrival {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (fire_at, seq).
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PendingArrival {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct ArrivalQueue {
    pending: BinaryHeap<PendingArrival>,
    next_seq: u64,
}

impl ArrivalQueue {
    pub fn schedule(
        &mut self,
        fire_at: SimMillis,
        unit_id: UnitId,
        unit_type: UnitType,
        incident_id: IncidentId,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingArrival {
            fire_at,
            seq,
            unit_id,
            unit_type,
            incident_id,
        });
    }

    /// Pop the earliest arrival if it is due at or before `now`.
    pub fn pop_due(&mut self, now: SimMillis) -> Option<PendingArrival> {
        if self.pending.peek()?.fire_at > now {
            return None;
        }
        self.pending.pop()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Arrivals still pending for `incident_id` with the given unit type.
    pub fn en_route(&self, incident_id: IncidentId, unit_type: UnitType) -> usize {
        self.pending
            .iter()
            .filter(|a| a.incident_id == incident_id && a.unit_type == unit_type)
            .count()
    }
}
