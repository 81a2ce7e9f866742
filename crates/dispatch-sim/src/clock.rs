//! Simulation clock: converts wall-clock deltas into simulated time.

use dispatch_core::types::{SimMillis, SimTime};

#[derive(Debug, Clone, Default)]
pub struct SimClock {
    time: SimTime,
    running: bool,
}

impl SimClock {
    pub fn now(&self) -> SimMillis {
        self.time.elapsed_ms
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Feed one wall-clock delta. Returns the delta applied to simulation
    /// state, which is zero while paused.
    pub fn advance(&mut self, wall_delta_ms: SimMillis) -> SimMillis {
        if !self.running {
            self.time.last_delta_ms = 0;
            return 0;
        }
        self.time.advance(wall_delta_ms);
        wall_delta_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_stopped() {
        let mut clock = SimClock::default();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(100), 0);
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.time().tick, 0);
    }

    #[test]
    fn clock_applies_deltas_only_while_running() {
        let mut clock = SimClock::default();
        clock.resume();
        assert_eq!(clock.advance(40), 40);
        assert_eq!(clock.advance(60), 60);
        assert_eq!(clock.now(), 100);

        clock.pause();
        assert_eq!(clock.advance(500), 0);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.time().last_delta_ms, 0);
        assert_eq!(clock.time().tick, 2);

        clock.resume();
        clock.advance(10);
        assert_eq!(clock.now(), 110);
        assert_eq!(clock.time().tick, 3);
    }
}
