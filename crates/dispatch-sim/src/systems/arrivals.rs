//! Arrival system: applies every arrival whose fire time has come.

use dispatch_core::config::DispatchConfig;

use crate::dispatch;
use crate::world::DispatchWorld;

/// Drain due arrivals in (fire time, schedule order).
pub fn run(world: &mut DispatchWorld, config: &DispatchConfig) {
    let now = world.now();
    while let Some(arrival) = world.arrivals.pop_due(now) {
        dispatch::apply_arrival(world, config, arrival);
    }
}
