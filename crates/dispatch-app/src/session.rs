//! Headless sessions: drive an engine on the caller's thread with a fixed
//! simulated step, as fast as the machine allows.

use tracing::debug;

use dispatch_core::commands::PlayerCommand;
use dispatch_core::config::ConfigError;
use dispatch_core::state::DispatchSnapshot;
use dispatch_core::types::SimMillis;
use dispatch_sim::engine::{DispatchEngine, SimConfig};

use crate::autopilot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    pub duration_ms: SimMillis,
    pub tick_ms: SimMillis,
    pub autopilot: bool,
}

/// Start a fresh engine and run it for `plan.duration_ms` of simulated
/// time. Returns the final snapshot.
pub fn run_headless(
    config: SimConfig,
    plan: SessionPlan,
) -> Result<DispatchSnapshot, ConfigError> {
    let mut engine = DispatchEngine::try_new(config)?;
    engine.queue_command(PlayerCommand::Start);

    let tick_ms = plan.tick_ms.max(1);
    let mut snapshot = engine.tick(0);
    while engine.now_ms() < plan.duration_ms {
        let delta = tick_ms.min(plan.duration_ms - engine.now_ms());
        snapshot = engine.tick(delta);
        if plan.autopilot {
            engine.queue_commands(autopilot::plan(&snapshot));
        }
    }

    debug!(ticks = snapshot.time.tick, "headless session finished");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(autopilot: bool) -> SessionPlan {
        SessionPlan {
            duration_ms: 60_000,
            tick_ms: 100,
            autopilot,
        }
    }

    #[test]
    fn test_runs_exact_duration() {
        let snap = run_headless(SimConfig::default(), plan(false)).unwrap();
        assert_eq!(snap.time.elapsed_ms, 60_000);
        assert_eq!(snap.score.dispatches, 0);
        assert!(!snap.incidents.is_empty());
    }

    #[test]
    fn test_autopilot_beats_idle_station() {
        let idle = run_headless(SimConfig::default(), plan(false)).unwrap();
        let busy = run_headless(SimConfig::default(), plan(true)).unwrap();
        assert!(busy.score.total > idle.score.total);
        assert!(busy.score.resolved_on_time > 0);
    }

    #[test]
    fn test_uneven_step_lands_on_duration() {
        let snap = run_headless(
            SimConfig::default(),
            SessionPlan {
                duration_ms: 10_000,
                tick_ms: 3_000,
                autopilot: false,
            },
        )
        .unwrap();
        assert_eq!(snap.time.elapsed_ms, 10_000);
    }
}
