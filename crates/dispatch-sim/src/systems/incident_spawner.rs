//! Incident spawner: reports a new incident every spawn interval while the
//! board has room for it.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use dispatch_core::components::IncidentTemplate;
use dispatch_core::config::DispatchConfig;
use dispatch_core::events::DispatchEvent;
use dispatch_core::types::SimMillis;

use crate::world::DispatchWorld;

/// Accumulate `elapsed_ms` and spawn at most one incident.
pub fn run(
    world: &mut DispatchWorld,
    config: &DispatchConfig,
    catalog: &[IncidentTemplate],
    rng: &mut ChaCha8Rng,
    elapsed_ms: SimMillis,
) {
    world.spawn_accumulator_ms += elapsed_ms;
    if world.spawn_accumulator_ms < config.spawn_interval_ms {
        return;
    }
    world.spawn_accumulator_ms = 0;

    let active = world.incidents.active_count();
    if active >= config.max_open_incidents {
        trace!(active, "spawn skipped: board full");
        return;
    }
    if catalog.is_empty() {
        return;
    }

    let template = &catalog[rng.gen_range(0..catalog.len())];
    let jitter = if config.deadline_jitter_ms > 0 {
        rng.gen_range(0..config.deadline_jitter_ms)
    } else {
        0
    };
    let now = world.now();
    let deadline_ms = now + config.base_resolve_ms + config.deadline_grace_ms + jitter;
    let incident_id = world.incidents.open(template, now, deadline_ms);

    debug!(incident_id, name = %template.name, deadline_ms, "incident reported");
    world.record(
        DispatchEvent::IncidentReported {
            incident_id,
            name: template.name.clone(),
            deadline_ms,
        },
        &config.points,
    );
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use dispatch_core::enums::IncidentStatus;

    use super::*;
    use crate::scenario;

    fn setup() -> (DispatchWorld, DispatchConfig, Vec<IncidentTemplate>, ChaCha8Rng) {
        (
            DispatchWorld::new(&scenario::default_roster()),
            DispatchConfig::default(),
            scenario::default_catalog(),
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    #[test]
    fn spawns_once_per_interval() {
        let (mut world, config, catalog, mut rng) = setup();
        run(&mut world, &config, &catalog, &mut rng, 5_499);
        assert!(world.incidents.is_empty());
        run(&mut world, &config, &catalog, &mut rng, 1);
        assert_eq!(world.incidents.len(), 1);
        assert_eq!(world.spawn_accumulator_ms, 0);
    }

    #[test]
    fn deadline_within_grace_and_jitter() {
        let (mut world, config, catalog, mut rng) = setup();
        for _ in 0..20 {
            run(&mut world, &config, &catalog, &mut rng, 5_500);
            for incident in world.incidents.iter_mut() {
                incident.status = IncidentStatus::Resolved;
            }
        }
        for incident in world.incidents.as_slice() {
            let slack = incident.deadline_ms - incident.created_at_ms;
            assert!((18_000..28_000).contains(&slack), "slack {slack}");
            assert!(catalog.iter().any(|t| t.name == incident.template_name));
        }
    }

    #[test]
    fn skipped_at_capacity_but_accumulator_resets() {
        let (mut world, config, catalog, mut rng) = setup();
        for _ in 0..10 {
            run(&mut world, &config, &catalog, &mut rng, 5_500);
        }
        assert_eq!(world.incidents.active_count(), config.max_open_incidents);
        assert_eq!(world.spawn_accumulator_ms, 0);
    }

    #[test]
    fn zero_jitter_gives_fixed_deadline() {
        let (mut world, mut config, catalog, mut rng) = setup();
        config.deadline_jitter_ms = 0;
        run(&mut world, &config, &catalog, &mut rng, 5_500);
        let incident = &world.incidents.as_slice()[0];
        assert_eq!(incident.deadline_ms - incident.created_at_ms, 18_000);
    }
}
