//! Simulation engine: the single owner of dispatch state.
//!
//! `DispatchEngine` owns the world aggregate, processes player commands,
//! runs all systems in a fixed order, and produces `DispatchSnapshot`s.
//! Completely headless, so every behavior can be driven from tests with
//! explicit time deltas.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use dispatch_core::commands::PlayerCommand;
use dispatch_core::components::{Incident, IncidentTemplate, Unit, UnitSpec};
use dispatch_core::config::{ConfigError, DispatchConfig};
use dispatch_core::constants::DEFAULT_SEED;
use dispatch_core::enums::SimPhase;
use dispatch_core::state::{DispatchSnapshot, ScoreView};
use dispatch_core::types::{SimMillis, SimTime};

use crate::dispatch;
use crate::scenario;
use crate::systems;
use crate::world::DispatchWorld;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed, commands and deltas give the same session.
    pub seed: u64,
    pub dispatch: DispatchConfig,
    pub roster: Vec<UnitSpec>,
    pub catalog: Vec<IncidentTemplate>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            dispatch: DispatchConfig::default(),
            roster: scenario::default_roster(),
            catalog: scenario::default_catalog(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dispatch.validate()?;
        scenario::validate_roster(&self.roster)?;
        scenario::validate_catalog(&self.catalog)
    }
}

/// The dispatch engine. Owns the world and all session state.
pub struct DispatchEngine {
    pub(crate) config: SimConfig,
    pub(crate) world: DispatchWorld,
    phase: SimPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
}

impl DispatchEngine {
    /// Create an engine without validating `config`.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: DispatchWorld::new(&config.roster),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            config,
        }
    }

    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by `wall_delta_ms` of timer time and return the resulting
    /// snapshot. While not running, simulated time stands still.
    pub fn tick(&mut self, wall_delta_ms: SimMillis) -> DispatchSnapshot {
        self.process_commands();

        let elapsed = self.world.clock.advance(wall_delta_ms);
        if self.phase == SimPhase::Running {
            self.run_systems(elapsed);
        }

        let events = std::mem::take(&mut self.world.events);
        systems::snapshot::build_snapshot(&self.world, self.phase, &self.config.dispatch, events)
    }

    /// Current read model, leaving pending events in place.
    pub fn snapshot(&self) -> DispatchSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.phase,
            &self.config.dispatch,
            self.world.events.clone(),
        )
    }

    /// Apply one command immediately at the current simulated time.
    pub fn handle_command(&mut self, command: PlayerCommand) {
        let config = &self.config.dispatch;
        match command {
            PlayerCommand::Start => {
                if self.phase != SimPhase::Running {
                    self.world.clock.resume();
                    self.phase = SimPhase::Running;
                    info!(at = self.world.now(), "simulation running");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.world.clock.pause();
                    self.phase = SimPhase::Paused;
                    info!(at = self.world.now(), "simulation paused");
                }
            }
            PlayerCommand::Reset => {
                self.world = DispatchWorld::new(&self.config.roster);
                self.phase = SimPhase::Ready;
                info!("simulation reset");
            }
            PlayerCommand::Assign {
                incident_id,
                unit_type,
            } => {
                dispatch::assign(&mut self.world, config, incident_id, unit_type);
            }
            PlayerCommand::Unassign {
                incident_id,
                unit_type,
                unit_id,
            } => {
                dispatch::unassign(&mut self.world, config, incident_id, unit_type, unit_id);
            }
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.world.clock.time()
    }

    pub fn now_ms(&self) -> SimMillis {
        self.world.now()
    }

    pub fn score(&self) -> ScoreView {
        self.world.score.view()
    }

    pub fn units(&self) -> &[Unit] {
        self.world.pool.units()
    }

    pub fn incidents(&self) -> &[Incident] {
        self.world.incidents.as_slice()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Dispatched units that have not arrived yet.
    pub fn pending_arrivals(&self) -> usize {
        self.world.arrivals.len()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, elapsed: SimMillis) {
        let config = &self.config.dispatch;
        // 1. Arrivals due by now, at their own fire times
        systems::arrivals::run(&mut self.world, config);
        // 2. Returns and releases, before any availability query
        systems::unit_release::run(&mut self.world, config);
        // 3. New incident reports
        systems::incident_spawner::run(
            &mut self.world,
            config,
            &self.config.catalog,
            &mut self.rng,
            elapsed,
        );
        // 4. Escalation and work progress
        systems::incident_progress::run(&mut self.world, config);
    }
}
