//! Simulation constants and tuning parameters.

use crate::types::SimMillis;

/// Driver loop rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Nominal simulated milliseconds per driver tick.
pub const TICK_MS: SimMillis = 1000 / TICK_RATE as SimMillis;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

// --- Incident generation ---

/// A new incident is reported every this many milliseconds.
pub const SPAWN_INTERVAL_MS: SimMillis = 5_500;

/// Cap on open plus in-progress incidents.
pub const MAX_OPEN_INCIDENTS: u32 = 6;

// --- Timing ---

/// Work time once every required unit is on scene.
pub const BASE_RESOLVE_MS: SimMillis = 8_000;

/// One-way drive time between station and scene.
pub const TRAVEL_MS: SimMillis = 3_500;

/// Slack added to the resolve time when setting a deadline.
pub const DEADLINE_GRACE_MS: SimMillis = 10_000;

/// Upper bound (exclusive) of the random deadline jitter.
pub const DEADLINE_JITTER_MS: SimMillis = 10_000;

// --- Points ---

/// Awarded per dispatch, regardless of outcome.
pub const POINTS_ASSIGN: i64 = 5;

pub const POINTS_ON_TIME: i64 = 120;

pub const POINTS_SLOW_PENALTY: i64 = -80;

pub const POINTS_MISSED_PENALTY: i64 = -150;
