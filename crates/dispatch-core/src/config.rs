//! Tunable dispatch parameters.
//!
//! Defaults come from [`crate::constants`]. Every field may be overridden
//! from JSON; missing fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::SimMillis;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Point deltas applied by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointValues {
    pub assign: i64,
    pub on_time: i64,
    pub slow_penalty: i64,
    pub missed_penalty: i64,
}

impl Default for PointValues {
    fn default() -> Self {
        Self {
            assign: POINTS_ASSIGN,
            on_time: POINTS_ON_TIME,
            slow_penalty: POINTS_SLOW_PENALTY,
            missed_penalty: POINTS_MISSED_PENALTY,
        }
    }
}

/// Timing constants, capacity and point values for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub spawn_interval_ms: SimMillis,
    pub base_resolve_ms: SimMillis,
    pub travel_ms: SimMillis,
    pub deadline_grace_ms: SimMillis,
    /// Exclusive upper bound; zero disables jitter.
    pub deadline_jitter_ms: SimMillis,
    pub max_open_incidents: u32,
    pub points: PointValues,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            base_resolve_ms: BASE_RESOLVE_MS,
            travel_ms: TRAVEL_MS,
            deadline_grace_ms: DEADLINE_GRACE_MS,
            deadline_jitter_ms: DEADLINE_JITTER_MS,
            max_open_incidents: MAX_OPEN_INCIDENTS,
            points: PointValues::default(),
        }
    }
}

impl DispatchConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ms == 0 {
            return Err(invalid("spawn_interval_ms", "must be greater than zero"));
        }
        // Progress is work time divided by this, and deadlines must lie
        // strictly after creation.
        if self.base_resolve_ms == 0 {
            return Err(invalid("base_resolve_ms", "must be greater than zero"));
        }
        if self.max_open_incidents == 0 {
            return Err(invalid("max_open_incidents", "must be greater than zero"));
        }
        Ok(())
    }

    /// On-scene work plus the drive back.
    pub fn on_scene_commitment_ms(&self) -> SimMillis {
        self.base_resolve_ms + self.travel_ms
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
