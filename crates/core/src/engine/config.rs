//! Engine configuration
//!
//! Defaults reproduce the reference deployment: analytic models, 0.4 / 0.35 /
//! 0.25 ensemble weights, a 30 s drift tick and a 5 min recalculation tick.
//! Any field may be omitted from a JSON config file.

use crate::models::{EnsembleWeights, ModelBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for [`super::PulseNetEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model family to load
    pub backend: ModelBackend,
    /// Ensemble weights (validated at model load)
    pub weights: EnsembleWeights,
    /// Interval between drift ticks (ms); 0 disables drift
    pub drift_interval_ms: u64,
    /// Interval between recalculation ticks (ms); 0 disables them
    pub recalculation_interval_ms: u64,
    /// Maximum absolute drift applied to a stored overall risk per tick
    pub drift_amplitude: f64,
    /// Lower bound of the system confidence after a drift tick
    pub confidence_floor: f64,
    /// Seed for the drift RNG; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::Analytic,
            weights: EnsembleWeights::default(),
            drift_interval_ms: 30_000,
            recalculation_interval_ms: 300_000,
            drift_amplitude: 2.0,
            confidence_floor: 85.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a fixed drift seed
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Same configuration using the given backend
    pub fn with_backend(mut self, backend: ModelBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Drift tick interval
    #[must_use]
    pub fn drift_interval(&self) -> Duration {
        Duration::from_millis(self.drift_interval_ms)
    }

    /// Recalculation tick interval
    #[must_use]
    pub fn recalculation_interval(&self) -> Duration {
        Duration::from_millis(self.recalculation_interval_ms)
    }

    /// Parse a configuration from JSON
    ///
    /// # Errors
    /// Returns [`ConfigError::ParseFailed`] if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load a configuration file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed(e.to_string()))?;
        Self::from_json_str(&contents)
    }
}

/// Errors reading an engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the file
    ReadFailed(String),
    /// Failed to parse the contents
    ParseFailed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadFailed(msg) => write!(f, "Failed to read config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
