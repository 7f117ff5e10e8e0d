//! Prediction engine
//!
//! [`PulseNetEngine`] owns the loaded model suite, the latest prediction per
//! location and the system-confidence value. Until models are loaded every
//! request is answered with a static default prediction that is never stored.
//!
//! Time-driven behaviour (drift and recalculation ticks) is advanced
//! explicitly through [`PulseNetEngine::advance`], or from a background thread
//! via [`BackgroundCycle`].

pub mod background;
pub mod config;
pub mod cycle;
pub mod prediction;
pub mod store;

pub use background::{BackgroundCycle, SharedEngine};
pub use config::{ConfigError, EngineConfig};
pub use cycle::{CycleTicks, UpdateCycle, MAX_CATCH_UP_TICKS};
pub use prediction::{Prediction, PredictionSource};
pub use store::PredictionStore;

use crate::core_types::{CurrentConditions, Location, Score};
use crate::features::extract_features;
use crate::models::{self, ModelBackend, ModelSuite};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Snapshot of engine readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    /// Whether a model suite is loaded
    pub loaded: bool,
    /// Number of loaded models (4 once loaded, 0 before)
    pub models_count: usize,
    /// Number of stored predictions
    pub predictions_count: usize,
    /// System confidence
    pub confidence: Score,
}

/// Disaster-risk prediction engine
pub struct PulseNetEngine {
    config: EngineConfig,
    models: Option<ModelSuite>,
    store: PredictionStore,
    /// System confidence, unrounded
    confidence: f64,
    rng: StdRng,
    cycle: UpdateCycle,
    drift_ticks: u64,
    recalculations: u64,
}

impl PulseNetEngine {
    /// Create an engine with no models loaded
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let cycle = UpdateCycle::new(config.drift_interval(), config.recalculation_interval());

        info!(
            "Creating PulseNet engine: backend={:?}, drift every {:?}, recalculation every {:?}",
            config.backend,
            config.drift_interval(),
            config.recalculation_interval()
        );

        Self {
            config,
            models: None,
            store: PredictionStore::new(),
            confidence: 0.0,
            rng,
            cycle,
            drift_ticks: 0,
            recalculations: 0,
        }
    }

    /// Create an engine and load its models immediately
    pub fn with_models(config: EngineConfig) -> Self {
        let mut engine = Self::new(config);
        engine.load_models();
        engine
    }

    /// Load the configured model suite
    ///
    /// Falls back to synthetic models when the configured suite cannot be
    /// built, so the engine is always ready afterwards.
    pub fn load_models(&mut self) {
        let suite = models::load_models(self.config.backend, self.config.weights);
        self.models = Some(suite);
    }

    /// Whether models are loaded
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.models.is_some()
    }

    /// Backend of the loaded suite, if any
    #[must_use]
    pub fn backend(&self) -> Option<ModelBackend> {
        self.models.as_ref().map(ModelSuite::backend)
    }

    /// Engine configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a location without touching the store
    ///
    /// Returns `None` when models are not loaded.
    #[must_use]
    pub fn score(
        &self,
        location: &Location,
        conditions: &CurrentConditions,
        timestamp: DateTime<Utc>,
    ) -> Option<Prediction> {
        let suite = self.models.as_ref()?;
        let features = extract_features(location, conditions);
        let hazards = suite.predict_hazards(&features);
        let ensemble = suite.predict_ensemble(&hazards);

        debug!(
            "Scored {}: landslide={} flood={} weather={} overall={}",
            location.name,
            hazards.landslide.score,
            hazards.flood.score,
            hazards.weather.score,
            ensemble.overall_risk
        );

        Some(Prediction::scored(location.clone(), timestamp, hazards, ensemble))
    }

    /// Predict for one location and store the result
    ///
    /// Before models are loaded this returns the default prediction for the
    /// location's risk label and stores nothing.
    pub fn predict_for_location(
        &mut self,
        location: &Location,
        conditions: &CurrentConditions,
    ) -> Prediction {
        let now = Utc::now();
        match self.score(location, conditions, now) {
            Some(prediction) => {
                self.store.insert(prediction.clone());
                prediction
            }
            None => {
                debug!("Models not loaded, default prediction for {}", location.name);
                Prediction::default_for(location, now)
            }
        }
    }

    /// Predict for many locations
    ///
    /// Scoring runs in parallel; results are stored in input order, so a name
    /// repeated in `requests` keeps its last prediction.
    pub fn predict_all(&mut self, requests: &[(Location, CurrentConditions)]) -> Vec<Prediction> {
        let now = Utc::now();
        if !self.is_ready() {
            return requests
                .iter()
                .map(|(location, _)| Prediction::default_for(location, now))
                .collect();
        }

        let predictions: Vec<Prediction> = requests
            .par_iter()
            .filter_map(|(location, conditions)| self.score(location, conditions, now))
            .collect();

        for prediction in &predictions {
            self.store.insert(prediction.clone());
        }
        info!("Batch prediction complete: {} locations", predictions.len());
        predictions
    }

    /// Stored prediction for a location, or its default prediction
    #[must_use]
    pub fn prediction_for(&self, location: &Location) -> Prediction {
        self.store
            .get(&location.name)
            .cloned()
            .unwrap_or_else(|| Prediction::default_for(location, Utc::now()))
    }

    /// Stored prediction by location name
    #[must_use]
    pub fn get_prediction(&self, name: &str) -> Option<&Prediction> {
        self.store.get(name)
    }

    /// All stored predictions in first-insertion order
    #[must_use]
    pub fn current_predictions(&self) -> Vec<Prediction> {
        self.store.iter().cloned().collect()
    }

    /// Read-only view of the store
    #[must_use]
    pub fn store(&self) -> &PredictionStore {
        &self.store
    }

    /// Drop every stored prediction
    pub fn clear_predictions(&mut self) {
        self.store.clear();
    }

    /// System confidence, rounded and clamped
    #[must_use]
    pub fn confidence(&self) -> Score {
        Score::from_percent(self.confidence)
    }

    /// Readiness snapshot
    #[must_use]
    pub fn model_status(&self) -> ModelStatus {
        ModelStatus {
            loaded: self.is_ready(),
            models_count: if self.is_ready() {
                ModelSuite::MODEL_COUNT
            } else {
                0
            },
            predictions_count: self.store.len(),
            confidence: self.confidence(),
        }
    }

    /// Number of drift ticks applied
    #[must_use]
    pub fn drift_ticks(&self) -> u64 {
        self.drift_ticks
    }

    /// Number of recalculation ticks run
    #[must_use]
    pub fn recalculations(&self) -> u64 {
        self.recalculations
    }

    /// Nudge system confidence and every stored overall risk
    ///
    /// No-op until models are loaded.
    pub fn drift_tick(&mut self) {
        if !self.is_ready() {
            return;
        }

        let down: f64 = self.rng.random();
        let up: f64 = self.rng.random();
        self.confidence =
            (self.confidence - down * 2.0 + up * 3.0).max(self.config.confidence_floor);

        let touched = self
            .store
            .apply_drift(&mut self.rng, self.config.drift_amplitude, Utc::now());
        self.drift_ticks += 1;

        info!(
            "Drift tick {}: confidence {:.1}%, {} predictions updated",
            self.drift_ticks, self.confidence, touched
        );
    }

    /// Periodic recalculation hook
    ///
    /// Stored predictions are not re-scored; the tick is logged and counted.
    pub fn recalculate_tick(&mut self) {
        self.recalculations += 1;
        info!(
            "Recalculation tick {}: {} predictions held",
            self.recalculations,
            self.store.len()
        );
    }

    /// Advance engine time by `dt`, running every tick that became due
    ///
    /// At most [`MAX_CATCH_UP_TICKS`] of each kind run per call; the returned
    /// counts are the ticks actually run.
    pub fn advance(&mut self, dt: Duration) -> CycleTicks {
        let ticks = self.cycle.advance(dt);
        for _ in 0..ticks.drift {
            self.drift_tick();
        }
        for _ in 0..ticks.recalculation {
            self.recalculate_tick();
        }
        ticks
    }
}

impl std::fmt::Debug for PulseNetEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseNetEngine")
            .field("backend", &self.backend())
            .field("predictions", &self.store.len())
            .field("confidence", &self.confidence)
            .finish_non_exhaustive()
    }
}
