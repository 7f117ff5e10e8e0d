//! Hazard scoring models
//!
//! Four concrete models sit behind the [`RiskModel`] capability trait:
//! landslide, flood and weather scorers, plus the ensemble combiner. A
//! [`ModelSuite`] bundles one of each and is built by [`load_models`], which
//! falls back to constant synthetic models when the analytic suite cannot be
//! loaded.

pub mod confidence;
pub mod ensemble;
pub mod flood;
pub mod landslide;
pub mod result;
pub mod synthetic;
mod r#trait;
pub mod weather;

pub use confidence::calculate_confidence;
pub use ensemble::{determine_primary_threat, EnsembleModel, EnsembleWeights};
pub use flood::FloodModel;
pub use landslide::LandslideModel;
pub use r#trait::RiskModel;
pub use result::{EnsembleResult, Factor, HazardOutputs, HazardResult};
pub use synthetic::{SyntheticEnsembleModel, SyntheticHazardModel};
pub use weather::WeatherModel;

use crate::core_types::Hazard;
use crate::features::{FeatureSet, FloodFeatures, LandslideFeatures, WeatherFeatures};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Which model family the engine should load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// Closed-form scoring formulas
    #[default]
    Analytic,
    /// Constant-output fallback models
    Synthetic,
}

/// Why the analytic suite could not be loaded
#[derive(Debug, Clone, PartialEq)]
pub enum ModelLoadError {
    /// Ensemble weights do not sum to 1.0
    InvalidWeightSum {
        /// Actual sum
        sum: f64,
    },
    /// An ensemble weight is negative or NaN
    NegativeWeight {
        /// Offending hazard
        hazard: Hazard,
        /// Offending weight
        weight: f64,
    },
}

impl fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelLoadError::InvalidWeightSum { sum } => {
                write!(f, "Ensemble weights must sum to 1.0, got {sum}")
            }
            ModelLoadError::NegativeWeight { hazard, weight } => {
                write!(f, "Ensemble weight for {hazard} must be non-negative, got {weight}")
            }
        }
    }
}

impl std::error::Error for ModelLoadError {}

/// Outcome of an attempt to load the analytic suite
///
/// Mirrors the split between "loaded" and "failed, fall back" so the caller
/// decides how loudly to report the failure.
#[derive(Debug)]
pub enum ModelLoadResult {
    /// Suite ready to use
    Loaded(ModelSuite),
    /// A model could not be constructed
    Failed {
        /// Name of the model that failed
        model: String,
        /// Why it failed
        error: ModelLoadError,
    },
}

/// One scorer per hazard plus the ensemble combiner
pub struct ModelSuite {
    backend: ModelBackend,
    landslide: Box<dyn RiskModel<LandslideFeatures, HazardResult>>,
    flood: Box<dyn RiskModel<FloodFeatures, HazardResult>>,
    weather: Box<dyn RiskModel<WeatherFeatures, HazardResult>>,
    ensemble: Box<dyn RiskModel<HazardOutputs, EnsembleResult>>,
}

impl fmt::Debug for ModelSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSuite")
            .field("backend", &self.backend)
            .field("models", &self.model_names())
            .finish()
    }
}

impl ModelSuite {
    /// Number of models in every suite
    pub const MODEL_COUNT: usize = 4;

    /// Analytic suite with the given ensemble weights
    ///
    /// # Errors
    /// Returns the weight validation error when the weights are not convex.
    pub fn analytic(weights: EnsembleWeights) -> Result<Self, ModelLoadError> {
        Ok(Self {
            backend: ModelBackend::Analytic,
            landslide: Box::new(LandslideModel),
            flood: Box::new(FloodModel),
            weather: Box::new(WeatherModel),
            ensemble: Box::new(EnsembleModel::new(weights)?),
        })
    }

    /// Constant-output fallback suite
    #[must_use]
    pub fn synthetic() -> Self {
        Self {
            backend: ModelBackend::Synthetic,
            landslide: Box::new(SyntheticHazardModel::landslide()),
            flood: Box::new(SyntheticHazardModel::flood()),
            weather: Box::new(SyntheticHazardModel::weather()),
            ensemble: Box::new(SyntheticEnsembleModel),
        }
    }

    /// Backend this suite was built from
    #[must_use]
    pub fn backend(&self) -> ModelBackend {
        self.backend
    }

    /// Model names in landslide, flood, weather, ensemble order
    #[must_use]
    pub fn model_names(&self) -> [&str; 4] {
        [
            self.landslide.name(),
            self.flood.name(),
            self.weather.name(),
            self.ensemble.name(),
        ]
    }

    /// Run the three hazard scorers on their bundles
    #[must_use]
    pub fn predict_hazards(&self, features: &FeatureSet) -> HazardOutputs {
        HazardOutputs {
            landslide: self.landslide.predict(&features.landslide),
            flood: self.flood.predict(&features.flood),
            weather: self.weather.predict(&features.weather),
        }
    }

    /// Combine hazard results into the ensemble result
    #[must_use]
    pub fn predict_ensemble(&self, outputs: &HazardOutputs) -> EnsembleResult {
        self.ensemble.predict(outputs)
    }
}

/// Try to build the suite for `backend` without falling back
pub fn try_load_models(backend: ModelBackend, weights: EnsembleWeights) -> ModelLoadResult {
    match backend {
        ModelBackend::Synthetic => ModelLoadResult::Loaded(ModelSuite::synthetic()),
        ModelBackend::Analytic => match ModelSuite::analytic(weights) {
            Ok(suite) => ModelLoadResult::Loaded(suite),
            Err(error) => ModelLoadResult::Failed {
                model: EnsembleModel::NAME.to_string(),
                error,
            },
        },
    }
}

/// Build the suite for `backend`, falling back to synthetic models on failure
///
/// Never fails; a load failure is logged and the synthetic suite is returned.
pub fn load_models(backend: ModelBackend, weights: EnsembleWeights) -> ModelSuite {
    match try_load_models(backend, weights) {
        ModelLoadResult::Loaded(suite) => {
            info!(
                "Models loaded ({:?}): {}",
                suite.backend(),
                suite.model_names().join(", ")
            );
            suite
        }
        ModelLoadResult::Failed { model, error } => {
            warn!("Failed to load {model}: {error}. Using synthetic models");
            ModelSuite::synthetic()
        }
    }
}
