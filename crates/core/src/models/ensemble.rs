//! Weighted ensemble over the three hazard scorers
//!
//! `overall_risk` and `confidence` are convex combinations of the hazard
//! scores and confidences. Recommendation and timeframe are banded on the
//! unrounded weighted risk; the stored `overall_risk` is the rounded value.

use super::r#trait::RiskModel;
use super::result::{EnsembleResult, HazardOutputs};
use super::ModelLoadError;
use crate::alerts::{recommendation, timeframe};
use crate::core_types::{Hazard, Score};
use serde::{Deserialize, Serialize};

/// Allowed deviation of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-hazard ensemble weights
///
/// Applied to both risk and confidence. Must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    /// Landslide weight
    pub landslide: f64,
    /// Flood weight
    pub flood: f64,
    /// Weather weight
    pub weather: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            landslide: 0.4,
            flood: 0.35,
            weather: 0.25,
        }
    }
}

impl EnsembleWeights {
    /// Weight for a hazard
    #[must_use]
    pub fn weight(&self, hazard: Hazard) -> f64 {
        match hazard {
            Hazard::Landslide => self.landslide,
            Hazard::Flood => self.flood,
            Hazard::Weather => self.weather,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.landslide + self.flood + self.weather
    }

    /// Check the weights form a convex combination
    ///
    /// # Errors
    /// Returns [`ModelLoadError::NegativeWeight`] for a negative or NaN weight,
    /// or [`ModelLoadError::InvalidWeightSum`] when the sum is not 1.0.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        for hazard in Hazard::ALL {
            let weight = self.weight(hazard);
            if weight.is_nan() || weight < 0.0 {
                return Err(ModelLoadError::NegativeWeight { hazard, weight });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ModelLoadError::InvalidWeightSum { sum });
        }
        Ok(())
    }

    /// Weighted sum of one value per hazard
    fn combine(&self, value: impl Fn(Hazard) -> Score) -> f64 {
        value(Hazard::Landslide).as_f64() * self.landslide
            + value(Hazard::Flood).as_f64() * self.flood
            + value(Hazard::Weather).as_f64() * self.weather
    }
}

/// Hazard with the strictly largest score; ties go to the earlier hazard in
/// [`Hazard::ALL`] order (landslide, flood, weather)
#[must_use]
pub fn determine_primary_threat(outputs: &HazardOutputs) -> Hazard {
    let mut primary = Hazard::Landslide;
    for hazard in Hazard::ALL {
        if outputs.score(hazard) > outputs.score(primary) {
            primary = hazard;
        }
    }
    primary
}

/// Summary sentence for an ensemble result
#[must_use]
pub fn ensemble_explanation(primary_threat: Hazard, overall_risk: Score) -> String {
    format!(
        "AI Analysis: {} poses the primary threat ({}% overall risk). Multiple factors converging require immediate attention.",
        primary_threat.label(),
        *overall_risk
    )
}

/// Ensemble combiner (`ensemble_disaster_v4.2`)
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleModel {
    weights: EnsembleWeights,
}

impl EnsembleModel {
    /// Versioned model name
    pub const NAME: &'static str = "ensemble_disaster_v4.2";

    /// Create an ensemble with validated weights
    ///
    /// # Errors
    /// Returns the validation error when `weights` are not a convex combination.
    pub fn new(weights: EnsembleWeights) -> Result<Self, ModelLoadError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Weights in use
    #[must_use]
    pub fn weights(&self) -> EnsembleWeights {
        self.weights
    }

    /// Unrounded weighted risk
    #[must_use]
    pub fn weighted_risk(&self, outputs: &HazardOutputs) -> f64 {
        self.weights.combine(|hazard| outputs.score(hazard))
    }

    /// Unrounded weighted confidence
    #[must_use]
    pub fn weighted_confidence(&self, outputs: &HazardOutputs) -> f64 {
        self.weights.combine(|hazard| outputs.get(hazard).confidence)
    }
}

impl RiskModel<HazardOutputs, EnsembleResult> for EnsembleModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, outputs: &HazardOutputs) -> EnsembleResult {
        let risk = self.weighted_risk(outputs);
        let overall_risk = Score::from_percent(risk);
        let primary_threat = determine_primary_threat(outputs);

        EnsembleResult {
            overall_risk,
            confidence: Score::from_percent(self.weighted_confidence(outputs)),
            primary_threat,
            recommendation: recommendation(risk).to_string(),
            timeframe: timeframe(risk).to_string(),
            explanation: ensemble_explanation(primary_threat, overall_risk),
        }
    }
}
