//! Constant-output fallback models
//!
//! Used when the analytic suite fails to load. Every prediction returns the
//! same fixed result regardless of input, so the engine keeps producing
//! well-formed predictions.

use super::r#trait::RiskModel;
use super::result::{EnsembleResult, HazardOutputs, HazardResult};
use crate::alerts::{recommendation, timeframe};
use crate::core_types::{Hazard, Score};

/// Constant hazard scorer
#[derive(Debug, Clone, Copy)]
pub struct SyntheticHazardModel {
    hazard: Hazard,
    score: Score,
    confidence: Score,
}

impl SyntheticHazardModel {
    /// Fallback landslide scorer (85 / 94)
    #[must_use]
    pub const fn landslide() -> Self {
        Self {
            hazard: Hazard::Landslide,
            score: Score::new(85),
            confidence: Score::new(94),
        }
    }

    /// Fallback flood scorer (72 / 89)
    #[must_use]
    pub const fn flood() -> Self {
        Self {
            hazard: Hazard::Flood,
            score: Score::new(72),
            confidence: Score::new(89),
        }
    }

    /// Fallback weather scorer (68 / 91)
    #[must_use]
    pub const fn weather() -> Self {
        Self {
            hazard: Hazard::Weather,
            score: Score::new(68),
            confidence: Score::new(91),
        }
    }
}

impl<I> RiskModel<I, HazardResult> for SyntheticHazardModel {
    fn name(&self) -> &str {
        match self.hazard {
            Hazard::Landslide => "synthetic_landslide",
            Hazard::Flood => "synthetic_flood",
            Hazard::Weather => "synthetic_weather",
        }
    }

    fn predict(&self, _input: &I) -> HazardResult {
        HazardResult {
            hazard: self.hazard,
            score: self.score,
            confidence: self.confidence,
            factors: Vec::new(),
            explanation: format!("Synthetic {} model output.", self.hazard),
        }
    }
}

/// Constant ensemble (78 / 91)
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticEnsembleModel;

impl SyntheticEnsembleModel {
    /// Fixed overall risk
    pub const OVERALL_RISK: Score = Score::new(78);
    /// Fixed confidence
    pub const CONFIDENCE: Score = Score::new(91);
}

impl RiskModel<HazardOutputs, EnsembleResult> for SyntheticEnsembleModel {
    fn name(&self) -> &str {
        "synthetic_ensemble"
    }

    fn predict(&self, _outputs: &HazardOutputs) -> EnsembleResult {
        let risk = Self::OVERALL_RISK.as_f64();
        EnsembleResult {
            overall_risk: Self::OVERALL_RISK,
            confidence: Self::CONFIDENCE,
            primary_threat: Hazard::Landslide,
            recommendation: recommendation(risk).to_string(),
            timeframe: timeframe(risk).to_string(),
            explanation: "Synthetic ensemble output; analytic models unavailable.".to_string(),
        }
    }
}
