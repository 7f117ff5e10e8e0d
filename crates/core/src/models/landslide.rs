//! Landslide probability model
//!
//! Closed-form slope-failure score. Each driver contributes linearly up to a
//! critical threshold and with a power law above it:
//!
//! ```text
//! risk  = f(slope) + f(moisture) + f(rainfall) + historical * 0.4
//! risk *= 1 - vegetation / 200
//! probability = clamp(risk / 100, 0, 1) * 100
//! ```
//!
//! | driver   | threshold | above                       | at or below     |
//! |----------|-----------|-----------------------------|-----------------|
//! | slope    | 30°       | `(slope - 30)^1.8 * 0.4`    | `slope * 0.1`   |
//! | moisture | 70 %      | `(moisture - 70)^1.5 * 0.6` | `moisture * 0.2`|
//! | rainfall | 50 mm/h   | `(rainfall - 50)^1.3 * 0.8` | `rainfall * 0.3`|

use super::confidence::calculate_confidence;
use super::r#trait::RiskModel;
use super::result::{Factor, HazardResult};
use crate::core_types::{Hazard, Score};
use crate::features::LandslideFeatures;

/// Slope angle above which failure risk grows as a power law (°)
const CRITICAL_SLOPE: f64 = 30.0;
/// Soil moisture above which saturation dominates (%)
const CRITICAL_MOISTURE: f64 = 70.0;
/// Rainfall intensity above which runoff loading dominates (mm/h)
const CRITICAL_RAINFALL: f64 = 50.0;
/// Weight of the historical record
const HISTORICAL_WEIGHT: f64 = 0.4;
/// Vegetation share at which root reinforcement would cancel all risk (%)
const VEGETATION_FULL_PROTECTION: f64 = 200.0;
/// Raw risk mapped to 100 %
const RISK_SCALE: f64 = 100.0;

/// Landslide scorer (`landslide_prediction_v2.1`)
#[derive(Debug, Clone, Copy, Default)]
pub struct LandslideModel;

impl LandslideModel {
    /// Versioned model name
    pub const NAME: &'static str = "landslide_prediction_v2.1";

    /// Unnormalized risk before clamping
    #[must_use]
    pub fn raw_risk(features: &LandslideFeatures) -> f64 {
        let mut risk = slope_contribution(features.slope)
            + moisture_contribution(features.moisture)
            + rainfall_contribution(features.rainfall)
            + features.historical * HISTORICAL_WEIGHT;

        risk *= 1.0 - features.vegetation / VEGETATION_FULL_PROTECTION;
        risk
    }

    /// Probability in percent, unrounded
    #[must_use]
    pub fn probability(features: &LandslideFeatures) -> f64 {
        (Self::raw_risk(features) / RISK_SCALE).clamp(0.0, 1.0) * 100.0
    }
}

fn slope_contribution(slope: f64) -> f64 {
    if slope > CRITICAL_SLOPE {
        (slope - CRITICAL_SLOPE).powf(1.8) * 0.4
    } else {
        slope * 0.1
    }
}

fn moisture_contribution(moisture: f64) -> f64 {
    if moisture > CRITICAL_MOISTURE {
        (moisture - CRITICAL_MOISTURE).powf(1.5) * 0.6
    } else {
        moisture * 0.2
    }
}

fn rainfall_contribution(rainfall: f64) -> f64 {
    if rainfall > CRITICAL_RAINFALL {
        (rainfall - CRITICAL_RAINFALL).powf(1.3) * 0.8
    } else {
        rainfall * 0.3
    }
}

fn explanation(features: &LandslideFeatures, probability: f64) -> String {
    if probability > 80.0 {
        format!(
            "CRITICAL: Slope instability ({}°) combined with high soil moisture ({}%) and intense rainfall ({}mm/h) creates extreme landslide conditions.",
            features.slope, features.moisture, features.rainfall
        )
    } else if probability > 60.0 {
        "HIGH RISK: Steep terrain and saturated soil conditions favor landslide occurrence with current weather patterns.".to_string()
    } else {
        "MODERATE: Current conditions show elevated but manageable landslide risk factors."
            .to_string()
    }
}

impl RiskModel<LandslideFeatures, HazardResult> for LandslideModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, features: &LandslideFeatures) -> HazardResult {
        let probability = Self::probability(features);

        HazardResult {
            hazard: Hazard::Landslide,
            score: Score::from_percent(probability),
            confidence: calculate_confidence(features),
            factors: vec![
                Factor::new("slope", features.slope * 0.4),
                Factor::new("moisture", features.moisture * 0.6),
                Factor::new("rainfall", features.rainfall * 0.8),
                Factor::new("historical", features.historical * 0.4),
                Factor::new("vegetation", features.vegetation * 0.2),
            ],
            explanation: explanation(features, probability),
        }
    }
}
