//! Flash-flood probability model
//!
//! ```text
//! risk  = g(rainfall) + g(river_level)
//! risk *= 1 - drainage / 150
//! risk += h(topography) + urbanization * 0.3
//! probability = clamp(risk / 80, 0, 1) * 100
//! ```
//!
//! Drainage only attenuates the water-volume terms; terrain and sealed
//! surfaces add on top of the attenuated value.

use super::confidence::calculate_confidence;
use super::r#trait::RiskModel;
use super::result::{Factor, HazardResult};
use crate::core_types::{Hazard, Score};
use crate::features::FloodFeatures;

/// Rainfall above which runoff grows as a power law (mm/h)
const CRITICAL_RAINFALL: f64 = 75.0;
/// River level above which overtopping grows as a power law (% capacity)
const CRITICAL_RIVER_LEVEL: f64 = 80.0;
/// Drainage value at which all water-volume risk would be carried away
const DRAINAGE_FULL_CAPACITY: f64 = 150.0;
/// Topography above which the steeper multiplier applies
const STEEP_TOPOGRAPHY: f64 = 20.0;
/// Weight of the urbanization proxy
const URBANIZATION_WEIGHT: f64 = 0.3;
/// Raw risk mapped to 100 %
const RISK_SCALE: f64 = 80.0;

/// Flash-flood scorer (`flash_flood_v1.9`)
#[derive(Debug, Clone, Copy, Default)]
pub struct FloodModel;

impl FloodModel {
    /// Versioned model name
    pub const NAME: &'static str = "flash_flood_v1.9";

    /// Unnormalized risk before clamping
    #[must_use]
    pub fn raw_risk(features: &FloodFeatures) -> f64 {
        let mut risk =
            rainfall_contribution(features.rainfall) + river_contribution(features.river_level);

        risk *= 1.0 - features.drainage / DRAINAGE_FULL_CAPACITY;
        risk += topography_contribution(features.topography)
            + features.urbanization * URBANIZATION_WEIGHT;
        risk
    }

    /// Probability in percent, unrounded
    #[must_use]
    pub fn probability(features: &FloodFeatures) -> f64 {
        (Self::raw_risk(features) / RISK_SCALE).clamp(0.0, 1.0) * 100.0
    }
}

fn rainfall_contribution(rainfall: f64) -> f64 {
    if rainfall > CRITICAL_RAINFALL {
        (rainfall - CRITICAL_RAINFALL).powf(1.4) * 0.7
    } else {
        rainfall * 0.4
    }
}

fn river_contribution(river_level: f64) -> f64 {
    if river_level > CRITICAL_RIVER_LEVEL {
        (river_level - CRITICAL_RIVER_LEVEL).powf(1.6) * 0.9
    } else {
        river_level * 0.3
    }
}

fn topography_contribution(topography: f64) -> f64 {
    if topography > STEEP_TOPOGRAPHY {
        topography * 0.5
    } else {
        topography * 0.2
    }
}

fn explanation(features: &FloodFeatures, probability: f64) -> String {
    if probability > 75.0 {
        format!(
            "CRITICAL: Extreme rainfall ({}mm/h) with river levels at {}% capacity exceeds flood threshold.",
            features.rainfall, features.river_level
        )
    } else if probability > 50.0 {
        "HIGH RISK: Heavy precipitation and elevated river levels create significant flash flood potential.".to_string()
    } else {
        "MODERATE: Current water levels and drainage capacity can handle present conditions."
            .to_string()
    }
}

impl RiskModel<FloodFeatures, HazardResult> for FloodModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, features: &FloodFeatures) -> HazardResult {
        let probability = Self::probability(features);

        HazardResult {
            hazard: Hazard::Flood,
            score: Score::from_percent(probability),
            confidence: calculate_confidence(features),
            factors: vec![
                Factor::new("rainfall", features.rainfall * 0.7),
                Factor::new("riverLevel", features.river_level * 0.9),
                Factor::new("drainage", (100.0 - features.drainage) * 0.5),
                Factor::new("topography", features.topography * 0.4),
                Factor::new("urbanization", features.urbanization * 0.3),
            ],
            explanation: explanation(features, probability),
        }
    }
}
