//! Severe-weather severity model
//!
//! ```text
//! severity = p(pressure) + q(humidity) + |temperature - 20| * 0.8
//!          + w(wind_speed) + cloud_cover * 0.6
//! risk_level = clamp(severity / 50, 0, 1) * 100
//! ```
//!
//! Pressure only contributes once it drops below 1010 mb.

use super::confidence::calculate_confidence;
use super::r#trait::RiskModel;
use super::result::{Factor, HazardResult};
use crate::core_types::{Hazard, Score};
use crate::features::WeatherFeatures;

/// Pressure below which a low-pressure system contributes (mb)
const LOW_PRESSURE: f64 = 1010.0;
/// Humidity above which saturation contributes steeply (%)
const SATURATED_HUMIDITY: f64 = 85.0;
/// Temperature with no gradient contribution (°C)
const NEUTRAL_TEMPERATURE: f64 = 20.0;
/// Wind speed above which gust loading grows as a power law (km/h)
const GALE_WIND_SPEED: f64 = 40.0;
/// Standard sea-level pressure used by the factor breakdown (mb)
const STANDARD_PRESSURE: f64 = 1013.0;
/// Severity mapped to 100 %
const SEVERITY_SCALE: f64 = 50.0;

/// Severe-weather scorer (`weather_pattern_v3.0`)
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherModel;

impl WeatherModel {
    /// Versioned model name
    pub const NAME: &'static str = "weather_pattern_v3.0";

    /// Unnormalized severity before clamping
    #[must_use]
    pub fn raw_severity(features: &WeatherFeatures) -> f64 {
        pressure_contribution(features.pressure)
            + humidity_contribution(features.humidity)
            + (features.temperature - NEUTRAL_TEMPERATURE).abs() * 0.8
            + wind_contribution(features.wind_speed)
            + features.cloud_cover * 0.6
    }

    /// Risk level in percent, unrounded
    #[must_use]
    pub fn risk_level(features: &WeatherFeatures) -> f64 {
        (Self::raw_severity(features) / SEVERITY_SCALE).clamp(0.0, 1.0) * 100.0
    }
}

fn pressure_contribution(pressure: f64) -> f64 {
    if pressure < LOW_PRESSURE {
        (LOW_PRESSURE - pressure).powf(1.2) * 2.0
    } else {
        0.0
    }
}

fn humidity_contribution(humidity: f64) -> f64 {
    if humidity > SATURATED_HUMIDITY {
        (humidity - SATURATED_HUMIDITY) * 1.5
    } else {
        humidity * 0.2
    }
}

fn wind_contribution(wind_speed: f64) -> f64 {
    if wind_speed > GALE_WIND_SPEED {
        (wind_speed - GALE_WIND_SPEED).powf(1.1) * 1.2
    } else {
        wind_speed * 0.3
    }
}

fn explanation(features: &WeatherFeatures, severity: f64) -> String {
    if severity > 70.0 {
        format!(
            "SEVERE: Low pressure system ({}mb) with high winds ({}kmh) indicates dangerous weather development.",
            features.pressure, features.wind_speed
        )
    } else {
        "MONITORING: Weather conditions show patterns requiring continued observation."
            .to_string()
    }
}

impl RiskModel<WeatherFeatures, HazardResult> for WeatherModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn predict(&self, features: &WeatherFeatures) -> HazardResult {
        let risk_level = Self::risk_level(features);

        HazardResult {
            hazard: Hazard::Weather,
            score: Score::from_percent(risk_level),
            confidence: calculate_confidence(features),
            factors: vec![
                Factor::new("pressure", (STANDARD_PRESSURE - features.pressure) * 2.0),
                Factor::new("humidity", features.humidity * 0.8),
                Factor::new(
                    "temperature",
                    (features.temperature - NEUTRAL_TEMPERATURE).abs() * 0.8,
                ),
                Factor::new("windSpeed", features.wind_speed * 0.6),
                Factor::new("cloudCover", features.cloud_cover * 0.6),
            ],
            explanation: explanation(features, risk_level),
        }
    }
}
