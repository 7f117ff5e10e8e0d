//! Feature extraction
//!
//! Maps a `(Location, CurrentConditions)` pair onto one fixed-shape feature
//! bundle per hazard model. Missing readings take the defaults below; slope,
//! drainage, topography, urbanization and vegetation are proxies derived from
//! static location attributes, not measurements.
//!
//! Extraction never fails.

pub mod historical;

pub use historical::{historical_risk, DEFAULT_HISTORICAL_RISK};

use crate::core_types::{CurrentConditions, Hazard, Location};
use serde::{Deserialize, Serialize};

// ============================================================================
// READING DEFAULTS
// ============================================================================

/// Rainfall when no reading is supplied (mm/hr)
pub const DEFAULT_RAINFALL: f64 = 127.0;
/// River level when no reading is supplied (% capacity)
pub const DEFAULT_RIVER_LEVEL: f64 = 85.0;
/// Humidity / soil moisture when no reading is supplied (%)
pub const DEFAULT_HUMIDITY: f64 = 87.0;
/// Pressure when no reading is supplied (mb)
pub const DEFAULT_PRESSURE: f64 = 1008.0;
/// Temperature when no reading is supplied (°C)
pub const DEFAULT_TEMPERATURE: f64 = 18.5;
/// Wind speed when no reading is supplied (km/h)
pub const DEFAULT_WIND_SPEED: f64 = 45.0;
/// Cloud cover when no reading is supplied (%)
pub const DEFAULT_CLOUD_COVER: f64 = 95.0;

// ============================================================================
// PROXY THRESHOLDS
// ============================================================================

/// Above this elevation terrain counts as steep and high (m)
const HIGH_ELEVATION_M: f64 = 2000.0;
/// Below this elevation drainage counts as poor (m)
const LOW_ELEVATION_M: f64 = 1000.0;
/// Above this population a location counts as urbanized
const URBAN_POPULATION: u64 = 10_000;
/// The one location with stripped slope vegetation
const DEFORESTED_LOCATION: &str = "Kedarnath";

/// Number of named inputs in a feature bundle
///
/// The shared confidence rule keys off this count.
pub trait FeatureBundle {
    /// Number of named numeric inputs in the bundle
    fn field_count(&self) -> usize;
}

/// Inputs to the landslide scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandslideFeatures {
    /// Slope angle proxy (°)
    pub slope: f64,
    /// Soil moisture (%), read from humidity
    pub moisture: f64,
    /// Rainfall intensity (mm/hr)
    pub rainfall: f64,
    /// Historical landslide risk (0-100)
    pub historical: f64,
    /// Vegetation coverage (%)
    pub vegetation: f64,
}

impl FeatureBundle for LandslideFeatures {
    fn field_count(&self) -> usize {
        5
    }
}

/// Inputs to the flash-flood scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodFeatures {
    /// Rainfall intensity (mm/hr)
    pub rainfall: f64,
    /// River level (% capacity)
    pub river_level: f64,
    /// Drainage capacity proxy (0-100)
    pub drainage: f64,
    /// Topography steepness proxy (0-100)
    pub topography: f64,
    /// Urbanization proxy (0-100)
    pub urbanization: f64,
}

impl FeatureBundle for FloodFeatures {
    fn field_count(&self) -> usize {
        5
    }
}

/// Inputs to the severe-weather scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherFeatures {
    /// Barometric pressure (mb)
    pub pressure: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Cloud cover (%)
    pub cloud_cover: f64,
}

impl FeatureBundle for WeatherFeatures {
    fn field_count(&self) -> usize {
        5
    }
}

/// One feature bundle per hazard model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Landslide model inputs
    pub landslide: LandslideFeatures,
    /// Flood model inputs
    pub flood: FloodFeatures,
    /// Weather model inputs
    pub weather: WeatherFeatures,
}

/// Extract the three feature bundles for a location under current conditions
///
/// # Example
/// ```
/// use pulsenet_core::core_types::{CurrentConditions, Location, RiskLevel};
/// use pulsenet_core::features::extract_features;
///
/// let kedarnath = Location::new("Kedarnath", 30.7346, 79.0669, 3583.0, 1500, RiskLevel::Critical);
/// let features = extract_features(&kedarnath, &CurrentConditions::empty());
///
/// assert_eq!(features.landslide.slope, 45.0);
/// assert_eq!(features.landslide.historical, 95.0);
/// assert_eq!(features.flood.rainfall, 127.0);
/// ```
#[must_use]
pub fn extract_features(location: &Location, conditions: &CurrentConditions) -> FeatureSet {
    let rainfall = conditions.rainfall.unwrap_or(DEFAULT_RAINFALL);
    let humidity = conditions.humidity.unwrap_or(DEFAULT_HUMIDITY);
    let high_ground = location.elevation > HIGH_ELEVATION_M;

    let landslide = LandslideFeatures {
        slope: if high_ground { 45.0 } else { 25.0 },
        moisture: humidity,
        rainfall,
        historical: f64::from(historical_risk(&location.name, Hazard::Landslide)),
        vegetation: if location.name == DEFORESTED_LOCATION {
            20.0
        } else {
            60.0
        },
    };

    let flood = FloodFeatures {
        rainfall,
        river_level: conditions.river_level.unwrap_or(DEFAULT_RIVER_LEVEL),
        drainage: if location.elevation < LOW_ELEVATION_M {
            40.0
        } else {
            70.0
        },
        topography: if high_ground { 35.0 } else { 15.0 },
        urbanization: if location.population > URBAN_POPULATION {
            60.0
        } else {
            20.0
        },
    };

    let weather = WeatherFeatures {
        pressure: conditions.pressure.unwrap_or(DEFAULT_PRESSURE),
        humidity,
        temperature: conditions.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        wind_speed: conditions.wind_speed.unwrap_or(DEFAULT_WIND_SPEED),
        cloud_cover: conditions.cloud_cover.unwrap_or(DEFAULT_CLOUD_COVER),
    };

    FeatureSet {
        landslide,
        flood,
        weather,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::RiskLevel;

    fn location(name: &str, elevation: f64, population: u64) -> Location {
        Location::new(name, 30.0, 79.0, elevation, population, RiskLevel::High)
    }

    #[test]
    fn test_defaults_fill_missing_readings() {
        let features =
            extract_features(&location("Badrinath", 3133.0, 2000), &CurrentConditions::empty());

        assert_eq!(features.landslide.moisture, DEFAULT_HUMIDITY);
        assert_eq!(features.landslide.rainfall, DEFAULT_RAINFALL);
        assert_eq!(features.flood.river_level, DEFAULT_RIVER_LEVEL);
        assert_eq!(features.weather.pressure, DEFAULT_PRESSURE);
        assert_eq!(features.weather.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(features.weather.wind_speed, DEFAULT_WIND_SPEED);
        assert_eq!(features.weather.cloud_cover, DEFAULT_CLOUD_COVER);
    }

    #[test]
    fn test_explicit_zero_reading_is_kept() {
        let conditions = CurrentConditions::empty().with_rainfall(0.0).with_humidity(0.0);
        let features = extract_features(&location("Badrinath", 3133.0, 2000), &conditions);

        assert_eq!(features.landslide.rainfall, 0.0);
        assert_eq!(features.flood.rainfall, 0.0);
        assert_eq!(features.landslide.moisture, 0.0);
        assert_eq!(features.weather.humidity, 0.0);
    }

    #[test]
    fn test_elevation_proxies() {
        let high = extract_features(&location("Hemkund", 4329.0, 500), &CurrentConditions::empty());
        assert_eq!(high.landslide.slope, 45.0);
        assert_eq!(high.flood.topography, 35.0);
        assert_eq!(high.flood.drainage, 70.0);

        let mid =
            extract_features(&location("Joshimath", 1890.0, 8000), &CurrentConditions::empty());
        assert_eq!(mid.landslide.slope, 25.0);
        assert_eq!(mid.flood.topography, 15.0);
        assert_eq!(mid.flood.drainage, 70.0);

        let low =
            extract_features(&location("Haridwar", 314.0, 228_832), &CurrentConditions::empty());
        assert_eq!(low.flood.drainage, 40.0);
    }

    #[test]
    fn test_elevation_thresholds_are_strict() {
        let at_2000 =
            extract_features(&location("Ridge", 2000.0, 100), &CurrentConditions::empty());
        assert_eq!(at_2000.landslide.slope, 25.0);

        let at_1000 =
            extract_features(&location("Terrace", 1000.0, 100), &CurrentConditions::empty());
        assert_eq!(at_1000.flood.drainage, 70.0);
    }

    #[test]
    fn test_urbanization_and_vegetation() {
        let city =
            extract_features(&location("Dehradun", 640.0, 578_420), &CurrentConditions::empty());
        assert_eq!(city.flood.urbanization, 60.0);
        assert_eq!(city.landslide.vegetation, 60.0);

        let town = extract_features(&location("Town", 640.0, 10_000), &CurrentConditions::empty());
        assert_eq!(town.flood.urbanization, 20.0);

        let kedarnath =
            extract_features(&location("Kedarnath", 3583.0, 1500), &CurrentConditions::empty());
        assert_eq!(kedarnath.landslide.vegetation, 20.0);
        assert_eq!(kedarnath.landslide.historical, 95.0);
    }

    #[test]
    fn test_humidity_feeds_both_moisture_and_weather() {
        let conditions = CurrentConditions::empty().with_humidity(64.0);
        let features = extract_features(&location("Gangotri", 3100.0, 1200), &conditions);
        assert_eq!(features.landslide.moisture, 64.0);
        assert_eq!(features.weather.humidity, 64.0);
    }

    #[test]
    fn test_every_bundle_has_five_fields() {
        let features =
            extract_features(&location("Gangotri", 3100.0, 1200), &CurrentConditions::empty());
        assert_eq!(features.landslide.field_count(), 5);
        assert_eq!(features.flood.field_count(), 5);
        assert_eq!(features.weather.field_count(), 5);
    }
}
