//! Current environmental readings supplied with each prediction request

use serde::{Deserialize, Serialize};

/// Live readings for a location
///
/// Every field is optional. Missing readings receive model-specific defaults
/// during feature extraction; a present reading is always used as-is, including
/// an explicit zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Rainfall intensity (mm/hr)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
    /// River level as a share of channel capacity (0-100 %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub river_level: Option<f64>,
    /// Relative humidity (0-100 %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Barometric pressure (mb)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Air temperature (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Wind speed (km/h)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Cloud cover (0-100 %)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
}

impl CurrentConditions {
    /// Conditions with no readings; every feature falls back to its default
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set rainfall (mm/hr)
    pub fn with_rainfall(mut self, rainfall: f64) -> Self {
        self.rainfall = Some(rainfall);
        self
    }

    /// Set river level (% of capacity)
    pub fn with_river_level(mut self, river_level: f64) -> Self {
        self.river_level = Some(river_level);
        self
    }

    /// Set relative humidity (%)
    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    /// Set barometric pressure (mb)
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Set temperature (°C)
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set wind speed (km/h)
    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    /// Set cloud cover (%)
    pub fn with_cloud_cover(mut self, cloud_cover: f64) -> Self {
        self.cloud_cover = Some(cloud_cover);
        self
    }
}
