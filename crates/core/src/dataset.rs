//! Reference datasets
//!
//! Villages, recorded disasters and a current-weather snapshot for the
//! Uttarakhand region. A built-in copy ships with the crate; alternative
//! datasets are loaded from JSON with the same shape.

use crate::core_types::{CurrentConditions, Location, RiskLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Kind of a recorded disaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterKind {
    /// Flash flood or cloudburst
    Flood,
    /// Slope failure
    Landslide,
    /// Snow or ice avalanche, including glacier bursts
    Avalanche,
}

/// One recorded disaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalDisaster {
    /// Day of the event
    pub date: NaiveDate,
    /// Event kind
    #[serde(rename = "type")]
    pub kind: DisasterKind,
    /// Recorded severity
    pub severity: RiskLevel,
    /// Confirmed deaths
    pub casualties: u32,
    /// Place name (district or village)
    pub location: String,
}

/// Regional weather observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Rainfall intensity (mm/h)
    pub rainfall: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Barometric pressure (mb)
    pub pressure: f64,
    /// Visibility (km); not a model input
    pub visibility: f64,
}

impl WeatherSnapshot {
    /// Readings the scorers understand
    ///
    /// River level and cloud cover are not observed and fall back to their
    /// defaults during feature extraction.
    #[must_use]
    pub fn to_conditions(&self) -> CurrentConditions {
        CurrentConditions::empty()
            .with_rainfall(self.rainfall)
            .with_humidity(self.humidity)
            .with_pressure(self.pressure)
            .with_temperature(self.temperature)
            .with_wind_speed(self.wind_speed)
    }
}

/// Villages, disaster history and current weather for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Locations scored by the engine
    pub villages: Vec<Location>,
    /// Recorded disasters, oldest first
    #[serde(default)]
    pub disasters: Vec<HistoricalDisaster>,
    /// Current regional weather
    pub weather: WeatherSnapshot,
}

impl Dataset {
    /// Built-in Uttarakhand dataset
    #[must_use]
    pub fn uttarakhand() -> Self {
        let villages = vec![
            Location::new("Kedarnath", 30.7346, 79.0669, 3583.0, 1500, RiskLevel::Critical),
            Location::new("Badrinath", 30.7433, 79.4938, 3133.0, 2000, RiskLevel::High),
            Location::new("Gangotri", 30.9993, 78.9411, 3100.0, 1200, RiskLevel::High),
            Location::new("Yamunotri", 31.0118, 78.4270, 3293.0, 800, RiskLevel::Medium),
            Location::new("Hemkund", 30.7268, 79.6634, 4329.0, 500, RiskLevel::Critical),
            Location::new("Govindghat", 30.7176, 79.6341, 1828.0, 3000, RiskLevel::High),
            Location::new("Joshimath", 30.5553, 79.5601, 1890.0, 8000, RiskLevel::Medium),
            Location::new("Rishikesh", 30.0869, 78.2676, 372.0, 102138, RiskLevel::Low),
            Location::new("Haridwar", 29.9457, 78.1642, 314.0, 228832, RiskLevel::Low),
            Location::new("Dehradun", 30.3165, 78.0322, 640.0, 578420, RiskLevel::Low),
        ];

        let disasters = [
            ((2013, 6, 16), DisasterKind::Flood, RiskLevel::Critical, 5700, "Kedarnath"),
            ((2016, 9, 18), DisasterKind::Landslide, RiskLevel::High, 47, "Chamoli"),
            ((2021, 2, 7), DisasterKind::Avalanche, RiskLevel::Critical, 204, "Chamoli"),
            ((2022, 10, 19), DisasterKind::Landslide, RiskLevel::Medium, 12, "Uttarkashi"),
        ]
        .into_iter()
        .filter_map(|((y, m, d), kind, severity, casualties, location)| {
            Some(HistoricalDisaster {
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                kind,
                severity,
                casualties,
                location: location.to_string(),
            })
        })
        .collect();

        Self {
            villages,
            disasters,
            weather: WeatherSnapshot {
                temperature: 18.5,
                humidity: 87.0,
                rainfall: 127.0,
                wind_speed: 45.0,
                pressure: 1012.3,
                visibility: 2.1,
            },
        }
    }

    /// Parse a dataset from JSON
    ///
    /// # Errors
    /// Returns [`DatasetError::ParseFailed`] if the JSON does not match.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(|e| DatasetError::ParseFailed(e.to_string()))
    }

    /// Load a dataset file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| DatasetError::ReadFailed(e.to_string()))?;
        let dataset = Self::from_json_str(&contents)?;
        info!(
            "Loaded dataset from {}: {} villages, {} disasters",
            path.display(),
            dataset.villages.len(),
            dataset.disasters.len()
        );
        Ok(dataset)
    }

    /// Village by name
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.villages.iter().find(|village| village.name == name)
    }

    /// Recorded disasters at a place
    pub fn disasters_at<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a HistoricalDisaster> {
        self.disasters.iter().filter(move |d| d.location == name)
    }

    /// Every village paired with the current weather readings
    #[must_use]
    pub fn requests(&self) -> Vec<(Location, CurrentConditions)> {
        let conditions = self.weather.to_conditions();
        self.villages
            .iter()
            .map(|village| (village.clone(), conditions))
            .collect()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::uttarakhand()
    }
}

/// Errors loading a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Failed to read the file
    ReadFailed(String),
    /// Failed to parse the contents
    ParseFailed(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::ReadFailed(msg) => write!(f, "Failed to read dataset: {msg}"),
            DatasetError::ParseFailed(msg) => write!(f, "Failed to parse dataset: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}
