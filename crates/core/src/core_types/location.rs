//! Reference locations the engine scores
//!
//! Locations are immutable reference data supplied by the dataset layer. The
//! `risk_level` label is static and only used for the pre-load default
//! prediction; it is never derived from scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static hazard label attached to a location by the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low baseline hazard
    Low,
    /// Medium baseline hazard
    Medium,
    /// High baseline hazard
    High,
    /// Critical baseline hazard
    Critical,
}

impl RiskLevel {
    /// Lowercase label as used in datasets
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named place with the static attributes the feature extractor reads
///
/// `name` is the unique key of the prediction store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique location name (e.g. "Kedarnath")
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Elevation above sea level (m)
    pub elevation: f64,
    /// Resident population
    pub population: u64,
    /// Static hazard label
    pub risk_level: RiskLevel,
}

impl Location {
    /// Create a new location
    pub fn new(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        elevation: f64,
        population: u64,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            elevation,
            population,
            risk_level,
        }
    }
}
