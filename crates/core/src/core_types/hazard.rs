//! Hazard categories scored independently by the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// An independently scored disaster category
///
/// The declaration order is the tie-break order used when classifying the
/// primary threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    /// Slope failure
    Landslide,
    /// Flash flood
    Flood,
    /// Severe weather
    Weather,
}

impl Hazard {
    /// All hazards in tie-break order
    pub const ALL: [Hazard; 3] = [Hazard::Landslide, Hazard::Flood, Hazard::Weather];

    /// Lowercase key (`"landslide"`, `"flood"`, `"weather"`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Hazard::Landslide => "landslide",
            Hazard::Flood => "flood",
            Hazard::Weather => "weather",
        }
    }

    /// Uppercase label used in explanation text
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Hazard::Landslide => "LANDSLIDE",
            Hazard::Flood => "FLOOD",
            Hazard::Weather => "WEATHER",
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
