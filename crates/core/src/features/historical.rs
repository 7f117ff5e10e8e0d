//! Historical hazard record per location
//!
//! Static lookup owned by the core. Values are on the same 0-100 scale as
//! scores. Unlisted locations, and hazards without a record (weather), read
//! as [`DEFAULT_HISTORICAL_RISK`].

use crate::core_types::Hazard;

/// Historical risk for locations or hazards without a record
pub const DEFAULT_HISTORICAL_RISK: u8 = 50;

/// `(location, landslide, flood)` historical risk table
const HISTORICAL_RISK_TABLE: [(&str, u8, u8); 5] = [
    ("Kedarnath", 95, 90),
    ("Badrinath", 75, 65),
    ("Gangotri", 80, 70),
    ("Hemkund", 85, 60),
    ("Joshimath", 70, 55),
];

/// Look up the historical risk of `hazard` at `location_name`
///
/// Never fails; unknown names degrade to [`DEFAULT_HISTORICAL_RISK`].
///
/// # Example
/// ```
/// use pulsenet_core::core_types::Hazard;
/// use pulsenet_core::features::historical_risk;
///
/// assert_eq!(historical_risk("Kedarnath", Hazard::Landslide), 95);
/// assert_eq!(historical_risk("Atlantis", Hazard::Flood), 50);
/// ```
#[must_use]
pub fn historical_risk(location_name: &str, hazard: Hazard) -> u8 {
    HISTORICAL_RISK_TABLE
        .iter()
        .find(|(name, _, _)| *name == location_name)
        .and_then(|&(_, landslide, flood)| match hazard {
            Hazard::Landslide => Some(landslide),
            Hazard::Flood => Some(flood),
            Hazard::Weather => None,
        })
        .unwrap_or(DEFAULT_HISTORICAL_RISK)
}
