//! Shared confidence rule for hazard scorers
//!
//! `confidence = min(data_quality + REAL_TIME_BONUS, MODEL_ACCURACY)` where data
//! quality is [`FULL_DATA_QUALITY`] for bundles with at least
//! [`MIN_FULL_FEATURES`] fields and [`PARTIAL_DATA_QUALITY`] otherwise.
//!
//! The cap binds for full bundles (95 + 3 > 92), so every bundle with five or
//! more fields reports exactly 92 whatever its values are.

use crate::core_types::Score;
use crate::features::FeatureBundle;

/// Data quality for bundles with every expected field (%)
pub const FULL_DATA_QUALITY: u8 = 95;
/// Data quality for bundles missing fields (%)
pub const PARTIAL_DATA_QUALITY: u8 = 85;
/// Bonus for live data (% points)
pub const REAL_TIME_BONUS: u8 = 3;
/// Historical validation accuracy, caps confidence (%)
pub const MODEL_ACCURACY: u8 = 92;
/// Field count at which a bundle counts as full
pub const MIN_FULL_FEATURES: usize = 5;

/// Confidence for a scorer run on `features`
#[must_use]
pub fn calculate_confidence<F: FeatureBundle + ?Sized>(features: &F) -> Score {
    confidence_for_field_count(features.field_count())
}

/// Confidence for a bundle with `field_count` fields
#[must_use]
pub fn confidence_for_field_count(field_count: usize) -> Score {
    let data_quality = if field_count >= MIN_FULL_FEATURES {
        FULL_DATA_QUALITY
    } else {
        PARTIAL_DATA_QUALITY
    };
    Score::new((data_quality + REAL_TIME_BONUS).min(MODEL_ACCURACY))
}
