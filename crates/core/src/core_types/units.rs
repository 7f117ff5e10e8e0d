//! Semantic unit types for risk scores
//!
//! Every probability, severity and confidence value that leaves a scorer is a
//! whole-number percentage in `[0, 100]`. Wrapping it in [`Score`] keeps that
//! invariant in the type instead of re-clamping at every call site.
//!
//! # Usage
//! ```
//! use pulsenet_core::core_types::units::Score;
//!
//! let score = Score::from_percent(87.5);
//! assert_eq!(*score, 88);
//!
//! // Out-of-range inputs are clamped, never rejected
//! assert_eq!(Score::from_percent(240.0), Score::MAX);
//! assert_eq!(Score::from_fraction(-0.3), Score::MIN);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Round half-up (`floor(x + 0.5)`), so `-2.5` rounds to `-2` and `2.5` to `3`.
///
/// `f64::round` rounds half away from zero, which disagrees for negative
/// halves. Factor breakdowns can be negative, so all rounding goes through here.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whole-number percentage clamped to `[0, 100]`
///
/// Serialized as a bare integer; deserialization saturates at 100.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
#[repr(transparent)]
pub struct Score(u8);

impl Deref for Score {
    type Target = u8;
    #[inline]
    fn deref(&self) -> &u8 {
        &self.0
    }
}

impl Score {
    /// Lowest possible score
    pub const MIN: Score = Score(0);

    /// Highest possible score
    pub const MAX: Score = Score(100);

    /// Create a score from a whole number, saturating at 100
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 {
            Score(100)
        } else {
            Score(value)
        }
    }

    /// Create a score from a percentage, clamping to `[0, 100]` then rounding half-up.
    ///
    /// NaN maps to 0; infinities clamp like any other out-of-range value.
    #[inline]
    #[must_use]
    pub fn from_percent(value: f64) -> Self {
        if value.is_nan() {
            return Score::MIN;
        }
        Score(round_half_up(value.clamp(0.0, 100.0)) as u8)
    }

    /// Create a score from a fraction, clamping to `[0, 1]` and scaling by 100
    #[inline]
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Score::MIN;
        }
        Self::from_percent(fraction.clamp(0.0, 1.0) * 100.0)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Get the value as f64 for weighted arithmetic
    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl From<u8> for Score {
    fn from(value: u8) -> Self {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        f64::from(score.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
