//! Latest prediction per location
//!
//! Keyed by location name. Writes overwrite in place, so each name keeps the
//! position of its first insertion and listing order is stable.

use super::prediction::Prediction;
use crate::core_types::Score;
use chrono::{DateTime, Utc};
use rand::Rng;
use rustc_hash::FxHashMap;

/// Map from location name to its latest prediction
#[derive(Debug, Clone, Default)]
pub struct PredictionStore {
    entries: Vec<Prediction>,
    index: FxHashMap<String, usize>,
}

impl PredictionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a prediction, returning the one it replaced
    pub fn insert(&mut self, prediction: Prediction) -> Option<Prediction> {
        if let Some(&slot) = self.index.get(prediction.name()) {
            Some(std::mem::replace(&mut self.entries[slot], prediction))
        } else {
            self.index
                .insert(prediction.name().to_string(), self.entries.len());
            self.entries.push(prediction);
            None
        }
    }

    /// Latest prediction for a location name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Prediction> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Whether a location has a stored prediction
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of stored predictions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored predictions in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.iter()
    }

    /// Drop every stored prediction
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Nudge every stored overall risk by a uniform delta in `±amplitude`
    ///
    /// Results are re-rounded and clamped to `[0, 100]` and timestamps move to
    /// `now`. Scorers are not re-run and alerts/actions are left as derived.
    /// Returns the number of predictions touched.
    pub fn apply_drift<R: Rng>(
        &mut self,
        rng: &mut R,
        amplitude: f64,
        now: DateTime<Utc>,
    ) -> usize {
        for prediction in &mut self.entries {
            let delta = (rng.random::<f64>() - 0.5) * 2.0 * amplitude;
            let drifted = prediction.ensemble.overall_risk.as_f64() + delta;
            prediction.ensemble.overall_risk = Score::from_percent(drifted);
            prediction.timestamp = now;
        }
        self.entries.len()
    }
}

impl<'a> IntoIterator for &'a PredictionStore {
    type Item = &'a Prediction;
    type IntoIter = std::slice::Iter<'a, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
