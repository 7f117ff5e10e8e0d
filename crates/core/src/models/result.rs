//! Scorer and ensemble outputs

use crate::core_types::{round_half_up, Hazard, Score};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Rounded contribution of one input to a hazard score
///
/// Display-only breakdown; weights use fixed per-field scalings that are not
/// the terms of the scoring formula, and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factor {
    /// Input name (e.g. `"riverLevel"`)
    pub name: String,
    /// Rounded contribution weight
    pub weight: i32,
}

impl Factor {
    /// Create a factor, rounding `weight` half-up
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight: round_half_up(weight) as i32,
        }
    }
}

/// Output of a single hazard scorer
///
/// Serializes as `{probability | severity, confidence, factors, explanation}`
/// with `factors` as an ordered `name -> weight` map. Weather results use the
/// `severity` key; the hazard itself is implied by the enclosing key of
/// [`HazardOutputs`].
#[derive(Debug, Clone, PartialEq)]
pub struct HazardResult {
    /// Which hazard was scored
    pub hazard: Hazard,
    /// Probability (landslide, flood) or severity (weather)
    pub score: Score,
    /// Confidence in the score
    pub confidence: Score,
    /// Per-input contribution breakdown
    pub factors: Vec<Factor>,
    /// Human-readable explanation chosen by score band
    pub explanation: String,
}

impl HazardResult {
    /// Look up a factor weight by input name
    #[must_use]
    pub fn factor(&self, name: &str) -> Option<i32> {
        self.factors
            .iter()
            .find(|factor| factor.name == name)
            .map(|factor| factor.weight)
    }
}

/// The three hazard results for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HazardOutputsRecord")]
pub struct HazardOutputs {
    /// Landslide result
    pub landslide: HazardResult,
    /// Flood result
    pub flood: HazardResult,
    /// Weather result
    pub weather: HazardResult,
}

impl HazardOutputs {
    /// Result for a given hazard
    #[must_use]
    pub fn get(&self, hazard: Hazard) -> &HazardResult {
        match hazard {
            Hazard::Landslide => &self.landslide,
            Hazard::Flood => &self.flood,
            Hazard::Weather => &self.weather,
        }
    }

    /// Comparison value for a given hazard (probability or severity)
    #[must_use]
    pub fn score(&self, hazard: Hazard) -> Score {
        self.get(hazard).score
    }
}

/// Weighted combination of the three hazard results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleResult {
    /// Weighted overall risk
    pub overall_risk: Score,
    /// Weighted overall confidence
    pub confidence: Score,
    /// Hazard with the largest comparison value
    pub primary_threat: Hazard,
    /// Recommended response
    pub recommendation: String,
    /// Expected window before impact
    pub timeframe: String,
    /// Human-readable summary
    pub explanation: String,
}

// ============================================================================
// SERIALIZED FORM
// ============================================================================

/// Factor breakdown written as an ordered `name -> weight` map
struct FactorMap<'a>(&'a [Factor]);

impl Serialize for FactorMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for factor in self.0 {
            map.serialize_entry(&factor.name, &factor.weight)?;
        }
        map.end()
    }
}

struct FactorMapVisitor;

impl<'de> Visitor<'de> for FactorMapVisitor {
    type Value = Vec<Factor>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of factor name to integer weight")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut factors = Vec::with_capacity(access.size_hint().unwrap_or(5));
        while let Some((name, weight)) = access.next_entry::<String, i32>()? {
            factors.push(Factor { name, weight });
        }
        Ok(factors)
    }
}

fn deserialize_factors<'de, D>(deserializer: D) -> Result<Vec<Factor>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(FactorMapVisitor)
}

#[derive(Serialize)]
struct HazardRecordRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    probability: Option<Score>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Score>,
    confidence: Score,
    factors: FactorMap<'a>,
    explanation: &'a str,
}

impl Serialize for HazardResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (probability, severity) = match self.hazard {
            Hazard::Weather => (None, Some(self.score)),
            Hazard::Landslide | Hazard::Flood => (Some(self.score), None),
        };
        HazardRecordRef {
            probability,
            severity,
            confidence: self.confidence,
            factors: FactorMap(&self.factors),
            explanation: &self.explanation,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
pub(crate) struct HazardRecord {
    #[serde(alias = "severity")]
    probability: Score,
    confidence: Score,
    #[serde(deserialize_with = "deserialize_factors")]
    factors: Vec<Factor>,
    explanation: String,
}

impl HazardRecord {
    pub(crate) fn into_result(self, hazard: Hazard) -> HazardResult {
        HazardResult {
            hazard,
            score: self.probability,
            confidence: self.confidence,
            factors: self.factors,
            explanation: self.explanation,
        }
    }
}

#[derive(Deserialize)]
struct HazardOutputsRecord {
    landslide: HazardRecord,
    flood: HazardRecord,
    weather: HazardRecord,
}

impl From<HazardOutputsRecord> for HazardOutputs {
    fn from(record: HazardOutputsRecord) -> Self {
        Self {
            landslide: record.landslide.into_result(Hazard::Landslide),
            flood: record.flood.into_result(Hazard::Flood),
            weather: record.weather.into_result(Hazard::Weather),
        }
    }
}
