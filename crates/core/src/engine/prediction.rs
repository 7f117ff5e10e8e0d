//! Full prediction bundle for one location

use crate::alerts::{derive_alerts, recommend_actions, AlertEntry};
use crate::core_types::{Hazard, Location, RiskLevel, Score};
use crate::models::result::HazardRecord;
use crate::models::{EnsembleResult, HazardOutputs, HazardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Overall risk of the pre-load default for critical locations
pub const DEFAULT_CRITICAL_RISK: Score = Score::new(85);
/// Overall risk of the pre-load default for every other location
pub const DEFAULT_RISK: Score = Score::new(65);
/// Confidence of the pre-load default
pub const DEFAULT_CONFIDENCE: Score = Score::new(88);

/// How a prediction was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Full scorer + ensemble run
    Scored,
    /// Static heuristic from the location's risk label (models not ready)
    Default,
}

/// Latest prediction for a location
///
/// Serialized with the hazard results and ensemble grouped under a
/// `predictions` object; default predictions carry only `ensemble` there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PredictionRecord")]
pub struct Prediction {
    /// Location scored
    pub location: Location,
    /// When the prediction was produced or last drifted
    pub timestamp: DateTime<Utc>,
    /// Whether scorers actually ran
    pub source: PredictionSource,
    /// Per-hazard results; absent for default predictions
    pub hazards: Option<HazardOutputs>,
    /// Ensemble result
    pub ensemble: EnsembleResult,
    /// Alert entries derived from the ensemble
    pub alerts: Vec<AlertEntry>,
    /// Operational actions derived from the ensemble
    pub actions: Vec<String>,
}

impl Prediction {
    /// Assemble a scored prediction, deriving alerts and actions from the ensemble
    pub fn scored(
        location: Location,
        timestamp: DateTime<Utc>,
        hazards: HazardOutputs,
        ensemble: EnsembleResult,
    ) -> Self {
        let alerts = derive_alerts(ensemble.overall_risk);
        let actions = recommend_actions(ensemble.overall_risk);
        Self {
            location,
            timestamp,
            source: PredictionSource::Scored,
            hazards: Some(hazards),
            ensemble,
            alerts,
            actions,
        }
    }

    /// Static prediction used before models are loaded
    ///
    /// Only the location's risk label is read: critical → 85, anything else → 65.
    pub fn default_for(location: &Location, timestamp: DateTime<Utc>) -> Self {
        let overall_risk = if location.risk_level == RiskLevel::Critical {
            DEFAULT_CRITICAL_RISK
        } else {
            DEFAULT_RISK
        };

        Self {
            location: location.clone(),
            timestamp,
            source: PredictionSource::Default,
            hazards: None,
            ensemble: EnsembleResult {
                overall_risk,
                confidence: DEFAULT_CONFIDENCE,
                primary_threat: Hazard::Landslide,
                recommendation: "Monitor conditions closely".to_string(),
                timeframe: "Next 6-12 hours".to_string(),
                explanation: "AI models initializing - using historical patterns".to_string(),
            },
            alerts: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Location name (store key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.location.name
    }

    /// Current overall risk
    #[must_use]
    pub fn overall_risk(&self) -> Score {
        self.ensemble.overall_risk
    }
}

// ============================================================================
// SERIALIZED FORM
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionRecordRef<'a> {
    location: &'a Location,
    timestamp: &'a DateTime<Utc>,
    source: PredictionSource,
    predictions: PredictionSetRef<'a>,
    alerts: &'a [AlertEntry],
    actions: &'a [String],
}

#[derive(Serialize)]
struct PredictionSetRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    landslide: Option<&'a HazardResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flood: Option<&'a HazardResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weather: Option<&'a HazardResult>,
    ensemble: &'a EnsembleResult,
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let hazards = self.hazards.as_ref();
        PredictionRecordRef {
            location: &self.location,
            timestamp: &self.timestamp,
            source: self.source,
            predictions: PredictionSetRef {
                landslide: hazards.map(|h| &h.landslide),
                flood: hazards.map(|h| &h.flood),
                weather: hazards.map(|h| &h.weather),
                ensemble: &self.ensemble,
            },
            alerts: &self.alerts,
            actions: &self.actions,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionRecord {
    location: Location,
    timestamp: DateTime<Utc>,
    source: PredictionSource,
    predictions: PredictionSet,
    #[serde(default)]
    alerts: Vec<AlertEntry>,
    #[serde(default)]
    actions: Vec<String>,
}

#[derive(Deserialize)]
struct PredictionSet {
    #[serde(default)]
    landslide: Option<HazardRecord>,
    #[serde(default)]
    flood: Option<HazardRecord>,
    #[serde(default)]
    weather: Option<HazardRecord>,
    ensemble: EnsembleResult,
}

impl From<PredictionRecord> for Prediction {
    fn from(record: PredictionRecord) -> Self {
        let set = record.predictions;
        // Hazard results only count when all three are present
        let hazards = match (set.landslide, set.flood, set.weather) {
            (Some(landslide), Some(flood), Some(weather)) => Some(HazardOutputs {
                landslide: landslide.into_result(Hazard::Landslide),
                flood: flood.into_result(Hazard::Flood),
                weather: weather.into_result(Hazard::Weather),
            }),
            _ => None,
        };

        Self {
            location: record.location,
            timestamp: record.timestamp,
            source: record.source,
            hazards,
            ensemble: set.ensemble,
            alerts: record.alerts,
            actions: record.actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Factor;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| String::from(*name)).collect()
    }

    fn hazard_result(hazard: Hazard, score: u8) -> HazardResult {
        HazardResult {
            hazard,
            score: Score::new(score),
            confidence: Score::new(92),
            factors: vec![Factor::new("rainfall", 21.0), Factor::new("pressure", -3.0)],
            explanation: "MODERATE RISK".to_string(),
        }
    }

    fn scored_prediction() -> Prediction {
        let location = Location::new("Kedarnath", 30.7, 79.1, 3583.0, 2000, RiskLevel::Critical);
        let timestamp = Utc.with_ymd_and_hms(2013, 6, 16, 18, 0, 0).unwrap();
        let hazards = HazardOutputs {
            landslide: hazard_result(Hazard::Landslide, 71),
            flood: hazard_result(Hazard::Flood, 64),
            weather: hazard_result(Hazard::Weather, 48),
        };
        let ensemble = EnsembleResult {
            overall_risk: Score::new(63),
            confidence: Score::new(92),
            primary_threat: Hazard::Landslide,
            recommendation: "Alert".to_string(),
            timeframe: "6-12 hours".to_string(),
            explanation: "Elevated landslide risk".to_string(),
        };
        Prediction::scored(location, timestamp, hazards, ensemble)
    }

    #[test]
    fn test_scored_prediction_json_keys() {
        let value = serde_json::to_value(scored_prediction()).expect("serializable");

        assert_eq!(
            keys(&value),
            set(&["location", "timestamp", "source", "predictions", "alerts", "actions"])
        );
        let predictions = &value["predictions"];
        assert_eq!(keys(predictions), set(&["landslide", "flood", "weather", "ensemble"]));

        let hazard_keys = set(&["probability", "confidence", "factors", "explanation"]);
        assert_eq!(keys(&predictions["landslide"]), hazard_keys);
        assert_eq!(keys(&predictions["flood"]), hazard_keys);
        assert_eq!(
            keys(&predictions["weather"]),
            set(&["severity", "confidence", "factors", "explanation"])
        );
        assert_eq!(keys(&predictions["flood"]["factors"]), set(&["rainfall", "pressure"]));
        assert_eq!(predictions["weather"]["severity"], 48);

        assert_eq!(
            keys(&predictions["ensemble"]),
            set(&[
                "overallRisk",
                "confidence",
                "primaryThreat",
                "recommendation",
                "timeframe",
                "explanation",
            ])
        );
        assert_eq!(predictions["ensemble"]["overallRisk"], 63);
    }

    #[test]
    fn test_default_prediction_json_has_only_ensemble() {
        let location = Location::new("Auli", 30.5, 79.6, 2800.0, 1000, RiskLevel::Medium);
        let value = serde_json::to_value(Prediction::default_for(&location, Utc::now()))
            .expect("serializable");
        assert_eq!(keys(&value["predictions"]), set(&["ensemble"]));
        assert_eq!(value["source"], "default");
    }

    #[test]
    fn test_prediction_json_round_trip() {
        let original = scored_prediction();
        let json = serde_json::to_string(&original).expect("serializable");
        let restored: Prediction = serde_json::from_str(&json).expect("deserializable");

        assert_eq!(restored.name(), "Kedarnath");
        assert_eq!(restored.timestamp, original.timestamp);
        assert_eq!(restored.source, PredictionSource::Scored);
        assert_eq!(restored.hazards, original.hazards);
        assert_eq!(restored.ensemble, original.ensemble);
        assert_eq!(restored.alerts, original.alerts);
        assert_eq!(restored.actions, original.actions);

        let location = Location::new("Auli", 30.5, 79.6, 2800.0, 1000, RiskLevel::Medium);
        let default = Prediction::default_for(&location, original.timestamp);
        let json = serde_json::to_string(&default).expect("serializable");
        let restored: Prediction = serde_json::from_str(&json).expect("deserializable");
        assert!(restored.hazards.is_none());
        assert_eq!(restored.ensemble, default.ensemble);
    }

    #[test]
    fn test_default_prediction_from_label() {
        let now = Utc::now();
        let critical = Location::new("Hemkund", 30.7, 79.6, 4329.0, 500, RiskLevel::Critical);
        let low = Location::new("Haridwar", 29.9, 78.1, 314.0, 228_832, RiskLevel::Low);

        let prediction = Prediction::default_for(&critical, now);
        assert_eq!(*prediction.overall_risk(), 85);
        assert_eq!(*prediction.ensemble.confidence, 88);
        assert_eq!(prediction.source, PredictionSource::Default);
        assert!(prediction.hazards.is_none());
        assert!(prediction.alerts.is_empty());
        assert!(prediction.actions.is_empty());

        assert_eq!(*Prediction::default_for(&low, now).overall_risk(), 65);
    }
}
