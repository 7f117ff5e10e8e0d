//! Kedarnath 2013 retrospective
//!
//! Re-scores Kedarnath under the readings recorded on 16 June 2013 and pairs
//! the result with what actually happened and an early-warning scenario.

use crate::core_types::{CurrentConditions, Location, RiskLevel};
use crate::engine::{Prediction, PulseNetEngine};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Recorded impact of a disaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterOutcome {
    /// Confirmed deaths
    pub casualties: u32,
    /// People never found
    pub missing_persons: u32,
    /// Economic damage (crore INR)
    pub economic_damage_crore: u32,
    /// People displaced or otherwise affected
    pub affected_people: u32,
    /// Buildings, roads and bridges damaged
    pub damaged_infrastructure: u32,
}

/// Estimated impact had an early warning been issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventionScenario {
    /// Lead time of the warning (h)
    pub early_warning_hours: u32,
    /// Share of people evacuated (%)
    pub evacuation_efficiency: u32,
    /// Deaths under the scenario
    pub predicted_casualties: u32,
    /// Damage under the scenario (crore INR)
    pub predicted_damage: u32,
    /// Deaths avoided
    pub lives_saved: u32,
    /// Damage avoided (crore INR)
    pub damage_reduction: u32,
}

/// Retrospective prediction with actual and counterfactual outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventionAnalysis {
    /// Prediction under the recorded readings
    pub prediction: Prediction,
    /// What actually happened
    pub actual_outcome: DisasterOutcome,
    /// Early-warning counterfactual
    pub prevention: PreventionScenario,
}

/// Impact of the June 2013 Kedarnath flood
pub const KEDARNATH_2013_OUTCOME: DisasterOutcome = DisasterOutcome {
    casualties: 5700,
    missing_persons: 5000,
    economic_damage_crore: 12000,
    affected_people: 110_000,
    damaged_infrastructure: 4200,
};

/// Early-warning scenario for the June 2013 Kedarnath flood
pub const KEDARNATH_2013_PREVENTION: PreventionScenario = PreventionScenario {
    early_warning_hours: 8,
    evacuation_efficiency: 85,
    predicted_casualties: 500,
    predicted_damage: 3500,
    lives_saved: 5200,
    damage_reduction: 8500,
};

/// Readings recorded at Kedarnath on 16 June 2013
#[must_use]
pub fn kedarnath_2013_conditions() -> CurrentConditions {
    CurrentConditions::empty()
        .with_rainfall(385.0)
        .with_temperature(8.0)
        .with_pressure(995.0)
        .with_humidity(98.0)
        .with_wind_speed(65.0)
        .with_cloud_cover(100.0)
        .with_river_level(95.0)
}

/// Kedarnath with the pilgrim population present in June 2013
#[must_use]
pub fn kedarnath_2013_location() -> Location {
    Location::new("Kedarnath", 30.7346, 79.0669, 3583.0, 100_000, RiskLevel::Critical)
}

/// Score Kedarnath under the 2013 readings
///
/// The prediction goes through [`PulseNetEngine::predict_for_location`], so it
/// replaces the stored Kedarnath prediction when models are loaded.
pub fn analyze_kedarnath_2013(engine: &mut PulseNetEngine) -> PreventionAnalysis {
    info!("Analyzing 2013 Kedarnath flood");
    let prediction =
        engine.predict_for_location(&kedarnath_2013_location(), &kedarnath_2013_conditions());

    PreventionAnalysis {
        prediction,
        actual_outcome: KEDARNATH_2013_OUTCOME,
        prevention: KEDARNATH_2013_PREVENTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertLevel;
    use crate::core_types::Hazard;
    use crate::engine::{EngineConfig, PredictionSource};

    #[test]
    fn test_retrospective_is_critical() {
        let mut engine = PulseNetEngine::with_models(EngineConfig::deterministic(2013));
        let analysis = analyze_kedarnath_2013(&mut engine);
        let prediction = &analysis.prediction;

        assert_eq!(prediction.source, PredictionSource::Scored);
        assert_eq!(*prediction.overall_risk(), 100);
        assert_eq!(prediction.ensemble.primary_threat, Hazard::Landslide);
        assert!(prediction.ensemble.recommendation.starts_with("IMMEDIATE EVACUATION"));
        assert_eq!(prediction.alerts[0].level, AlertLevel::Critical);
        assert_eq!(prediction.actions.len(), 5);

        assert_eq!(
            engine.get_prediction("Kedarnath").expect("stored").location.population,
            100_000
        );
    }

    #[test]
    fn test_outcome_figures() {
        let mut engine = PulseNetEngine::with_models(EngineConfig::deterministic(1));
        let analysis = analyze_kedarnath_2013(&mut engine);
        assert_eq!(analysis.actual_outcome.casualties, 5700);
        assert_eq!(
            analysis.actual_outcome.casualties - analysis.prevention.predicted_casualties,
            analysis.prevention.lives_saved
        );
        assert_eq!(
            analysis.actual_outcome.economic_damage_crore - analysis.prevention.predicted_damage,
            analysis.prevention.damage_reduction
        );
    }

    #[test]
    fn test_not_ready_engine_returns_default() {
        let mut engine = PulseNetEngine::new(EngineConfig::deterministic(1));
        let analysis = analyze_kedarnath_2013(&mut engine);
        assert_eq!(analysis.prediction.source, PredictionSource::Default);
        assert_eq!(*analysis.prediction.overall_risk(), 85);
    }
}
