//! Scoring validation against hand-computed fixtures
//!
//! Every village in the built-in Uttarakhand dataset is scored under three
//! reading sets: mild monsoon readings, no readings at all (every default
//! applies), and the readings recorded at Kedarnath on 16 June 2013.

use approx::assert_relative_eq;
use pulsenet_core::core_types::{CurrentConditions, Hazard, Location, Score};
use pulsenet_core::features::extract_features;
use pulsenet_core::models::{load_models, EnsembleModel, EnsembleResult, ModelBackend, ModelSuite};
use pulsenet_core::scenario::{kedarnath_2013_conditions, kedarnath_2013_location};
use pulsenet_core::{AlertLevel, Dataset, EnsembleWeights};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn analytic() -> ModelSuite {
    load_models(ModelBackend::Analytic, EnsembleWeights::default())
}

fn mild() -> CurrentConditions {
    CurrentConditions::empty()
        .with_rainfall(10.0)
        .with_river_level(30.0)
        .with_humidity(50.0)
        .with_pressure(1015.0)
        .with_temperature(20.0)
        .with_wind_speed(10.0)
        .with_cloud_cover(20.0)
}

fn mild_ensemble(suite: &ModelSuite, location: &Location) -> EnsembleResult {
    suite.predict_ensemble(&suite.predict_hazards(&extract_features(location, &mild())))
}

/// `(village, landslide, flood, weather, overall)` under [`mild`] readings
const MILD_FIXTURES: [(&str, u8, u8, u8, u8); 10] = [
    ("Kedarnath", 93, 38, 50, 63),
    ("Badrinath", 67, 38, 50, 53),
    ("Gangotri", 68, 38, 50, 53),
    ("Yamunotri", 60, 38, 50, 50),
    ("Hemkund", 70, 38, 50, 54),
    ("Govindghat", 25, 20, 50, 30),
    ("Joshimath", 30, 20, 50, 32),
    ("Rishikesh", 25, 38, 50, 36),
    ("Haridwar", 25, 38, 50, 36),
    ("Dehradun", 25, 38, 50, 36),
];

#[test]
fn test_mild_readings_fixtures() {
    let suite = analytic();
    let dataset = Dataset::uttarakhand();

    for (name, landslide, flood, weather, overall) in MILD_FIXTURES {
        let location = dataset.location(name).expect("built-in village");
        let hazards = suite.predict_hazards(&extract_features(location, &mild()));
        let ensemble = suite.predict_ensemble(&hazards);

        assert_eq!(*hazards.landslide.score, landslide, "{name} landslide");
        assert_eq!(*hazards.flood.score, flood, "{name} flood");
        assert_eq!(*hazards.weather.score, weather, "{name} weather");
        assert_eq!(*ensemble.overall_risk, overall, "{name} overall");
        assert_eq!(*ensemble.confidence, 92, "{name} confidence");
    }
}

#[test]
fn test_overall_risk_is_weighted_sum_of_scores() {
    let suite = analytic();
    let model = EnsembleModel::default();

    for location in &Dataset::uttarakhand().villages {
        let hazards = suite.predict_hazards(&extract_features(location, &mild()));
        let expected = f64::from(*hazards.landslide.score) * 0.4
            + f64::from(*hazards.flood.score) * 0.35
            + f64::from(*hazards.weather.score) * 0.25;

        assert_relative_eq!(model.weighted_risk(&hazards), expected, epsilon = 1e-9);
        assert_eq!(
            suite.predict_ensemble(&hazards).overall_risk,
            Score::from_percent(expected)
        );
    }
}

#[test]
fn test_mild_readings_bands() {
    let suite = analytic();
    let dataset = Dataset::uttarakhand();

    // Kedarnath 63.0: above 60
    let kedarnath = dataset.location("Kedarnath").expect("built-in village");
    let ensemble = mild_ensemble(&suite, kedarnath);
    assert_eq!(ensemble.timeframe, "Next 6-12 hours");
    assert_eq!(ensemble.primary_threat, Hazard::Landslide);

    // Badrinath 52.6: above 40
    let badrinath = dataset.location("Badrinath").expect("built-in village");
    let ensemble = mild_ensemble(&suite, badrinath);
    assert_eq!(
        ensemble.recommendation,
        "HIGH ALERT: Monitor conditions and prepare emergency supplies"
    );
    assert_eq!(ensemble.timeframe, "Next 12-24 hours");

    // Govindghat 29.5: weather dominates
    let govindghat = dataset.location("Govindghat").expect("built-in village");
    let ensemble = mild_ensemble(&suite, govindghat);
    assert_eq!(ensemble.primary_threat, Hazard::Weather);
    assert_eq!(ensemble.timeframe, "Next 24-48 hours");
}

#[test]
fn test_missing_readings_saturate_every_village() {
    let suite = analytic();

    for location in &Dataset::uttarakhand().villages {
        let features = extract_features(location, &CurrentConditions::empty());
        let hazards = suite.predict_hazards(&features);
        let ensemble = suite.predict_ensemble(&hazards);

        assert_eq!(*hazards.landslide.score, 100, "{}", location.name);
        assert_eq!(*hazards.flood.score, 100, "{}", location.name);
        assert_eq!(*hazards.weather.score, 100, "{}", location.name);
        assert_eq!(*ensemble.overall_risk, 100, "{}", location.name);
        // Three-way tie resolves to landslide
        assert_eq!(ensemble.primary_threat, Hazard::Landslide);
    }
}

#[test]
fn test_kedarnath_2013_readings() {
    let suite = analytic();
    let hazards = suite.predict_hazards(&extract_features(
        &kedarnath_2013_location(),
        &kedarnath_2013_conditions(),
    ));

    assert!(hazards.landslide.explanation.starts_with("CRITICAL"));
    assert_eq!(
        hazards.flood.explanation,
        "CRITICAL: Extreme rainfall (385mm/h) with river levels at 95% capacity exceeds flood threshold."
    );
    assert_eq!(
        hazards.weather.explanation,
        "SEVERE: Low pressure system (995mb) with high winds (65kmh) indicates dangerous weather development."
    );

    let ensemble = suite.predict_ensemble(&hazards);
    assert_eq!(*ensemble.overall_risk, 100);
    assert_eq!(
        pulsenet_core::alerts::derive_alerts(ensemble.overall_risk)[0].level,
        AlertLevel::Critical
    );
}

#[test]
fn test_explicit_zero_reading_is_used() {
    let suite = analytic();
    let dataset = Dataset::uttarakhand();
    let location = dataset.location("Haridwar").expect("built-in village");

    let dry = mild().with_rainfall(0.0);
    let features = extract_features(location, &dry);
    assert_eq!(features.landslide.rainfall, 0.0);
    assert_eq!(features.flood.rainfall, 0.0);

    let hazards = suite.predict_hazards(&features);
    let baseline = suite.predict_hazards(&extract_features(location, &mild()));
    assert!(hazards.flood.score <= baseline.flood.score);
}

#[test]
fn test_scores_stay_in_range_for_extreme_readings() {
    let suite = analytic();
    let extremes = [
        CurrentConditions::empty()
            .with_rainfall(-500.0)
            .with_river_level(-500.0)
            .with_humidity(-500.0)
            .with_pressure(2000.0)
            .with_temperature(20.0)
            .with_wind_speed(-500.0)
            .with_cloud_cover(-500.0),
        CurrentConditions::empty()
            .with_rainfall(5000.0)
            .with_river_level(5000.0)
            .with_humidity(5000.0)
            .with_pressure(0.0)
            .with_temperature(-80.0)
            .with_wind_speed(5000.0)
            .with_cloud_cover(5000.0),
    ];

    for conditions in &extremes {
        for location in &Dataset::uttarakhand().villages {
            let hazards = suite.predict_hazards(&extract_features(location, conditions));
            let ensemble = suite.predict_ensemble(&hazards);
            for hazard in Hazard::ALL {
                assert!(*hazards.score(hazard) <= 100);
                assert!(*hazards.get(hazard).confidence <= 100);
            }
            assert!(*ensemble.overall_risk <= 100);
        }
    }
}
