//! Engine lifecycle: loading, batch prediction, drift and the background cycle

use pulsenet_core::core_types::{Hazard, Location, RiskLevel};
use pulsenet_core::engine::{BackgroundCycle, EngineConfig, PredictionSource, SharedEngine};
use pulsenet_core::{Dataset, ModelBackend, PulseNetEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_batch_prediction_matches_single_predictions() {
    let dataset = Dataset::uttarakhand();
    let mut batch = PulseNetEngine::with_models(EngineConfig::deterministic(1));
    let mut single = PulseNetEngine::with_models(EngineConfig::deterministic(1));

    let predictions = batch.predict_all(&dataset.requests());
    assert_eq!(predictions.len(), 10);

    for (location, conditions) in dataset.requests() {
        let expected = single.predict_for_location(&location, &conditions);
        let actual = batch.get_prediction(&location.name).expect("stored");
        assert_eq!(actual.ensemble, expected.ensemble);
        assert_eq!(actual.hazards, expected.hazards);
        assert_eq!(actual.alerts, expected.alerts);
    }
}

#[test]
fn test_store_keeps_first_insertion_order() {
    let dataset = Dataset::uttarakhand();
    let mut engine = PulseNetEngine::with_models(EngineConfig::deterministic(1));
    engine.predict_all(&dataset.requests());

    // Re-scoring one village does not move it
    let joshimath = dataset.location("Joshimath").expect("built-in village").clone();
    engine.predict_for_location(&joshimath, &dataset.weather.to_conditions());

    let names: Vec<String> = engine
        .current_predictions()
        .into_iter()
        .map(|p| p.location.name)
        .collect();
    let expected: Vec<String> = dataset.villages.iter().map(|v| v.name.clone()).collect();
    assert_eq!(names, expected);
    assert_eq!(engine.model_status().predictions_count, 10);
}

#[test]
fn test_snapshot_weather_is_critical_for_every_village() {
    let dataset = Dataset::uttarakhand();
    let mut engine = PulseNetEngine::with_models(EngineConfig::deterministic(1));

    for prediction in engine.predict_all(&dataset.requests()) {
        assert_eq!(prediction.source, PredictionSource::Scored);
        assert!(*prediction.overall_risk() > 80, "{}", prediction.name());
        assert_eq!(prediction.actions.len(), 5);
    }
}

#[test]
fn test_defaults_before_load() {
    let dataset = Dataset::uttarakhand();
    let mut engine = PulseNetEngine::new(EngineConfig::deterministic(1));

    for prediction in engine.predict_all(&dataset.requests()) {
        let expected = if prediction.location.risk_level == RiskLevel::Critical {
            85
        } else {
            65
        };
        assert_eq!(prediction.source, PredictionSource::Default);
        assert_eq!(*prediction.overall_risk(), expected);
        assert_eq!(*prediction.ensemble.confidence, 88);
        assert_eq!(prediction.ensemble.primary_threat, Hazard::Landslide);
        assert_eq!(
            prediction.ensemble.explanation,
            "AI models initializing - using historical patterns"
        );
    }
    assert!(engine.current_predictions().is_empty());

    engine.load_models();
    assert!(engine.is_ready());
    assert_eq!(engine.model_status().models_count, 4);
}

#[test]
fn test_invalid_weights_fall_back_to_synthetic() {
    let config = EngineConfig::from_json_str(
        r#"{"weights": {"landslide": 0.5, "flood": 0.5, "weather": 0.5}, "seed": 4}"#,
    )
    .expect("valid config");

    let mut engine = PulseNetEngine::with_models(config);
    assert_eq!(engine.backend(), Some(ModelBackend::Synthetic));

    let location = Location::new("Auli", 30.528, 79.566, 2800.0, 300, RiskLevel::Medium);
    let prediction = engine.predict_for_location(&location, &Default::default());
    assert_eq!(*prediction.overall_risk(), 78);
    assert_eq!(prediction.ensemble.timeframe, "Next 6-12 hours");
}

#[test]
fn test_drift_keeps_risk_near_scored_value() {
    let dataset = Dataset::uttarakhand();
    let mut engine = PulseNetEngine::with_models(EngineConfig::deterministic(77));
    let scored = engine.predict_all(&dataset.requests());

    // Five minutes: ten drift ticks and one recalculation
    let ticks = engine.advance(Duration::from_secs(300));
    assert_eq!(ticks.drift, 10);
    assert_eq!(ticks.recalculation, 1);

    for original in &scored {
        let drifted = engine.get_prediction(original.name()).expect("stored");
        assert!(original.overall_risk().abs_diff(*drifted.overall_risk()) <= 20);
        // Alerts are carried over from scoring
        assert_eq!(drifted.alerts, original.alerts);
    }
    assert!(*engine.confidence() >= 85);
}

#[test]
fn test_background_cycle_drives_shared_engine() {
    let config = EngineConfig {
        drift_interval_ms: 5,
        recalculation_interval_ms: 25,
        ..EngineConfig::deterministic(9)
    };
    let engine: SharedEngine = Arc::new(Mutex::new(PulseNetEngine::with_models(config)));
    engine
        .lock()
        .expect("not poisoned")
        .predict_all(&Dataset::uttarakhand().requests());

    let mut cycle =
        BackgroundCycle::spawn(Arc::clone(&engine), Duration::from_millis(1)).expect("spawn");
    std::thread::sleep(Duration::from_millis(120));
    cycle.stop();

    let engine = engine.lock().expect("not poisoned");
    assert!(engine.drift_ticks() > 0);
    assert!(*engine.confidence() >= 85);
    assert_eq!(engine.model_status().predictions_count, 10);
}
