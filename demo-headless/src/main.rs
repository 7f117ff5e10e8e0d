use clap::Parser;
use pulsenet_core::core_types::CurrentConditions;
use pulsenet_core::{
    analyze_kedarnath_2013, Dataset, EngineConfig, ModelBackend, Prediction, PulseNetEngine,
};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Disaster-risk scoring demo over the Uttarakhand villages
#[derive(Parser, Debug)]
#[command(name = "pulsenet-demo")]
#[command(about = "Headless PulseNet disaster-risk scoring demo", long_about = None)]
struct Args {
    /// Only score this village
    #[arg(short, long)]
    location: Option<String>,

    /// Rainfall override (mm/h)
    #[arg(long)]
    rainfall: Option<f64>,

    /// River level override (% capacity)
    #[arg(long)]
    river_level: Option<f64>,

    /// Humidity override (%)
    #[arg(long)]
    humidity: Option<f64>,

    /// Pressure override (mb)
    #[arg(long)]
    pressure: Option<f64>,

    /// Temperature override (°C)
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Wind speed override (km/h)
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Cloud cover override (%)
    #[arg(long)]
    cloud_cover: Option<f64>,

    /// JSON dataset to use instead of the built-in villages
    #[arg(short, long)]
    dataset: Option<String>,

    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Use the constant-output synthetic models
    #[arg(long)]
    synthetic: bool,

    /// Skip model loading and show the default predictions
    #[arg(long)]
    no_models: bool,

    /// Drift RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Drift ticks to simulate after scoring
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Run the Kedarnath 2013 retrospective instead
    #[arg(long)]
    kedarnath_2013: bool,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if args.synthetic {
        config.backend = ModelBackend::Synthetic;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let dataset = match &args.dataset {
        Some(path) => Dataset::load(path).map_err(|e| e.to_string())?,
        None => Dataset::uttarakhand(),
    };

    let mut engine = PulseNetEngine::new(config);
    if !args.no_models {
        engine.load_models();
    }

    if args.kedarnath_2013 {
        let analysis = analyze_kedarnath_2013(&mut engine);
        if args.json {
            print_json(&analysis)?;
        } else {
            print_retrospective(&analysis);
        }
        return Ok(());
    }

    let conditions = apply_overrides(dataset.weather.to_conditions(), args);
    let requests: Vec<_> = match &args.location {
        Some(name) => {
            let location = dataset
                .location(name)
                .ok_or_else(|| format!("unknown location '{name}'"))?;
            vec![(location.clone(), conditions)]
        }
        None => dataset
            .villages
            .iter()
            .map(|village| (village.clone(), conditions))
            .collect(),
    };

    info!("Scoring {} locations", requests.len());
    let mut predictions = engine.predict_all(&requests);
    for _ in 0..args.ticks {
        engine.drift_tick();
    }
    if args.ticks > 0 && engine.is_ready() {
        predictions = engine.current_predictions();
    }

    if args.json {
        print_json(&predictions)?;
    } else {
        print_report(&predictions);
        let status = engine.model_status();
        println!(
            "\nModels loaded: {} ({} models), predictions stored: {}, system confidence: {}",
            status.loaded, status.models_count, status.predictions_count, status.confidence
        );
    }
    Ok(())
}

fn apply_overrides(mut conditions: CurrentConditions, args: &Args) -> CurrentConditions {
    conditions.rainfall = args.rainfall.or(conditions.rainfall);
    conditions.river_level = args.river_level.or(conditions.river_level);
    conditions.humidity = args.humidity.or(conditions.humidity);
    conditions.pressure = args.pressure.or(conditions.pressure);
    conditions.temperature = args.temperature.or(conditions.temperature);
    conditions.wind_speed = args.wind_speed.or(conditions.wind_speed);
    conditions.cloud_cover = args.cloud_cover.or(conditions.cloud_cover);
    conditions
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn print_report(predictions: &[Prediction]) {
    println!("=== PulseNet Risk Report ===\n");
    println!("Location     | Landslide | Flood | Weather | Overall | Conf | Primary   | Alert");
    println!("-------------|-----------|-------|---------|---------|------|-----------|---------");

    for prediction in predictions {
        let (landslide, flood, weather) = match &prediction.hazards {
            Some(h) => (
                h.landslide.score.to_string(),
                h.flood.score.to_string(),
                h.weather.score.to_string(),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let alert = prediction
            .alerts
            .first()
            .map_or("none", |alert| alert.level.as_str());

        println!(
            "{:12} | {:>9} | {:>5} | {:>7} | {:>7} | {:>4} | {:9} | {}",
            prediction.name(),
            landslide,
            flood,
            weather,
            prediction.overall_risk().to_string(),
            prediction.ensemble.confidence.to_string(),
            prediction.ensemble.primary_threat.label(),
            alert
        );
    }

    if let Some(worst) = predictions.iter().max_by_key(|p| p.overall_risk()) {
        println!("\nHighest risk: {} ({})", worst.name(), worst.overall_risk());
        println!("  {}", worst.ensemble.recommendation);
        println!("  Timeframe: {}", worst.ensemble.timeframe);
        println!("  {}", worst.ensemble.explanation);
        for action in &worst.actions {
            println!("  - {action}");
        }
    }
}

fn print_retrospective(analysis: &pulsenet_core::PreventionAnalysis) {
    let prediction = &analysis.prediction;
    let outcome = &analysis.actual_outcome;
    let prevention = &analysis.prevention;

    println!("=== Kedarnath, 16 June 2013 ===\n");
    println!(
        "Predicted overall risk: {} ({} primary threat)",
        prediction.overall_risk(),
        prediction.ensemble.primary_threat.label()
    );
    println!("Recommendation: {}", prediction.ensemble.recommendation);
    println!("Timeframe: {}", prediction.ensemble.timeframe);

    println!("\nActual outcome:");
    println!("  Casualties: {}", outcome.casualties);
    println!("  Missing persons: {}", outcome.missing_persons);
    println!("  Economic damage: {} crore", outcome.economic_damage_crore);
    println!("  People affected: {}", outcome.affected_people);
    println!("  Damaged structures: {}", outcome.damaged_infrastructure);

    println!(
        "\nWith a {} h early warning and {}% evacuation efficiency:",
        prevention.early_warning_hours, prevention.evacuation_efficiency
    );
    println!("  Predicted casualties: {}", prevention.predicted_casualties);
    println!("  Predicted damage: {} crore", prevention.predicted_damage);
    println!("  Lives saved: {}", prevention.lives_saved);
    println!("  Damage avoided: {} crore", prevention.damage_reduction);
}
