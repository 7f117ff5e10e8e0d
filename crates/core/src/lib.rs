//! `PulseNet` core library
//!
//! Disaster-risk scoring engine for mountain regions. Three closed-form hazard
//! scorers (landslide, flash flood, severe weather) feed a weighted ensemble
//! that produces an overall risk, a primary threat and an evacuation
//! recommendation for each location.
//!
//! ## Live engine
//!
//! [`PulseNetEngine`] wraps the scorers with:
//! - a latest-prediction store keyed by location name
//! - alert and operational-action derivation from the overall risk
//! - a drift/recalculation update cycle, driven manually or by a background thread
//! - a constant-output fallback suite when the analytic models cannot load

// Core types and utilities
pub mod core_types;

// Scoring pipeline
pub mod alerts;
pub mod features;
pub mod models;

// Live engine and reference data
pub mod dataset;
pub mod engine;
pub mod scenario;

// Re-export core types
pub use core_types::{CurrentConditions, Hazard, Location, RiskLevel, Score};

// Re-export scoring types
pub use alerts::{AlertEntry, AlertLevel};
pub use features::{extract_features, FeatureSet};
pub use models::{
    EnsembleResult, EnsembleWeights, HazardOutputs, HazardResult, ModelBackend, ModelLoadError,
    RiskModel,
};

// Re-export engine types
pub use dataset::{Dataset, DatasetError};
pub use engine::{
    BackgroundCycle, ConfigError, EngineConfig, ModelStatus, Prediction, PredictionSource,
    PulseNetEngine, SharedEngine,
};
pub use scenario::{analyze_kedarnath_2013, PreventionAnalysis};
