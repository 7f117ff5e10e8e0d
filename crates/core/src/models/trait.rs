//! Risk model trait definition
//!
//! Every scorer the engine runs, analytic or synthetic, is reached through
//! `RiskModel`. The engine picks concrete implementations once at load time
//! and only talks to the trait afterwards.

/// Named scoring model from an input bundle `I` to a result `O`
///
/// Implementations must be pure: the same input always yields the same
/// output, and predicting never mutates the model.
pub trait RiskModel<I, O>: Send + Sync {
    /// Versioned model name (e.g. `"landslide_prediction_v2.1"`)
    fn name(&self) -> &str;

    /// Score one input bundle
    fn predict(&self, input: &I) -> O;
}
