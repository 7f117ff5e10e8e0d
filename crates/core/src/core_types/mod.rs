//! Core types and utilities

pub mod conditions;
pub mod hazard;
pub mod location;
pub mod units;

pub use conditions::CurrentConditions;
pub use hazard::Hazard;
pub use location::{Location, RiskLevel};
pub use units::{round_half_up, Score};
