//! Alert, action, recommendation and timeframe policies
//!
//! Three independent banding policies read the overall risk:
//! - recommendation and timeframe: `> 80`, `> 60`, `> 40`, else
//! - alert entries: `> 80` CRITICAL, `> 60` HIGH, else none
//! - operational actions: `> 70` the full checklist, else none
//!
//! The bands overlap and are evaluated independently.

use crate::core_types::Score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk above which immediate evacuation is ordered
pub const EVACUATE_THRESHOLD: f64 = 80.0;
/// Risk above which evacuation preparation is advised
pub const PREPARE_THRESHOLD: f64 = 60.0;
/// Risk above which communities go on high alert
pub const HIGH_ALERT_THRESHOLD: f64 = 40.0;
/// Risk above which the operational checklist is issued
pub const ACTION_CHECKLIST_THRESHOLD: u8 = 70;

/// Colour of CRITICAL alerts
pub const CRITICAL_COLOR: &str = "#E84142";
/// Colour of HIGH alerts
pub const HIGH_COLOR: &str = "#F97316";

/// Operational checklist issued above [`ACTION_CHECKLIST_THRESHOLD`]
pub const OPERATIONAL_ACTIONS: [&str; 5] = [
    "Contact local disaster management authority",
    "Ensure emergency communication devices are charged",
    "Prepare emergency supplies (water, food, medicines)",
    "Identify nearest evacuation center",
    "Stay tuned to official emergency broadcasts",
];

/// Severity of an alert entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    /// Evacuate now
    Critical,
    /// Prepare to evacuate
    High,
}

impl AlertLevel {
    /// Uppercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "CRITICAL",
            AlertLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alert raised for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Alert severity
    pub level: AlertLevel,
    /// Short headline
    pub message: String,
    /// Immediate steps for residents
    pub actions: Vec<String>,
    /// Display colour (hex)
    pub color: String,
}

impl AlertEntry {
    fn new(level: AlertLevel, message: &str, actions: [&str; 3], color: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
            actions: actions.iter().map(|&a| a.to_string()).collect(),
            color: color.to_string(),
        }
    }

    /// CRITICAL evacuation alert
    #[must_use]
    pub fn critical() -> Self {
        Self::new(
            AlertLevel::Critical,
            "Immediate evacuation required",
            ["Evacuate now", "Call emergency services", "Move to safe zone"],
            CRITICAL_COLOR,
        )
    }

    /// HIGH preparation alert
    #[must_use]
    pub fn high() -> Self {
        Self::new(
            AlertLevel::High,
            "Prepare for potential evacuation",
            ["Pack essentials", "Prepare evacuation route", "Stay alert"],
            HIGH_COLOR,
        )
    }
}

/// Alert entries for an overall risk
///
/// At most one entry is ever produced.
#[must_use]
pub fn derive_alerts(overall_risk: Score) -> Vec<AlertEntry> {
    let risk = overall_risk.as_f64();
    if risk > EVACUATE_THRESHOLD {
        vec![AlertEntry::critical()]
    } else if risk > PREPARE_THRESHOLD {
        vec![AlertEntry::high()]
    } else {
        Vec::new()
    }
}

/// Operational actions for an overall risk
#[must_use]
pub fn recommend_actions(overall_risk: Score) -> Vec<String> {
    if *overall_risk > ACTION_CHECKLIST_THRESHOLD {
        OPERATIONAL_ACTIONS.iter().map(|&a| a.to_string()).collect()
    } else {
        Vec::new()
    }
}

/// Recommended response for a (possibly unrounded) overall risk
#[must_use]
pub fn recommendation(risk: f64) -> &'static str {
    match risk {
        _ if risk > EVACUATE_THRESHOLD => {
            "IMMEDIATE EVACUATION: Move to designated safe zones immediately"
        }
        _ if risk > PREPARE_THRESHOLD => "PREPARE FOR EVACUATION: Be ready to move within 1 hour",
        _ if risk > HIGH_ALERT_THRESHOLD => {
            "HIGH ALERT: Monitor conditions and prepare emergency supplies"
        }
        _ => "CONTINUE MONITORING: Stay informed of changing conditions",
    }
}

/// Expected window before impact for a (possibly unrounded) overall risk
#[must_use]
pub fn timeframe(risk: f64) -> &'static str {
    match risk {
        _ if risk > EVACUATE_THRESHOLD => "Next 2-4 hours",
        _ if risk > PREPARE_THRESHOLD => "Next 6-12 hours",
        _ if risk > HIGH_ALERT_THRESHOLD => "Next 12-24 hours",
        _ => "Next 24-48 hours",
    }
}
