// Plant well-being classification and trend analysis
//
// Everything in this module is pure: no I/O, no shared state, no logging.
// Callers re-run it whenever a new reading is observed.

mod classify;
mod trend;

pub use classify::{
    classify, describe_current_conditions, light_gauge_max, CareStatus, UNKNOWN_CONDITIONS,
};
pub use trend::{
    analyze_trend, analyze_trend_with, summarize_trend, LightTrend, MoistureTrend, TrendConfig,
    TrendSummary,
};

use crate::plant::Plant;
use serde::Serialize;

/// Everything display code derives from a plant snapshot
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub status: CareStatus,
    /// Two-phrase description, e.g. "thirsty and happy with lighting"
    pub conditions: String,
    /// Trend phrase, empty when there is nothing to report
    pub trend: String,
}

/// Evaluate a plant snapshot
pub fn evaluate(plant: &Plant, trend_config: &TrendConfig) -> Evaluation {
    Evaluation {
        status: classify(plant.plant_type, plant.moisture, plant.light),
        conditions: describe_current_conditions(plant.plant_type, plant.moisture, plant.light),
        trend: analyze_trend_with(&plant.history, trend_config),
    }
}

#[cfg(test)]
mod tests;
