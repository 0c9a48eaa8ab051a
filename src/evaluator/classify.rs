use crate::plant::{PlantType, Range, ThresholdProfile};
use serde::Serialize;

/// Discrete well-being verdict for a plant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CareStatus {
    NoData,
    UnknownPlantType,
    NeedsWater,
    Overwatered,
    NeedsMoreLight,
    TooMuchLight,
    FeelingGreat,
}

impl CareStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CareStatus::NoData => "No Data",
            CareStatus::UnknownPlantType => "Unknown Plant Type",
            CareStatus::NeedsWater => "Needs Water",
            CareStatus::Overwatered => "Overwatered",
            CareStatus::NeedsMoreLight => "Needs More Light",
            CareStatus::TooMuchLight => "Too Much Light",
            CareStatus::FeelingGreat => "Feeling Great",
        }
    }

    /// Display color hint
    pub fn color(&self) -> &'static str {
        match self {
            CareStatus::NoData | CareStatus::UnknownPlantType => "gray",
            CareStatus::NeedsWater => "blue",
            CareStatus::Overwatered => "red",
            CareStatus::NeedsMoreLight => "yellow",
            CareStatus::TooMuchLight => "orange",
            CareStatus::FeelingGreat => "green",
        }
    }

    /// Display icon hint
    pub fn icon(&self) -> &'static str {
        match self {
            CareStatus::NoData | CareStatus::UnknownPlantType => "question",
            CareStatus::NeedsWater | CareStatus::Overwatered => "water-drop",
            CareStatus::NeedsMoreLight | CareStatus::TooMuchLight => "sun",
            CareStatus::FeelingGreat => "leaf",
        }
    }

    /// True for the two sentinel verdicts that carry no judgement
    pub fn is_sentinel(&self) -> bool {
        matches!(self, CareStatus::NoData | CareStatus::UnknownPlantType)
    }
}

/// Phrase used by [`describe_current_conditions`] when the type is unknown
pub const UNKNOWN_CONDITIONS: &str = "not sure how I'm doing, since my plant type is unknown";

/// Treat NaN and infinities like a missing reading.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Single priority-ordered verdict for the status badge.
///
/// Missing readings win over an unknown type; after that the first matching
/// rule decides: moisture low, moisture high, light low, light high, else
/// great. Bounds are inclusive.
pub fn classify(
    plant_type: Option<PlantType>,
    moisture: Option<f64>,
    light: Option<f64>,
) -> CareStatus {
    let (moisture, light) = match (finite(moisture), finite(light)) {
        (Some(m), Some(l)) => (m, l),
        _ => return CareStatus::NoData,
    };
    let profile = match plant_type {
        Some(t) => ThresholdProfile::for_type(t),
        None => return CareStatus::UnknownPlantType,
    };

    if moisture < profile.moisture.low {
        CareStatus::NeedsWater
    } else if moisture > profile.moisture.high {
        CareStatus::Overwatered
    } else if light < profile.light.low {
        CareStatus::NeedsMoreLight
    } else if light > profile.light.high {
        CareStatus::TooMuchLight
    } else {
        CareStatus::FeelingGreat
    }
}

/// Two simultaneous facts, one per dimension, joined with "and".
///
/// Used for the chat prompt. A missing reading counts as 0.
pub fn describe_current_conditions(
    plant_type: Option<PlantType>,
    moisture: Option<f64>,
    light: Option<f64>,
) -> String {
    let profile = match plant_type {
        Some(t) => ThresholdProfile::for_type(t),
        None => return UNKNOWN_CONDITIONS.to_string(),
    };
    let moisture = finite(moisture).unwrap_or(0.0);
    let light = finite(light).unwrap_or(0.0);

    let hydration = three_way(moisture, &profile.moisture, "thirsty", "overwatered", "well-hydrated");
    let lighting = three_way(
        light,
        &profile.light,
        "needs more light",
        "getting too much light",
        "happy with lighting",
    );

    format!("{} and {}", hydration, lighting)
}

fn three_way(
    value: f64,
    range: &Range,
    below: &'static str,
    above: &'static str,
    within: &'static str,
) -> &'static str {
    if value < range.low {
        below
    } else if value > range.high {
        above
    } else {
        within
    }
}

/// Upper bound of the light gauge.
///
/// `high + headroom` for a known type, `fallback` otherwise.
pub fn light_gauge_max(plant_type: Option<PlantType>, headroom: f64, fallback: f64) -> f64 {
    match plant_type {
        Some(t) => ThresholdProfile::for_type(t).light.high + headroom,
        None => fallback,
    }
}
