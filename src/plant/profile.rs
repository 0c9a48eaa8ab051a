use super::PlantType;
use serde::Serialize;

/// Closed ideal interval `[low, high]`; both bounds count as in range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Ideal moisture (%) and light (lux) ranges for one plant type
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThresholdProfile {
    pub moisture: Range,
    pub light: Range,
}

const TROPICAL: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(60.0, 80.0),
    light: Range::new(10_000.0, 20_000.0),
};

const SUCCULENT: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(20.0, 40.0),
    light: Range::new(15_000.0, 25_000.0),
};

const HERB: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(50.0, 70.0),
    light: Range::new(12_000.0, 22_000.0),
};

const VINE: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(40.0, 60.0),
    light: Range::new(8_000.0, 18_000.0),
};

const FERN: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(70.0, 90.0),
    light: Range::new(5_000.0, 15_000.0),
};

/// Reference lines drawn on history charts when the plant type is unknown.
/// Never used for classification.
pub const CHART_FALLBACK_PROFILE: ThresholdProfile = ThresholdProfile {
    moisture: Range::new(50.0, 70.0),
    light: Range::new(10_000.0, 20_000.0),
};

impl ThresholdProfile {
    pub const fn for_type(plant_type: PlantType) -> &'static ThresholdProfile {
        match plant_type {
            PlantType::Tropical => &TROPICAL,
            PlantType::Succulent => &SUCCULENT,
            PlantType::Herb => &HERB,
            PlantType::Vine => &VINE,
            PlantType::Fern => &FERN,
        }
    }

    /// Profile for chart reference lines
    pub fn for_chart(plant_type: Option<PlantType>) -> &'static ThresholdProfile {
        match plant_type {
            Some(t) => Self::for_type(t),
            None => &CHART_FALLBACK_PROFILE,
        }
    }
}

impl PlantType {
    pub fn thresholds(&self) -> &'static ThresholdProfile {
        ThresholdProfile::for_type(*self)
    }
}
