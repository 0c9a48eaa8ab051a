// Plant model and per-type threshold profiles

mod profile;
mod types;

pub use profile::{Range, ThresholdProfile, CHART_FALLBACK_PROFILE};
pub use types::{
    HistoryEntry, ParsePlantTypeError, Personality, Plant, PlantType, SensorKind, SensorReading,
};
