use crate::evaluator::CareStatus;
use crate::plant::{Personality, PlantType, SensorKind, SensorReading};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Readings recorded for a plant, broadcast to subscribers
#[derive(Clone, Debug, Serialize)]
pub struct ReadingUpdate {
    pub plant_id: Uuid,
    #[serde(skip)]
    pub owner: Option<String>,
    pub readings: Vec<SensorReading>,
    /// Verdict after applying the readings
    pub status: CareStatus,
    pub timestamp: DateTime<Utc>,
}

/// Plant removal notice
#[derive(Clone, Debug, Serialize)]
pub struct PlantDeleted {
    pub plant_id: Uuid,
    #[serde(skip)]
    pub owner: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied when registering a plant
#[derive(Clone, Debug)]
pub struct NewPlant {
    pub name: String,
    pub plant_type: PlantType,
    pub personality: Option<Personality>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Clone, Debug, Default)]
pub struct PlantUpdate {
    pub name: Option<String>,
    pub plant_type: Option<PlantType>,
    pub personality: Option<Personality>,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Reading history filter
#[derive(Clone, Debug, Default)]
pub struct HistoryQuery {
    /// Restrict to one sensor kind
    pub kind: Option<SensorKind>,
    /// Only readings at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Most recent N readings (default 100, clamped to 1..=500)
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// Store errors
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    PlantNotFound(Uuid),
    EmptyName,
    EmptyBatch,
    InvalidReading { kind: SensorKind, value: f64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::PlantNotFound(id) => write!(f, "plant {} not found", id),
            StoreError::EmptyName => write!(f, "plant name must not be empty"),
            StoreError::EmptyBatch => write!(f, "at least one reading is required"),
            StoreError::InvalidReading { kind, value } => {
                write!(f, "invalid {} reading: {}", kind, value)
            }
        }
    }
}

impl std::error::Error for StoreError {}
