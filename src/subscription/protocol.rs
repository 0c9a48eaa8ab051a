use crate::plant::SensorReading;
use crate::store::{PlantDeleted, ReadingUpdate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client → Server message types
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe { plant_id: Uuid },
    #[serde(rename = "unsubscribe")]
    Unsubscribe { plant_id: Uuid },
}

/// Server → Client: new readings for a plant
#[derive(Debug, Clone, Serialize)]
pub struct ReadingUpdateMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub plant_id: Uuid,
    pub readings: Vec<SensorReading>,
    /// Status label after the readings were applied
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ReadingUpdate> for ReadingUpdateMessage {
    fn from(update: ReadingUpdate) -> Self {
        Self {
            msg_type: "reading_update".to_string(),
            plant_id: update.plant_id,
            readings: update.readings,
            status: update.status.label().to_string(),
            timestamp: update.timestamp,
        }
    }
}

/// Server → Client: plant removed
#[derive(Debug, Clone, Serialize)]
pub struct PlantDeletedMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub plant_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl From<PlantDeleted> for PlantDeletedMessage {
    fn from(deleted: PlantDeleted) -> Self {
        Self {
            msg_type: "plant_deleted".to_string(),
            plant_id: deleted.plant_id,
            timestamp: deleted.timestamp,
        }
    }
}

/// Server → Client: Error message
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            msg_type: "error".to_string(),
            error: error.into(),
        }
    }
}
