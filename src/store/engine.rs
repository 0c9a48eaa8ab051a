use super::event::{
    HistoryQuery, NewPlant, PlantDeleted, PlantUpdate, ReadingUpdate, StoreError,
};
use crate::evaluator::classify;
use crate::plant::{HistoryEntry, Plant, SensorKind, SensorReading};
use crate::simulator;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::{HashMap, VecDeque};
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

/// Plant plus its raw reading log
struct PlantRecord {
    plant: Plant,
    /// Per kind, ordered oldest first
    readings: HashMap<SensorKind, VecDeque<SensorReading>>,
}

/// Plant store keeps plants and their readings in memory
pub struct PlantStore {
    /// Lock-free concurrent map for fast reads
    plants: DashMap<Uuid, PlantRecord>,

    /// Readings kept per plant and kind; also caps the history entries
    history_limit: usize,

    /// Broadcast channel for recorded readings
    reading_tx: broadcast::Sender<ReadingUpdate>,

    /// Broadcast channel for plant deletion events
    deletion_tx: broadcast::Sender<PlantDeleted>,
}

impl PlantStore {
    /// Create new store with broadcast channels
    pub fn new(history_limit: usize) -> Self {
        let (reading_tx, _) = broadcast::channel(1000);
        let (deletion_tx, _) = broadcast::channel(100);

        Self {
            plants: DashMap::new(),
            history_limit: history_limit.max(1),
            reading_tx,
            deletion_tx,
        }
    }

    /// Register a plant and seed it with one initial reading per sensor kind
    pub fn create_plant(&self, owner: Option<&str>, new: NewPlant) -> Result<Plant, StoreError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let mut plant = Plant::new(name, Some(new.plant_type));
        plant.owner = owner.map(str::to_string);
        plant.personality = new.personality;
        let id = plant.id;

        self.plants.insert(
            id,
            PlantRecord {
                plant,
                readings: HashMap::new(),
            },
        );

        let seed = simulator::initial_readings(&mut rand::thread_rng());
        self.record_readings(&id, &seed, Utc::now())?;

        info!(plant_id = %id, plant_type = %new.plant_type, "Plant created");

        self.get_plant(&id).ok_or(StoreError::PlantNotFound(id))
    }

    /// Get plant by ID
    pub fn get_plant(&self, id: &Uuid) -> Option<Plant> {
        self.plants.get(id).map(|r| r.plant.clone())
    }

    /// Plants belonging to `owner`, oldest first
    pub fn list_plants(&self, owner: Option<&str>) -> Vec<Plant> {
        let mut plants: Vec<Plant> = self
            .plants
            .iter()
            .filter(|r| r.plant.owner.as_deref() == owner)
            .map(|r| r.plant.clone())
            .collect();
        plants.sort_by_key(|p| p.created_at);
        plants
    }

    /// All plant IDs regardless of owner
    pub fn plant_ids(&self) -> Vec<Uuid> {
        self.plants.iter().map(|r| *r.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Apply a partial update
    pub fn update_plant(&self, id: &Uuid, update: PlantUpdate) -> Result<Plant, StoreError> {
        let name = match update.name {
            Some(ref n) if n.trim().is_empty() => return Err(StoreError::EmptyName),
            Some(ref n) => Some(n.trim().to_string()),
            None => None,
        };

        let mut record = self
            .plants
            .get_mut(id)
            .ok_or(StoreError::PlantNotFound(*id))?;
        let plant = &mut record.plant;

        if let Some(name) = name {
            plant.name = name;
        }
        if let Some(plant_type) = update.plant_type {
            plant.plant_type = Some(plant_type);
        }
        if let Some(personality) = update.personality {
            plant.personality = Some(personality);
        }
        plant.status = classify(plant.plant_type, plant.moisture, plant.light)
            .label()
            .to_string();

        debug!(plant_id = %id, "Plant updated");
        Ok(plant.clone())
    }

    /// Delete plant and its readings
    pub fn delete_plant(&self, id: &Uuid) -> Option<Plant> {
        let removed = self.plants.remove(id).map(|(_, record)| record.plant);

        if let Some(plant) = &removed {
            let _ = self.deletion_tx.send(PlantDeleted {
                plant_id: *id,
                owner: plant.owner.clone(),
                timestamp: Utc::now(),
            });
            info!(plant_id = %id, "Plant deleted");
        }

        removed
    }

    /// Record a batch of readings taken at `timestamp`.
    ///
    /// Updates the plant's current moisture and light, appends a history entry
    /// once both are known, refreshes the status label and broadcasts the batch.
    pub fn record_readings(
        &self,
        id: &Uuid,
        batch: &[(SensorKind, f64)],
        timestamp: DateTime<Utc>,
    ) -> Result<ReadingUpdate, StoreError> {
        if batch.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        for &(kind, value) in batch {
            validate_reading(kind, value)?;
        }

        let update = {
            let mut record = self
                .plants
                .get_mut(id)
                .ok_or(StoreError::PlantNotFound(*id))?;
            let record = &mut *record;

            let mut recorded = Vec::with_capacity(batch.len());
            for &(kind, value) in batch {
                let reading = SensorReading {
                    plant_id: *id,
                    kind,
                    value,
                    timestamp,
                };
                let log = record.readings.entry(kind).or_default();
                insert_ordered(log, reading.clone(), |r| r.timestamp);
                while log.len() > self.history_limit {
                    log.pop_front();
                }
                recorded.push(reading);
            }

            let plant = &mut record.plant;
            plant.moisture = latest_value(&record.readings, SensorKind::SoilMoisture);
            plant.light = latest_value(&record.readings, SensorKind::Light);

            let status = classify(plant.plant_type, plant.moisture, plant.light);
            plant.status = status.label().to_string();

            // History point reflects the values in effect at `timestamp`,
            // which differ from the current ones when the batch arrives late
            let moisture_then = batch_value(batch, SensorKind::SoilMoisture)
                .or_else(|| value_at(&record.readings, SensorKind::SoilMoisture, timestamp));
            let light_then = batch_value(batch, SensorKind::Light)
                .or_else(|| value_at(&record.readings, SensorKind::Light, timestamp));

            if let (Some(moisture), Some(light)) = (moisture_then, light_then) {
                let entry = HistoryEntry {
                    timestamp,
                    moisture,
                    light,
                    status: classify(plant.plant_type, Some(moisture), Some(light))
                        .label()
                        .to_string(),
                };
                let at = plant.history.partition_point(|h| h.timestamp <= timestamp);
                plant.history.insert(at, entry);
                if plant.history.len() > self.history_limit {
                    let excess = plant.history.len() - self.history_limit;
                    plant.history.drain(..excess);
                }
            }

            ReadingUpdate {
                plant_id: *id,
                owner: plant.owner.clone(),
                readings: recorded,
                status,
                timestamp,
            }
        };

        // No subscribers is fine
        let _ = self.reading_tx.send(update.clone());

        debug!(
            plant_id = %id,
            readings = update.readings.len(),
            status = update.status.label(),
            "Readings recorded"
        );

        Ok(update)
    }

    /// Most recent reading of each kind
    pub fn latest_readings(&self, id: &Uuid) -> Result<Vec<SensorReading>, StoreError> {
        let record = self.plants.get(id).ok_or(StoreError::PlantNotFound(*id))?;
        Ok(SensorKind::ALL
            .iter()
            .filter_map(|kind| record.readings.get(kind).and_then(|log| log.back().cloned()))
            .collect())
    }

    /// Readings ordered oldest first, limited to the most recent matches
    pub fn history(
        &self,
        id: &Uuid,
        query: &HistoryQuery,
    ) -> Result<Vec<SensorReading>, StoreError> {
        let record = self.plants.get(id).ok_or(StoreError::PlantNotFound(*id))?;

        let mut readings: Vec<SensorReading> = record
            .readings
            .iter()
            .filter(|(kind, _)| query.kind.map_or(true, |k| k == **kind))
            .flat_map(|(_, log)| log.iter())
            .filter(|r| query.since.map_or(true, |since| r.timestamp >= since))
            .cloned()
            .collect();
        readings.sort_by_key(|r| r.timestamp);

        let limit = query.effective_limit();
        if readings.len() > limit {
            readings.drain(..readings.len() - limit);
        }

        Ok(readings)
    }

    /// Subscribe to recorded readings
    pub fn subscribe(&self) -> broadcast::Receiver<ReadingUpdate> {
        self.reading_tx.subscribe()
    }

    /// Subscribe to plant deletion events
    pub fn subscribe_deletions(&self) -> broadcast::Receiver<PlantDeleted> {
        self.deletion_tx.subscribe()
    }
}

impl Default for PlantStore {
    fn default() -> Self {
        Self::new(crate::config::StoreConfig::default().history_limit)
    }
}

fn validate_reading(kind: SensorKind, value: f64) -> Result<(), StoreError> {
    let (min, max) = kind.valid_range();
    let in_range = value.is_finite() && value >= min && max.map_or(true, |max| value <= max);
    if in_range {
        Ok(())
    } else {
        Err(StoreError::InvalidReading { kind, value })
    }
}

fn latest_value(readings: &HashMap<SensorKind, VecDeque<SensorReading>>, kind: SensorKind) -> Option<f64> {
    readings.get(&kind).and_then(|log| log.back()).map(|r| r.value)
}

/// Last value of `kind` in the batch
fn batch_value(batch: &[(SensorKind, f64)], kind: SensorKind) -> Option<f64> {
    batch.iter().rev().find(|(k, _)| *k == kind).map(|(_, v)| *v)
}

/// Most recent reading of `kind` taken at or before `at`
fn value_at(
    readings: &HashMap<SensorKind, VecDeque<SensorReading>>,
    kind: SensorKind,
    at: DateTime<Utc>,
) -> Option<f64> {
    readings
        .get(&kind)
        .and_then(|log| log.iter().rev().find(|r| r.timestamp <= at))
        .map(|r| r.value)
}

/// Insert keeping `log` ordered; equal timestamps keep arrival order.
fn insert_ordered<T, K: Ord>(log: &mut VecDeque<T>, item: T, key: impl Fn(&T) -> K) {
    let k = key(&item);
    let at = log.partition_point(|existing| key(existing) <= k);
    log.insert(at, item);
}
