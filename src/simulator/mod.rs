// Simulated sensor feed
//
// Stands in for real hardware: plants get seeded readings when created and a
// fresh batch on every simulator tick.

use crate::plant::{Plant, SensorKind};
use crate::store::{PlantStore, ReadingUpdate, StoreError};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Readings a newly registered plant starts with
pub fn initial_readings<R: Rng>(rng: &mut R) -> Vec<(SensorKind, f64)> {
    vec![
        (SensorKind::SoilMoisture, 65.0 + rng.gen_range(-10.0..10.0)),
        (SensorKind::Temperature, 70.0 + rng.gen_range(-5.0..5.0)),
        (SensorKind::Humidity, 55.0 + rng.gen_range(-15.0..15.0)),
        (SensorKind::Light, 750.0 + rng.gen_range(-250.0..250.0)),
    ]
}

/// Next batch for `plant`: a bounded random walk from its current values.
///
/// Soil slowly dries out (-3..+1 points per tick).
pub fn next_readings<R: Rng>(plant: &Plant, rng: &mut R) -> Vec<(SensorKind, f64)> {
    let moisture = plant.moisture.unwrap_or(65.0) + rng.gen_range(-3.0..1.0);
    let light = plant.light.unwrap_or(750.0) + rng.gen_range(-1500.0..1500.0);

    vec![
        (SensorKind::SoilMoisture, moisture.clamp(0.0, 100.0)),
        (SensorKind::Temperature, 70.0 + rng.gen_range(-5.0..5.0)),
        (SensorKind::Humidity, 55.0 + rng.gen_range(-15.0..15.0)),
        (SensorKind::Light, light.max(0.0)),
    ]
}

/// Record one simulated batch for a single plant
pub fn refresh(store: &PlantStore, plant_id: &Uuid) -> Result<ReadingUpdate, StoreError> {
    let plant = store
        .get_plant(plant_id)
        .ok_or(StoreError::PlantNotFound(*plant_id))?;
    let batch = next_readings(&plant, &mut rand::thread_rng());
    store.record_readings(plant_id, &batch, Utc::now())
}

/// Periodically record simulated readings for every plant
pub async fn run_simulator(store: Arc<PlantStore>, interval_seconds: u64) {
    let mut ticker = interval(Duration::from_secs(interval_seconds.max(1)));

    // Skip missed ticks to prevent backlog under load
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut rng = StdRng::from_entropy();
    info!(interval_seconds, "Sensor simulator started");

    loop {
        ticker.tick().await;

        if store.is_empty() {
            continue;
        }

        let now = Utc::now();
        let mut recorded = 0usize;
        for plant_id in store.plant_ids() {
            // Plant may have been deleted since the ID snapshot
            let Some(plant) = store.get_plant(&plant_id) else {
                continue;
            };
            let batch = next_readings(&plant, &mut rng);
            match store.record_readings(&plant_id, &batch, now) {
                Ok(_) => recorded += 1,
                Err(StoreError::PlantNotFound(_)) => {}
                Err(e) => warn!(plant_id = %plant_id, error = %e, "Simulated reading rejected"),
            }
        }

        debug!(recorded, plants = store.len(), "Simulator tick");
    }
}
