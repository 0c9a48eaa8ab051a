// In-memory plant and sensor reading store

mod engine;
mod event;

pub use engine::PlantStore;
pub use event::{
    HistoryQuery, NewPlant, PlantDeleted, PlantUpdate, ReadingUpdate, StoreError,
    DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
