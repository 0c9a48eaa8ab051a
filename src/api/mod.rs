// HTTP and WebSocket APIs

mod chat;
mod error;
mod plants;
pub mod websocket;

pub use chat::create_chat_router;
pub use error::ApiError;
pub use plants::{create_plant_router, CareStatusView, Gauges, PlantView};
pub use websocket::{create_ws_router, ws_handler};

use crate::auth::{resolve_identity, Identity, UserRegistry};
use crate::chat::TextGenerator;
use crate::config::{DisplayConfig, SymbiotekConfig, TrendConfig};
use crate::plant::Plant;
use crate::store::PlantStore;
use axum::{http::HeaderMap, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use uuid::Uuid;

/// Shared application state for all handlers
pub struct AppState {
    pub store: Arc<PlantStore>,
    pub chat: Arc<dyn TextGenerator>,
    pub users: Arc<UserRegistry>,
    pub auth_enabled: bool,
    pub trend: TrendConfig,
    pub display: DisplayConfig,
}

impl AppState {
    pub fn new(
        store: Arc<PlantStore>,
        chat: Arc<dyn TextGenerator>,
        config: &SymbiotekConfig,
    ) -> Self {
        let users = UserRegistry::from_config(&config.auth);
        if config.auth.enabled && users.is_empty() {
            warn!("Auth enabled with no users configured; only anonymous reads will work");
        }

        Self {
            store,
            chat,
            users: Arc::new(users),
            auth_enabled: config.auth.enabled,
            trend: config.trend.clone(),
            display: config.display.clone(),
        }
    }

    /// Caller identity from the Authorization header
    pub(crate) fn identity(&self, headers: &HeaderMap) -> Result<Identity, ApiError> {
        Ok(resolve_identity(headers, &self.users, self.auth_enabled)?)
    }

    /// Plant `id` if it exists and belongs to `identity`; otherwise 404
    pub(crate) fn visible_plant(&self, identity: &Identity, id: &Uuid) -> Result<Plant, ApiError> {
        self.store
            .get_plant(id)
            .filter(|p| p.owner.as_deref() == identity.owner())
            .ok_or_else(ApiError::plant_not_found)
    }
}

/// Create the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .merge(create_plant_router(Arc::clone(&state)))
        .merge(create_chat_router(Arc::clone(&state)))
        .merge(create_ws_router(state))
        .layer(cors)
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
