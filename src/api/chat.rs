use super::{ApiError, AppState};
use crate::chat;
use crate::plant::Plant;
use axum::{extract::State, http::HeaderMap, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Either a stored plant id or a full plant snapshot
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    plant_id: Option<Uuid>,
    #[serde(default)]
    plant: Option<Plant>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    /// True when the text is a stand-in for a failed or empty completion
    fallback: bool,
}

/// Create chat API router
pub fn create_chat_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_with_plant))
        .with_state(state)
}

/// POST /api/chat
async fn chat_with_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let plant = match (req.plant_id, req.plant) {
        (Some(id), _) => {
            let identity = state.identity(&headers)?;
            state.visible_plant(&identity, &id)?
        }
        (None, Some(plant)) => plant,
        (None, None) => return Err(ApiError::BadRequest("Plant data is required".to_string())),
    };

    let message = req.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let reply = chat::reply(state.chat.as_ref(), &plant, message, &state.trend).await;

    Ok(Json(ChatResponse {
        response: reply.text,
        fallback: reply.fallback,
    }))
}
