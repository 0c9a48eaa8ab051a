use super::AppState;
use crate::auth::{resolve_token, Identity};
use crate::subscription::ConnectionManager;
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        Query, Request, State,
    },
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Query parameters for WebSocket upgrade
#[derive(Deserialize)]
struct WsQuery {
    token: Option<String>,
}

/// Resolve `?token=` into an identity; 401 when auth is enabled and it fails.
fn ws_identity(state: &AppState, token: Option<&str>) -> Result<Identity, StatusCode> {
    if !state.auth_enabled {
        return Ok(Identity::Anonymous);
    }
    let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
    resolve_token(token, &state.users).map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Auth middleware: validates ?token= when auth_enabled=true.
///
/// Runs as a tower layer BEFORE WebSocket upgrade extraction so 401 can be
/// returned cleanly without requiring a valid upgrade request in tests.
async fn ws_auth(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WsQuery>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(status) = ws_identity(&state, params.token.as_deref()) {
        return (status, "Unauthorized").into_response();
    }
    next.run(req).await
}

/// GET /api/ws - WebSocket upgrade handler (auth handled by ws_auth middleware)
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(params): Query<WsQuery>,
) -> Response {
    info!("WebSocket upgrade request received");
    let identity = match ws_identity(&state, params.token.as_deref()) {
        Ok(identity) => identity,
        Err(status) => return (status, "Unauthorized").into_response(),
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state, identity))
}

/// Create WebSocket router with auth middleware applied
pub fn create_ws_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), ws_auth))
        .with_state(state)
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    // Subscribe before handing over so no update is missed
    let reading_rx = state.store.subscribe();
    let deletion_rx = state.store.subscribe_deletions();

    let manager = ConnectionManager::new(Arc::clone(&state.store), identity);

    manager.handle(socket, reading_rx, deletion_rx).await;
}
