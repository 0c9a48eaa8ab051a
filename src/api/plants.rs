use super::{ApiError, AppState};
use crate::auth::Identity;
use crate::chat;
use crate::evaluator::{evaluate, light_gauge_max, CareStatus};
use crate::plant::{
    HistoryEntry, Personality, Plant, PlantType, SensorKind, SensorReading, ThresholdProfile,
};
use crate::simulator;
use crate::store::{HistoryQuery, NewPlant, PlantUpdate};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Care status as shown to clients
#[derive(Debug, Serialize)]
pub struct CareStatusView {
    pub code: CareStatus,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    /// No verdict yet (missing data or unknown type); render neutrally
    pub sentinel: bool,
}

impl From<CareStatus> for CareStatusView {
    fn from(status: CareStatus) -> Self {
        Self {
            code: status,
            label: status.label(),
            color: status.color(),
            icon: status.icon(),
            sentinel: status.is_sentinel(),
        }
    }
}

/// Gauge bounds for the dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauges {
    pub moisture_max: f64,
    pub light_max: f64,
}

/// Plant with everything derived from its current state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView {
    pub id: Uuid,
    pub name: String,
    pub plant_type: Option<PlantType>,
    pub personality: Option<Personality>,
    pub moisture: Option<f64>,
    pub light: Option<f64>,
    pub care_status: CareStatusView,
    pub conditions: String,
    pub trend: String,
    pub gauges: Gauges,
    /// Ideal ranges; absent when the type is unknown
    pub thresholds: Option<ThresholdProfile>,
    /// Reference lines for history charts
    pub chart_profile: ThresholdProfile,
    pub readings: Vec<SensorReading>,
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
}

impl PlantView {
    fn build(state: &AppState, plant: Plant) -> Self {
        let evaluation = evaluate(&plant, &state.trend);
        let readings = state.store.latest_readings(&plant.id).unwrap_or_default();

        Self {
            id: plant.id,
            care_status: evaluation.status.into(),
            conditions: evaluation.conditions,
            trend: evaluation.trend,
            gauges: Gauges {
                moisture_max: 100.0,
                light_max: light_gauge_max(
                    plant.plant_type,
                    state.display.light_gauge_headroom,
                    state.display.light_gauge_fallback,
                ),
            },
            thresholds: plant.plant_type.map(|t| *t.thresholds()),
            chart_profile: *ThresholdProfile::for_chart(plant.plant_type),
            readings,
            name: plant.name,
            plant_type: plant.plant_type,
            personality: plant.personality,
            moisture: plant.moisture,
            light: plant.light,
            history: plant.history,
            created_at: plant.created_at,
        }
    }
}

/// Entry in the plant type catalogue
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlantTypeInfo {
    plant_type: PlantType,
    thresholds: ThresholdProfile,
    light_gauge_max: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlantRequest {
    name: String,
    plant_type: String,
    #[serde(default)]
    personality: Option<Personality>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePlantRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    plant_type: Option<String>,
    #[serde(default)]
    personality: Option<Personality>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingInput {
    sensor_type: String,
    value: f64,
}

#[derive(Deserialize)]
struct ReadingsRequest {
    readings: Vec<ReadingInput>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Query parameters for reading history
#[derive(Deserialize)]
struct HistoryParams {
    sensor: Option<String>,
    since: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct GreetingResponse {
    response: String,
}

/// Create plant API router
pub fn create_plant_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/plant-types", get(list_plant_types))
        .route("/api/plants", get(list_plants).post(create_plant))
        .route(
            "/api/plants/:id",
            get(get_plant).patch(update_plant).delete(delete_plant),
        )
        .route("/api/plants/:id/readings", post(record_readings))
        .route("/api/plants/:id/readings/latest", get(latest_readings))
        .route("/api/plants/:id/refresh", post(refresh_plant))
        .route("/api/plants/:id/history", get(reading_history))
        .route("/api/plants/:id/greeting", get(greeting))
        .with_state(state)
}

/// GET /api/plant-types
async fn list_plant_types(State(state): State<Arc<AppState>>) -> Json<Vec<PlantTypeInfo>> {
    let types = PlantType::ALL
        .into_iter()
        .map(|plant_type| PlantTypeInfo {
            plant_type,
            thresholds: *plant_type.thresholds(),
            light_gauge_max: light_gauge_max(
                Some(plant_type),
                state.display.light_gauge_headroom,
                state.display.light_gauge_fallback,
            ),
        })
        .collect();

    Json(types)
}

/// GET /api/plants - caller's plants, oldest first
async fn list_plants(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlantView>>, ApiError> {
    let identity = state.identity(&headers)?;

    let views = state
        .store
        .list_plants(identity.owner())
        .into_iter()
        .map(|plant| PlantView::build(&state, plant))
        .collect();

    Ok(Json(views))
}

/// POST /api/plants
async fn create_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreatePlantRequest>,
) -> Result<Response, ApiError> {
    let identity = state.identity(&headers)?;
    if state.auth_enabled && identity == Identity::Anonymous {
        return Err(ApiError::Unauthorized(
            "Sign in to register plants".to_string(),
        ));
    }

    let plant_type = parse_plant_type(&req.plant_type)?;
    let plant = state.store.create_plant(
        identity.owner(),
        NewPlant {
            name: req.name,
            plant_type,
            personality: req.personality,
        },
    )?;

    let view = PlantView::build(&state, plant);
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// GET /api/plants/:id
async fn get_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<PlantView>, ApiError> {
    let identity = state.identity(&headers)?;
    let plant = state.visible_plant(&identity, &id)?;

    Ok(Json(PlantView::build(&state, plant)))
}

/// PATCH /api/plants/:id
async fn update_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlantRequest>,
) -> Result<Json<PlantView>, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    let plant_type = req
        .plant_type
        .as_deref()
        .map(parse_plant_type)
        .transpose()?;

    let plant = state.store.update_plant(
        &id,
        PlantUpdate {
            name: req.name,
            plant_type,
            personality: req.personality,
        },
    )?;

    Ok(Json(PlantView::build(&state, plant)))
}

/// DELETE /api/plants/:id
async fn delete_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    state
        .store
        .delete_plant(&id)
        .ok_or_else(ApiError::plant_not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/plants/:id/readings - ingest a batch of sensor readings
async fn record_readings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<ReadingsRequest>,
) -> Result<Json<PlantView>, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    let batch = req
        .readings
        .iter()
        .map(|r| {
            r.sensor_type
                .parse::<SensorKind>()
                .map(|kind| (kind, r.value))
                .map_err(ApiError::BadRequest)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let update = state
        .store
        .record_readings(&id, &batch, req.timestamp.unwrap_or_else(Utc::now))?;
    info!(
        plant_id = %id,
        readings = update.readings.len(),
        status = update.status.label(),
        "Readings ingested"
    );

    let plant = state.visible_plant(&identity, &id)?;
    Ok(Json(PlantView::build(&state, plant)))
}

/// POST /api/plants/:id/refresh - record one simulated batch now
async fn refresh_plant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<PlantView>, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    simulator::refresh(&state.store, &id)?;

    let plant = state.visible_plant(&identity, &id)?;
    Ok(Json(PlantView::build(&state, plant)))
}

/// GET /api/plants/:id/readings/latest
async fn latest_readings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    Ok(Json(state.store.latest_readings(&id)?))
}

/// GET /api/plants/:id/history
///
/// Query parameters:
/// - `sensor`: restrict to one sensor type (e.g. ?sensor=light)
/// - `since`: RFC 3339 lower bound on timestamps
/// - `limit`: most recent N readings (default 100, max 500)
async fn reading_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let identity = state.identity(&headers)?;
    state.visible_plant(&identity, &id)?;

    let kind = params
        .sensor
        .as_deref()
        .map(str::parse::<SensorKind>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let since = params
        .since
        .as_deref()
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| ApiError::BadRequest(format!("Invalid 'since' timestamp: {}", s)))
        })
        .transpose()?;

    let query = HistoryQuery {
        kind,
        since,
        limit: params.limit,
    };

    Ok(Json(state.store.history(&id, &query)?))
}

/// GET /api/plants/:id/greeting
async fn greeting(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<GreetingResponse>, ApiError> {
    let identity = state.identity(&headers)?;
    let plant = state.visible_plant(&identity, &id)?;

    Ok(Json(GreetingResponse {
        response: chat::greeting(&plant),
    }))
}

fn parse_plant_type(raw: &str) -> Result<PlantType, ApiError> {
    raw.parse()
        .map_err(|e: crate::plant::ParsePlantTypeError| ApiError::BadRequest(e.to_string()))
}
