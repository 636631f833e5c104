//! HTTP handlers for the simulation API.

use crate::{prometheus, record_counter};
use ameba_world::{Event, Food, Organism, SimulationService, Tunables};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SimulationService>,
    pub sim_name: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/spawn", post(spawn))
        .route("/touch", post(touch))
        .route("/config", get(get_config).post(update_config))
        .route("/metrics", get(get_metrics))
        .route("/metrics/prometheus", get(get_prometheus))
        .route("/events", get(get_events))
        .route("/stats", get(get_stats))
        .route("/organisms/:id", get(get_organism))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decode a JSON body, falling back to defaults when it is missing or malformed
fn lenient<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        if !body.is_empty() {
            debug!(error = %err, "Ignoring malformed request body");
        }
        T::default()
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    ok: bool,
    sim: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        sim: state.sim_name,
    })
}

#[derive(Serialize)]
pub struct FoodMaps {
    foods: Vec<Food>,
}

#[derive(Serialize)]
pub struct StateResponse {
    tick: u64,
    organisms: Vec<Organism>,
    maps: FoodMaps,
}

/// Full world snapshot
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.service.snapshot();
    Json(StateResponse {
        tick: snapshot.tick,
        organisms: snapshot.organisms,
        maps: FoodMaps { foods: snapshot.foods },
    })
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SpawnRequest {
    seed_traits: BTreeMap<String, serde_json::Value>,
}

impl SpawnRequest {
    /// Non-numeric trait values are dropped
    fn numeric_traits(self) -> BTreeMap<String, f64> {
        self.seed_traits
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
            .collect()
    }
}

#[derive(Serialize)]
pub struct SpawnResponse {
    organism: Organism,
}

pub async fn spawn(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<SpawnResponse>) {
    let request: SpawnRequest = lenient(&body);
    let organism = state.service.spawn(request.numeric_traits());

    info!(organism = %organism.id, "Organism spawned");
    record_counter!("spawn_requests", 1);

    (StatusCode::CREATED, Json(SpawnResponse { organism }))
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct TouchRequest {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
pub struct TouchResponse {
    ok: bool,
    x: f64,
    y: f64,
}

/// Drop food around a point
pub async fn touch(State(state): State<AppState>, body: Bytes) -> Json<TouchResponse> {
    let TouchRequest { x, y } = lenient(&body);
    state.service.touch(x, y);
    record_counter!("touch_requests", 1);

    Json(TouchResponse { ok: true, x, y })
}

pub async fn get_config(State(state): State<AppState>) -> Json<Tunables> {
    Json(state.service.tunables())
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    food_spawn_prob: Option<f64>,
    reproduction_base_chance: Option<f64>,
}

#[derive(Serialize)]
pub struct OkResponse {
    ok: bool,
}

/// Accepts tunable updates but does not apply them
pub async fn update_config(body: Bytes) -> Json<OkResponse> {
    let update: ConfigUpdate = lenient(&body);
    info!(
        food_spawn_prob = ?update.food_spawn_prob,
        reproduction_base_chance = ?update.reproduction_base_chance,
        "Config update received (not applied)"
    );
    Json(OkResponse { ok: true })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    tick: u64,
    population: usize,
    avg_energy: f64,
    births: u64,
    deaths: u64,
    #[serde(flatten)]
    tunables: Tunables,
}

pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let metrics = state.service.metrics();
    Json(MetricsResponse {
        tick: metrics.tick,
        population: metrics.population.total,
        avg_energy: metrics.population.avg_energy(),
        births: metrics.births,
        deaths: metrics.deaths,
        tunables: metrics.tunables,
    })
}

pub async fn get_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let body = prometheus::render(&state.service.metrics());
    ([(header::CONTENT_TYPE, prometheus::CONTENT_TYPE)], body)
}

#[derive(Deserialize)]
pub struct EventsQuery {
    since: Option<u64>,
    limit: Option<usize>,
}

/// Events with `seq >= since`, oldest first
pub async fn get_events(State(state): State<AppState>, Query(query): Query<EventsQuery>) -> Json<Vec<Event>> {
    Json(state.service.events(query.since.unwrap_or(0), query.limit))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    total: usize,
    alive: usize,
    dead: usize,
    foods: usize,
    avg_energy: f64,
    avg_size: f64,
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let metrics = state.service.metrics();
    let population = &metrics.population;
    Json(StatsResponse {
        total: population.total,
        alive: population.alive,
        dead: population.dead,
        foods: metrics.foods,
        avg_energy: population.avg_energy(),
        avg_size: population.avg_size(),
    })
}

pub async fn get_organism(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Organism>, ApiError> {
    Ok(Json(state.service.organism(&id)?))
}

// Error handling
pub enum ApiError {
    Internal(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("{msg} not found")),
        };

        (status, message).into_response()
    }
}

impl From<ameba_core::Error> for ApiError {
    fn from(err: ameba_core::Error) -> Self {
        match err {
            ameba_core::Error::NotFound(what) => ApiError::NotFound(what),
            other => {
                error!("Core error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}
