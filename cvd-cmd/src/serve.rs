//! HTTP JSON service for the dashboard views.
//!
//! The dataset and date index are loaded once and shared read-only; each
//! dashboard session gets its own [`Selection`](cvd_views::selection::Selection)
//! in the [`SessionStore`].

use crate::session::SessionStore;
use crate::SourceArgs;
use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use cvd_views::{
    controls::Controls,
    dashboard::resolve_dashboard,
    map::resolve_map,
    models::{Dashboard, MapFrame, PieView, SeriesField, SeriesView},
    pie::resolve_pie,
    selection::UiEvent,
    series::resolve_series,
};
use cvd_worldometer::{Dataset, DateIndex, DateIndexError, Metric};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub index: Arc<DateIndex>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(dataset: Dataset, index: DateIndex, idle_timeout: Duration) -> Self {
        Self {
            dataset: Arc::new(dataset),
            index: Arc::new(index),
            sessions: Arc::new(SessionStore::with_idle_timeout(idle_timeout)),
        }
    }
}

/// Errors returned to HTTP clients as `{"error": "..."}`.
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(err) => {
                warn!("serve: request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Dashboard error: {}", err))
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DateIndexError> for ApiError {
    fn from(err: DateIndexError) -> Self {
        ApiError::Internal(err.into())
    }
}

#[derive(Deserialize)]
struct MapParams {
    #[serde(default)]
    metric: Metric,
    #[serde(default)]
    date_index: usize,
}

#[derive(Deserialize)]
struct SeriesParams {
    country: Option<String>,
    field: SeriesField,
    #[serde(default)]
    date_index: usize,
}

#[derive(Deserialize)]
struct PieParams {
    country: Option<String>,
    #[serde(default)]
    date_index: usize,
}

#[derive(Serialize)]
struct SessionCreated {
    session_id: Uuid,
    dashboard: Dashboard,
}

/// Build the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/controls", get(controls_handler))
        .route("/api/map", get(map_handler))
        .route("/api/series", get(series_handler))
        .route("/api/pie", get(pie_handler))
        .route("/api/sessions", post(create_session_handler))
        .route(
            "/api/sessions/{id}",
            get(session_handler).delete(delete_session_handler),
        )
        .route("/api/sessions/{id}/events", post(event_handler))
        .fallback(|| async { ApiError::NotFound("No such endpoint".to_string()) })
        .with_state(state)
}

/// Load the sources and serve until Ctrl-C.
pub async fn run_serve(
    host: &str,
    port: u16,
    idle_timeout: Duration,
    sources: &SourceArgs,
) -> anyhow::Result<()> {
    let sources = sources.clone();
    let (dataset, index) = tokio::task::spawn_blocking(move || sources.load()).await??;
    info!(
        "Prepared {} records for {} countries over {} dates",
        dataset.len(),
        dataset.countries().count(),
        index.len()
    );

    let state = AppState::new(dataset, index, idle_timeout);
    tokio::spawn(sweep_sessions(state.sessions.clone()));
    let app = router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Dashboard views listening at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Periodically drop sessions whose clients went away without closing them.
async fn sweep_sessions(sessions: Arc<SessionStore>) {
    let period = (sessions.idle_timeout() / 4).max(Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let evicted = sessions.evict_idle().await;
        if evicted > 0 {
            info!("Evicted {} idle sessions", evicted);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn controls_handler(State(state): State<AppState>) -> Json<Controls> {
    Json(Controls::build(&state.dataset, &state.index))
}

async fn map_handler(
    State(state): State<AppState>,
    params: Result<Query<MapParams>, QueryRejection>,
) -> Result<Json<MapFrame>, ApiError> {
    let Query(params) = params?;
    let date_index = state.index.clamp(params.date_index);
    Ok(Json(resolve_map(&state.dataset, &state.index, params.metric, date_index)?))
}

async fn series_handler(
    State(state): State<AppState>,
    params: Result<Query<SeriesParams>, QueryRejection>,
) -> Result<Json<SeriesView>, ApiError> {
    let Query(params) = params?;
    let date_index = state.index.clamp(params.date_index);
    let view = resolve_series(
        &state.dataset,
        &state.index,
        params.country.as_deref(),
        params.field,
        date_index,
    )?;
    Ok(Json(view))
}

async fn pie_handler(
    State(state): State<AppState>,
    params: Result<Query<PieParams>, QueryRejection>,
) -> Result<Json<PieView>, ApiError> {
    let Query(params) = params?;
    let date = state.index.date_at(state.index.clamp(params.date_index))?;
    Ok(Json(resolve_pie(&state.dataset, params.country.as_deref(), date)))
}

async fn create_session_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let (session_id, selection) = state.sessions.create().await;
    let selection = selection.lock().await;
    let dashboard = resolve_dashboard(&state.dataset, &state.index, &selection)?;
    debug!("serve: opened session {}", session_id);
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            dashboard,
        }),
    ))
}

async fn session_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Dashboard>, ApiError> {
    let Path(id) = id?;
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown session {}", id)))?;
    let selection = session.lock().await;
    Ok(Json(resolve_dashboard(&state.dataset, &state.index, &selection)?))
}

async fn delete_session_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if state.sessions.remove(&id).await {
        debug!("serve: closed session {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Unknown session {}", id)))
    }
}

async fn event_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    event: Result<Json<UiEvent>, JsonRejection>,
) -> Result<Json<Dashboard>, ApiError> {
    let Path(id) = id?;
    let Json(event) = event?;
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown session {}", id)))?;
    // Held until the views are resolved so this session's events stay ordered.
    let mut selection = session.lock().await;
    let changed = selection.apply(event, &state.index);
    debug!("serve: session {} event applied (changed={})", id, changed);
    Ok(Json(resolve_dashboard(&state.dataset, &state.index, &selection)?))
}
