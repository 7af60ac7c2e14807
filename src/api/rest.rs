// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Delivery of the engine's output contract to the dashboard. All endpoints
// live under `/api/v1/`. The health endpoint is public; everything else
// requires a valid Bearer token checked via the `AuthBearer` extractor.
//
// Every request computes from scratch: fetch bars, build the TimeSeries,
// derive the snapshot. Failures are returned as JSON error bodies with the
// offending instrument recorded in the dashboard error log; nothing here
// can terminate the process.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::api::auth::AuthBearer;
use crate::app_state::AppState;
use crate::config::{AnalysisConfig, ComparisonInstrument, CONFIG_PATH};
use crate::error::EngineError;
use crate::provider::ProviderError;
use crate::returns::{sorted_ascending, ReturnsComparator};
use crate::series::TimeSeries;
use crate::snapshot::build_snapshot;

/// Start of the default analysis range when the caller supplies none.
fn default_range_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("static date is valid")
}

type ErrorBody = (StatusCode, Json<serde_json::Value>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ErrorBody {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Public ──────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        // ── Authenticated ───────────────────────────────────────────
        .route("/api/v1/analysis/:symbol", get(analysis))
        .route("/api/v1/returns/:symbol", get(returns_comparison))
        .route("/api/v1/config", get(get_config))
        .route("/api/v1/config", post(set_config))
        // ── Middleware & State ──────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health (public)
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "uptime_s": state.uptime_secs(),
        "server_time": Utc::now().timestamp_millis(),
    }))
}

// =============================================================================
// Analysis snapshot (authenticated)
// =============================================================================

#[derive(Deserialize)]
struct RangeQuery {
    #[serde(default)]
    start: Option<NaiveDate>,
    #[serde(default)]
    end: Option<NaiveDate>,
}

async fn analysis(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorBody> {
    let start = range.start.unwrap_or_else(default_range_start);
    let end = range.end.unwrap_or_else(|| Utc::now().date_naive());

    if start > end {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            format!("start {start} is after end {end}"),
        ));
    }

    let bars = state
        .provider
        .daily_history(&symbol, start, end)
        .await
        .map_err(|e| {
            state.push_error(e.to_string(), Some(symbol.clone()));
            match e {
                ProviderError::NoData { .. } => error_body(StatusCode::NOT_FOUND, e.to_string()),
                ProviderError::Http { .. } | ProviderError::Malformed { .. } => {
                    error_body(StatusCode::BAD_GATEWAY, e.to_string())
                }
            }
        })?;

    let series = TimeSeries::new(symbol.clone(), bars).map_err(|e| {
        state.push_error(e.to_string(), Some(symbol.clone()));
        error_body(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let config = state.analysis_config.read().clone();
    let snapshot = build_snapshot(&series, &config).map_err(|e| {
        state.push_error(e.to_string(), Some(symbol.clone()));
        match e {
            EngineError::Config { .. } => error_body(StatusCode::BAD_REQUEST, e.to_string()),
            EngineError::Data { .. } => {
                error_body(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
        }
    })?;

    info!(symbol, bars = series.len(), "analysis snapshot built");
    Ok(Json(snapshot))
}

// =============================================================================
// Return comparison (authenticated)
// =============================================================================

async fn returns_comparison(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    let params = state.analysis_config.read().returns.clone();
    let comparator = ReturnsComparator::new(state.provider.clone(), &params);

    let target = ComparisonInstrument::new(symbol.clone(), symbol);
    let records = comparator.compare(&target, Utc::now().date_naive()).await;

    Json(sorted_ascending(records))
}

// =============================================================================
// Configuration (authenticated)
// =============================================================================

async fn get_config(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let config = state.analysis_config.read().clone();
    Json(config)
}

async fn set_config(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Json(new_config): Json<AnalysisConfig>,
) -> Result<impl IntoResponse, ErrorBody> {
    new_config
        .validate()
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;

    {
        let mut config = state.analysis_config.write();
        *config = new_config.clone();
    }
    info!("analysis config updated via API");

    // Persist best-effort; a failed save keeps the in-memory config live.
    if let Err(e) = new_config.save(CONFIG_PATH) {
        warn!(error = %e, "failed to save analysis config to disk");
    }

    Ok(Json(new_config))
}
