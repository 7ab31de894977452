use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_latency_ms: Option<u64>,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: &'static str,
    start_time: String,
    uptime: u64,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

enum StoreCheck {
    Connected { latency_ms: u64 },
    Unavailable,
}

async fn root(State(state): State<AppState>) -> Response {
    let (status_code, response) = match store_check(&state).await {
        StoreCheck::Connected { latency_ms } => (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                database: "connected",
                database_latency_ms: Some(latency_ms),
                timestamp: now_iso(),
            },
        ),
        StoreCheck::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "degraded",
                database: "disconnected",
                database_latency_ms: None,
                timestamp: now_iso(),
            },
        ),
    };

    (status_code, Json(response)).into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    Json(HealthInfoResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

async fn store_check(state: &AppState) -> StoreCheck {
    let started = Instant::now();
    match state.progress_store().ping().await {
        Ok(()) => StoreCheck::Connected {
            latency_ms: started.elapsed().as_millis() as u64,
        },
        Err(err) => {
            tracing::warn!(error = %err, "health check store ping failed");
            StoreCheck::Unavailable
        }
    }
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
