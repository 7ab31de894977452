mod game_sessions;
mod health;
mod progress;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::response::{json_error, AppError};
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/game/sessions", post(game_sessions::create_session))
        .route("/api/progress", post(progress::record_single))
        .route("/api/progress/batch", post(progress::record_batch))
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            data,
        }),
    )
        .into_response()
}

struct JsonRequest<T> {
    parent_id: String,
    payload: T,
}

/// Resolves the caller and decodes the body, in that order.
async fn read_json_request<T: DeserializeOwned>(
    req: Request<Body>,
) -> Result<JsonRequest<T>, AppError> {
    let (parts, body) = req.into_parts();

    let Some(parent_id) = crate::auth::extract_parent_id(&parts.headers) else {
        return Err(AppError::unauthorized("Authentication required"));
    };

    let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| {
            json_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "BODY_TOO_LARGE",
                "Request body too large",
            )
        })?;

    let payload = decode_body(&body_bytes)?;
    Ok(JsonRequest { parent_id, payload })
}

fn decode_body<T: DeserializeOwned>(body: &bytes::Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "rejected request body");
        AppError::validation("body", format!("Invalid request body: {err}"))
    })
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}
