use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::response::AppError;
use crate::routes::{created, read_json_request};
use crate::services::ownership::ensure_learner_access;
use crate::services::validation::{validate_attempt, validate_batch, validate_uuid};
use crate::state::AppState;
use crate::types::AttemptResult;

#[derive(Debug, Deserialize)]
struct RecordProgressRequest {
    profile_id: String,
    #[serde(flatten)]
    attempt: AttemptResult,
}

#[derive(Debug, Deserialize)]
struct RecordBatchProgressRequest {
    profile_id: String,
    results: Vec<AttemptResult>,
}

pub async fn record_single(State(state): State<AppState>, req: Request<Body>) -> Response {
    match record_single_inner(state, req).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn record_single_inner(state: AppState, req: Request<Body>) -> Result<Response, AppError> {
    let request = read_json_request::<RecordProgressRequest>(req).await?;
    let payload = request.payload;
    validate_uuid("profile_id", &payload.profile_id)?;
    validate_attempt(&payload.attempt)?;

    ensure_learner_access(state.learners(), &request.parent_id, &payload.profile_id).await?;

    let record = state
        .recorder()
        .record_attempt(
            &payload.profile_id,
            &payload.attempt.word_id,
            payload.attempt.is_correct,
            payload.attempt.attempt_number,
        )
        .await?;
    Ok(created(record))
}

pub async fn record_batch(State(state): State<AppState>, req: Request<Body>) -> Response {
    match record_batch_inner(state, req).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn record_batch_inner(state: AppState, req: Request<Body>) -> Result<Response, AppError> {
    let request = read_json_request::<RecordBatchProgressRequest>(req).await?;
    let payload = request.payload;
    validate_uuid("profile_id", &payload.profile_id)?;
    validate_batch(&payload.results)?;

    ensure_learner_access(state.learners(), &request.parent_id, &payload.profile_id).await?;

    let report = state
        .batches()
        .record_batch(&payload.profile_id, &payload.results)
        .await?;

    let failed = report.failed_items().count();
    if failed > 0 {
        tracing::warn!(
            learner_id = %payload.profile_id,
            processed = report.processed,
            failed,
            "batch recorded with failures"
        );
    }
    Ok(created(report))
}
