use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::response::AppError;
use crate::routes::{created, read_json_request};
use crate::services::game_session::CreateSessionInput;
use crate::services::ownership::ensure_learner_access;
use crate::services::validation::{validate_uuid, validate_word_count, DEFAULT_WORD_COUNT};
use crate::services::EngineError;
use crate::state::AppState;
use crate::types::VocabularyCategory;

#[derive(Debug, Deserialize)]
struct CreateGameSessionRequest {
    profile_id: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    word_count: Option<i64>,
}

pub async fn create_session(State(state): State<AppState>, req: Request<Body>) -> Response {
    match create_session_inner(state, req).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn create_session_inner(state: AppState, req: Request<Body>) -> Result<Response, AppError> {
    let request = read_json_request::<CreateGameSessionRequest>(req).await?;
    let input = parse_input(request.payload)?;

    ensure_learner_access(state.learners(), &request.parent_id, &input.learner_id).await?;

    let session = state.sessions().create_session(input).await?;
    tracing::info!(
        session_id = %session.session_id,
        learner_id = %session.learner_id,
        word_count = session.word_count,
        "game session created"
    );
    Ok(created(session))
}

/// Bounds and shape are checked here so a bad request never touches the store.
fn parse_input(payload: CreateGameSessionRequest) -> Result<CreateSessionInput, EngineError> {
    let word_count = match payload.word_count {
        None => DEFAULT_WORD_COUNT,
        Some(raw) => usize::try_from(raw).map_err(|_| {
            EngineError::invalid("word_count", format!("word_count must be positive, got {raw}"))
        })?,
    };
    validate_word_count(word_count)?;
    validate_uuid("profile_id", &payload.profile_id)?;

    let category = match payload.category.as_deref() {
        None => None,
        Some(code) => Some(VocabularyCategory::parse(code).ok_or_else(|| {
            EngineError::invalid("category", format!("Unknown category: {code}"))
        })?),
    };

    Ok(CreateSessionInput {
        learner_id: payload.profile_id,
        category,
        word_count,
    })
}
