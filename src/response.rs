use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::EngineError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<usize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
    field: Option<String>,
    counts: Option<(usize, usize)>,
    retryable: bool,
    is_operational: bool,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::operational(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message);
        err.field = Some(field.into());
        err
    }

    pub fn insufficient_words(available: usize, requested: usize) -> Self {
        let mut err = Self::operational(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INSUFFICIENT_WORDS",
            format!("Insufficient words available: {available} of {requested} requested"),
        );
        err.counts = Some((available, requested));
        err
    }

    pub fn storage_unavailable(retryable: bool) -> Self {
        let mut err = Self::operational(
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "Storage temporarily unavailable, please retry",
        );
        err.retryable = retryable;
        err
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            field: None,
            counts: None,
            retryable: false,
            is_operational: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn operational(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            field: None,
            counts: None,
            retryable: false,
            is_operational: true,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidRequest { field, message } => AppError::validation(field, message),
            EngineError::NotFound(message) => AppError::not_found(message),
            EngineError::InsufficientWords {
                available,
                requested,
            } => AppError::insufficient_words(available, requested),
            EngineError::Forbidden(message) => AppError::forbidden(message),
            EngineError::Storage(store_err) => {
                tracing::warn!(error = %store_err, "store operation failed");
                if store_err.is_retryable() {
                    AppError::storage_unavailable(true)
                } else {
                    AppError::internal(store_err.to_string())
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_operational {
            self.message
        } else {
            "Internal server error".to_string()
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: self.code,
            field: self.field,
            available: self.counts.map(|(available, _)| available),
            requested: self.counts.map(|(_, requested)| requested),
            retryable: self.retryable,
        };

        (self.status, Json(body)).into_response()
    }
}

pub fn json_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> AppError {
    AppError {
        status,
        code: code.into(),
        message: message.into(),
        field: None,
        counts: None,
        retryable: false,
        is_operational: true,
    }
}
