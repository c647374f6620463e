//! JSON error bodies and the status codes each failure maps to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, ErrorCode};
use crate::domain::lesson::LessonPlanError;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError.to_string(), message)
    }
}

pub(crate) fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

pub(crate) fn handle_lesson_error(error: LessonPlanError) -> Response {
    let status = match &error {
        LessonPlanError::NotFound(_) => StatusCode::NOT_FOUND,
        LessonPlanError::Forbidden => StatusCode::FORBIDDEN,
        LessonPlanError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        LessonPlanError::Generation(_) => StatusCode::BAD_GATEWAY,
        LessonPlanError::ExportUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        LessonPlanError::Export(_) | LessonPlanError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(
        status,
        ErrorResponse::new(error.code().to_string(), error.message()),
    )
}

pub(crate) fn handle_auth_error(error: AuthError) -> Response {
    let (status, code) = match &error {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        AuthError::UsernameTaken(_) => (StatusCode::CONFLICT, "USERNAME_TAKEN"),
        AuthError::MissingField(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
        AuthError::InvalidToken | AuthError::TokenExpired => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        }
        AuthError::ServiceUnavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    error_response(status, ErrorResponse::new(code, error.to_string()))
}
