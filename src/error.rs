// HTTP error types for handler-level failures
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::session::SessionError;
use crate::validation::ValidationError;

/// Failure raised by a handler before or outside a backend call
#[derive(Debug, Error)]
pub enum AppError {
    // 400 Bad Request
    #[error("{0}")]
    InvalidJson(String),

    // 422 Unprocessable Entity (well-formed input that fails form rules)
    #[error("{message}")]
    UnprocessableEntity {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidJson(_) => "INVALID_JSON",
            AppError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "message": self.to_string(),
            "code": self.error_code(),
        });
        if let AppError::UnprocessableEntity { field_errors, .. } = self {
            body["field_errors"] = json!(field_errors);
        }
        body
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        AppError::InternalServerError(message.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::UnprocessableEntity {
            message: "Validation failed".to_string(),
            field_errors: err.errors.first_messages(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidJson(rejection.body_text())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        // Cookie contents are not the client's concern
        tracing::error!("Session error: {}", err);
        AppError::internal_server_error("Failed to update session")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
