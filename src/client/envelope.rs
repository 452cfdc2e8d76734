//! Backend response envelope and the reply shapes handed to the UI.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message shown for transport failures and undecodable responses.
pub const SERVER_ERROR_MESSAGE: &str = "Server error, please try again later.";

/// `{code, message, data}` as sent by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Application or transport failure, safe to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiFailure {
    pub code: i64,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Generic failure that hides the underlying cause.
    pub fn server_error() -> Self {
        Self::new(500, SERVER_ERROR_MESSAGE)
    }
}

impl From<crate::session::SessionError> for ApiFailure {
    fn from(err: crate::session::SessionError) -> Self {
        tracing::error!("Session write failed: {}", err);
        ApiFailure::server_error()
    }
}

/// Outcome of a backend call once navigation has been ruled out.
pub type Reply<T> = Result<T, ApiFailure>;

/// `{isError, data?, error?, code?}`, the shape UI islands consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            is_error: false,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn failure(failure: ApiFailure) -> Self {
        Self {
            is_error: true,
            data: None,
            error: Some(failure.message),
            code: Some(failure.code),
        }
    }

    pub fn from_reply(reply: Reply<T>) -> Self {
        match reply {
            Ok(data) => Self::success(data),
            Err(failure) => Self::failure(failure),
        }
    }
}

// Application errors are part of the normal UI flow, so they travel with 200
// like the backend's own envelopes.
impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        Envelope::<()>::failure(self).into_response()
    }
}
