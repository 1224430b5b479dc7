pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire shape of every error response.
///
/// ```json
/// {
///   "cause": "id is required",
///   "message": "failed to decode request",
///   "http": 400
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Underlying reason, empty for server-side failures
    pub cause: String,
    /// Human-readable error message
    pub message: String,
    /// HTTP status code, repeated in the body
    pub http: u16,
}

/// HTTP-level error returned by handlers.
///
/// Returning it from a handler does not write a body directly. The response carries
/// the error as an extension and [`crate::middleware::handle_errors`] renders it, so
/// the error middleware stays the single place that decides the status and body.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    cause: Option<String>,
    message: String,
    status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            cause,
            message: message.into(),
            status,
        }
    }

    /// Malformed body or missing parameter, 400
    pub fn decode_request(cause: impl Display) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            messages::DECODE_REQUEST,
            Some(cause.to_string()),
        )
    }

    /// Unclassified failure, 500
    pub fn internal(cause: impl Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            messages::INTERNAL_SERVER_ERROR,
            Some(cause.to_string()),
        )
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, messages::NOT_FOUND_RESOURCE, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Client-facing body. Server error causes stay in the logs.
    pub fn body(&self) -> ErrorBody {
        let cause = if self.is_server_error() {
            String::new()
        } else {
            self.cause.clone().unwrap_or_default()
        };

        ErrorBody {
            cause,
            message: self.message.clone(),
            http: self.status.as_u16(),
        }
    }

    /// Report this error on a response the handler already produced.
    ///
    /// The error middleware logs it but keeps `response` exactly as written.
    pub fn after(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        response.extensions_mut().insert(HandlerFailure {
            error: self,
            committed: true,
        });
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(HandlerFailure {
            error: self,
            committed: false,
        });
        response
    }
}

/// Error attached to a handler response, consumed by the error middleware
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    pub error: ApiError,
    /// Handler already wrote status and body
    pub committed: bool,
}
