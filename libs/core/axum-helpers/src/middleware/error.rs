use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::error::Error as StdError;

use crate::errors::{ApiError, HandlerFailure};

/// How the error middleware settled a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// Handler succeeded, response passed through
    Completed,
    /// Handler failed before writing, the error body was rendered
    ErrorWritten,
    /// Handler failed after writing, its response was kept verbatim
    PreservedOriginal,
}

/// Panic payload text, attached to the 500 response built for a panic
#[derive(Debug, Clone)]
pub struct PanicRecord {
    pub message: String,
}

/// Render the deferred [`ApiError`] of a handler response.
///
/// ```ignore
/// Router::new()
///     .route("/item", get(get_item))
///     .layer(CatchPanicLayer::custom(panic_response))
///     .layer(axum::middleware::from_fn(handle_errors));
/// ```
pub async fn handle_errors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(failure) = response.extensions_mut().remove::<HandlerFailure>() else {
        response.extensions_mut().insert(ErrorOutcome::Completed);
        return response;
    };

    log_failure(&failure.error);

    if failure.committed {
        tracing::warn!(
            status = response.status().as_u16(),
            "response already written, keeping original"
        );
        response
            .extensions_mut()
            .insert(ErrorOutcome::PreservedOriginal);
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut rendered = render_error(&failure.error);
    rendered.extensions_mut().extend(parts.extensions);
    rendered.extensions_mut().insert(ErrorOutcome::ErrorWritten);
    rendered
}

/// JSON error body with the error's status. Plain text if encoding fails.
pub fn render_error(error: &ApiError) -> Response {
    match serde_json::to_vec(&error.body()) {
        Ok(bytes) => (
            error.status(),
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            Body::from(bytes),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode error body");
            (
                error.status(),
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                )],
                error.message().to_string(),
            )
                .into_response()
        }
    }
}

/// Boxed error carried as a panic payload
pub type PanicError = Box<dyn StdError + Send + Sync>;

/// `CatchPanicLayer::custom` callback, turns a panic into an error response.
///
/// An [`ApiError`] payload is rendered as is. Any other error payload becomes an
/// internal error with that error as the cause; other values are formatted first.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    let error = if let Some(api) = payload.downcast_ref::<ApiError>() {
        api.clone()
    } else if let Some(err) = payload.downcast_ref::<PanicError>() {
        ApiError::internal(err)
    } else {
        ApiError::internal(format!("panic: {message}"))
    };

    let mut response = error.into_response();
    response.extensions_mut().insert(PanicRecord { message });
    response
}

/// Text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(err) = payload.downcast_ref::<PanicError>() {
        err.to_string()
    } else if let Some(err) = payload.downcast_ref::<ApiError>() {
        err.to_string()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(n) = payload.downcast_ref::<i32>() {
        n.to_string()
    } else {
        "non-string panic payload".to_string()
    }
}

fn log_failure(error: &ApiError) {
    let status = error.status().as_u16();
    let cause = error.cause().unwrap_or_default();

    if error.is_server_error() {
        tracing::error!(status, reason = error.message(), cause, "request failed");
    } else {
        tracing::info!(status, reason = error.message(), cause, "request rejected");
    }
}
