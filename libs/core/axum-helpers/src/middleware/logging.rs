use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use super::error::{PanicRecord, panic_message};
use crate::errors::messages;

/// Log every request once it finished.
///
/// Buffers the response body so it can be logged, then hands it on unchanged.
/// A panic that escapes inner layers is logged and answered with a plain 500.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let error = panic_message(payload.as_ref());
            tracing::error!(
                method = %method,
                path = %path,
                status = "not written",
                error = %error,
                duration_ms = start.elapsed().as_millis() as u64,
                "request not completed"
            );
            return plain_internal_error();
        }
    };

    let panic = response.extensions().get::<PanicRecord>().cloned();
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(
                method = %method,
                path = %path,
                status,
                error = %e,
                "failed to read response body"
            );
            return plain_internal_error();
        }
    };
    let duration_ms = start.elapsed().as_millis() as u64;

    match panic {
        Some(record) => tracing::error!(
            method = %method,
            path = %path,
            status,
            error = %record.message,
            duration_ms,
            "request not completed"
        ),
        None => tracing::info!(
            method = %method,
            path = %path,
            status,
            response = %String::from_utf8_lossy(&bytes),
            duration_ms,
            "request completed"
        ),
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn plain_internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        messages::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}
