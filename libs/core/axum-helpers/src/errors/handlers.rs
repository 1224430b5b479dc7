use axum::response::Response;

use super::ApiError;
use crate::middleware::render_error;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    render_error(&ApiError::not_found())
}
