//! # Axum Helpers
//!
//! Utilities, middleware and server helpers shared by the HTTP services.
//!
//! ## Modules
//!
//! - **[`errors`]**: The [`ApiError`] value and its `{cause, message, http}` wire shape
//! - **[`middleware`]**: CORS, request logging, error rendering, panic recovery
//! - **[`server`]**: Router assembly, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let server = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &server, &CorsConfig::default());
//!     create_production_app(router, &server, async {}).await
//! }
//! ```

pub mod errors;
pub mod middleware;
pub mod server;

// Re-export server types
pub use server::{
    ShutdownCoordinator, create_production_app, create_router, serve_until_shutdown,
    shutdown_signal,
};

// Re-export middleware
pub use middleware::{
    CorsPolicy, ErrorOutcome, PanicRecord, cors, handle_errors, log_requests, panic_response,
    render_error,
};

// Re-export error types
pub use errors::{ApiError, ErrorBody, HandlerFailure};
