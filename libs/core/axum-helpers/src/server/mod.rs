//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with CORS, request logging, tracing and timeouts
//! - Graceful shutdown coordination with a bounded drain
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.server, &config.cors);
//! create_production_app(router, &config.server, async {}).await?;
//! ```

pub mod app;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{OPENAPI_PATH, create_production_app, create_router, serve_until_shutdown};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
