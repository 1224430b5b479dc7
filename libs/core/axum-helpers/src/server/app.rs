use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::middleware::{CorsPolicy, cors, log_requests};
use axum::{Json, Router, middleware, routing::get};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Path the OpenAPI document is served on
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates a configured Axum router with common middleware and documentation.
///
/// Layers, outermost first:
/// - CORS ([`cors`]), answers preflights before anything else runs
/// - request logging ([`log_requests`])
/// - `TraceLayer` request spans
/// - `TimeoutLayer` with [`ServerConfig::request_timeout`]
///
/// `apis` is merged at the root and should already have its state applied.
/// Unknown paths get a JSON 404.
///
/// # Example
/// ```ignore
/// let router = create_router::<ApiDoc>(api_routes, &config.server, &config.cors);
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig, cors_config: &CorsConfig) -> Router
where
    T: OpenApi + 'static,
{
    let policy = CorsPolicy::from(cors_config);
    info!(origins = ?cors_config.allowed_origins, "CORS configured");

    Router::new()
        .route(OPENAPI_PATH, get(|| async { Json(T::openapi()) }))
        .merge(apis)
        .fallback(not_found)
        .layer(TimeoutLayer::new(server_config.request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(middleware::from_fn(log_requests))
        .layer(middleware::from_fn_with_state(policy, cors))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Listens for SIGINT / SIGTERM, drains in-flight requests for at most
/// [`ServerConfig::shutdown_timeout`], then runs `cleanup` under the same bound.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config.server, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::default();
    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let shutdown_timeout = server_config.shutdown_timeout;
    let serve_result = serve_until_shutdown(listener, router, coordinator, shutdown_timeout).await;

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

/// Serve until `coordinator` initiates shutdown.
///
/// Once shutdown begins, new connections are refused and in-flight requests get
/// `drain_timeout` to finish. Connections still open after that are abandoned.
pub async fn serve_until_shutdown(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    drain_timeout: Duration,
) -> io::Result<()> {
    let graceful = coordinator.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.wait_for_shutdown().await })
        .into_future();

    let deadline = async {
        coordinator.wait_for_shutdown().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = deadline => {
            warn!(
                "Graceful drain exceeded {:?}, closing remaining connections",
                drain_timeout
            );
            Ok(())
        }
    }
}
