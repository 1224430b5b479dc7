use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(store = %config.store, "Starting List Manager API");

    let state = AppState::connect(config).await?;

    // Build router with API routes
    let api_routes = api::routes(&state);
    let router =
        create_router::<openapi::ApiDoc>(api_routes, &state.config.server, &state.config.cors);

    let server = state.config.server.clone();
    create_production_app(router, &server, state.shutdown())
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("List Manager API shutdown complete");
    Ok(())
}
