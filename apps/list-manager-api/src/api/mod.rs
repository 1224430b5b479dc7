//! API routes module

pub mod health;
pub mod items;
pub mod version;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(health::router(state.probe()))
        .merge(version::router())
        .merge(items::router(state))
}
