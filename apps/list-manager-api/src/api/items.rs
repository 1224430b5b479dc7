//! Items API routes
//!
//! Wires the items domain to the selected store.

use axum::Router;
use domain_items::{ItemService, MongoItemRepository, handlers};

use crate::state::{AppState, Backend};

/// Create items router
pub fn router(state: &AppState) -> Router {
    match &state.backend {
        Backend::Mongo { db, .. } => {
            handlers::router(ItemService::new(MongoItemRepository::new(db)))
        }
        Backend::Memory(repository) => handlers::router(ItemService::new(repository.clone())),
    }
}
