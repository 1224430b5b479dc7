//! Application state management.
//!
//! Holds the configuration and the store handle the routes are built from.

use database::StorePing;
use database::mongodb::{MongoPing, connect_from_config};
use domain_items::InMemoryItemRepository;
use mongodb::{Client, Database};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StoreBackend};

/// Backing store selected at startup
#[derive(Clone)]
pub enum Backend {
    /// MongoDB client (cloneable, shares underlying connection pool)
    Mongo { client: Client, db: Database },
    Memory(InMemoryItemRepository),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub backend: Backend,
}

impl AppState {
    /// Open the configured store. MongoDB must answer a ping before serving.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let backend = match config.store {
            StoreBackend::Mongodb => {
                info!(database = %config.mongodb.database(), "Connecting to MongoDB");
                let client = connect_from_config(&config.mongodb).await?;
                let db = client.database(config.mongodb.database());
                info!(database = %config.mongodb.database(), "Connected to MongoDB");
                Backend::Mongo { client, db }
            }
            StoreBackend::Memory => {
                info!("Using in-memory item store");
                Backend::Memory(InMemoryItemRepository::new())
            }
        };

        Ok(Self { config, backend })
    }

    /// Liveness probe of the selected store
    pub fn probe(&self) -> Arc<dyn StorePing> {
        match &self.backend {
            Backend::Mongo { client, .. } => Arc::new(MongoPing::new(client.clone())),
            Backend::Memory(repository) => Arc::new(repository.clone()),
        }
    }

    /// Release store resources once serving has stopped
    pub async fn shutdown(self) {
        if let Backend::Mongo { client, .. } = self.backend {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        }
    }
}
