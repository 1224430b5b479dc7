//! Items Domain
//!
//! Domain implementation for managing list items, stored in MongoDB or in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON decoding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Update rules, error reclassification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, mongodb::MongoItemRepository, service::ItemService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("listmanager");
//!
//! let repository = MongoItemRepository::new(&db);
//! let service = ItemService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use api::{ApiItem, BulkActiveRequest, BulkActiveResponse};
pub use error::{ErrorSource, RepositoryError, RepositoryResult, ServiceError, ServiceResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryItemRepository;
pub use models::Item;
pub use mongodb::MongoItemRepository;
pub use repository::{ItemRecord, ItemRepository, UpdateCounts};
pub use service::ItemService;
