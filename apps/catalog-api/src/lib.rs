//! # Catalog API
//!
//! HTTP front end for the product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  routes (axum Router + TraceLayer)                                │  │
//! │  │                                                                   │  │
//! │  │  GET    /products            GET /products/sku/{sku}              │  │
//! │  │  GET    /products/{id}       POST /products                       │  │
//! │  │  PUT    /products/{id}       DELETE /products/{id}                │  │
//! │  │  GET    /health                                                   │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ AppState                              │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  services::ProductService                                         │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ Arc<dyn SqlExecutor>                  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  catalog_db::Database (MySqlPool)                                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_HOST` / `HTTP_PORT` - listener (default: 0.0.0.0:3000)
//! - `DB_HOST` / `DB_PORT` - MySQL server (default: localhost:3306)
//! - `DB_USER` / `DB_PASSWORD` - credentials (default: root, empty)
//! - `DB_NAME` - schema (default: catalog)
//! - `DB_CONNECT_TIMEOUT_MS` - connect timeout (default: 60000)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 10)
//! - `LIST_PER_PAGE` - default page size (default: 10)
//! - `STRICT_LOOKUPS` - 404 on lookup miss (default: false)
//! - `RUST_LOG` - log filter (default: info,catalog=debug,sqlx=warn)

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use catalog_db::SqlExecutor;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use services::{ProductService, ServiceOptions};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub executor: Arc<dyn SqlExecutor>,
    pub list_per_page: u64,
}

impl AppState {
    pub fn new(
        executor: Arc<dyn SqlExecutor>,
        list_per_page: u64,
        options: ServiceOptions,
    ) -> Self {
        AppState {
            products: Arc::new(ProductService::new(executor.clone(), options)),
            executor,
            list_per_page,
        }
    }
}
