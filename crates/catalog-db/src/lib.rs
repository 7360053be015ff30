//! # catalog-db: Data Access Layer
//!
//! Runs parameterized SQL against MySQL through a connection pool and hands
//! back either decoded rows or an affected-row count.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  ProductService::list_products                                          │
//! │       │                                                                 │
//! │       │  executor.execute("SELECT ... LIMIT ?,?", [0, 10])              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐                      │   │
//! │  │   │   Database    │    │  SqlExecutor   │                      │   │
//! │  │   │   (pool.rs)   │───►│ (executor.rs)  │                      │   │
//! │  │   │  MySqlPool    │    │ SqlValue       │                      │   │
//! │  │   │  DbConfig     │    │ Record         │                      │   │
//! │  │   └───────────────┘    │ QueryOutcome   │                      │   │
//! │  │                        └────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              MySQL: products(id, sku, name, in_stock)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`executor`] - The `SqlExecutor` capability and its value types
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{Database, DbConfig, SqlExecutor, SqlValue};
//!
//! let db = Database::connect(DbConfig::new("localhost", "catalog")).await?;
//! let outcome = db
//!     .execute("SELECT id, sku, name, in_stock FROM products WHERE id=?", vec![SqlValue::from(1u64)])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod executor;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use executor::{QueryOutcome, Record, SqlExecutor, SqlValue, StatementKind};
pub use pool::{Database, DbConfig};
