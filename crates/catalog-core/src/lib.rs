//! # catalog-core: Pure Types for the Catalog Service
//!
//! Everything in here is deterministic and free of I/O. The database crate
//! and the HTTP app both build on these types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Service Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-api (axum routes + service)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐                │   │
//! │  │   │   types   │  │ pagination  │  │   error   │                │   │
//! │  │   │  Product  │  │ Pagination  │  │ CoreError │                │   │
//! │  │   │StockLevel │  │ offsets     │  │ Validation│                │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 catalog-db (MySQL data access)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductInput, StockLevel)
//! - [`pagination`] - Page/size coercion and offset computation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::pagination::{compute_offset, Pagination};
//!
//! assert_eq!(compute_offset(3, 10).unwrap(), 20);
//!
//! let page = Pagination::from_query(Some("2"), None, 25).unwrap();
//! assert_eq!(page.offset(), 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pagination;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use pagination::Pagination;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page number used when the request does not specify one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when neither the request nor the configuration set one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
