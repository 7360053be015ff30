//! # Domain Types
//!
//! Core domain types used throughout the catalog service.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductInput   │   │   StockLevel    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (storage)   │   │  sku?           │   │  i64 quantity   │       │
//! │  │  sku (business) │   │  name?          │   │  accepts 12 or  │       │
//! │  │  name           │   │  in_stock?      │   │  true / false   │       │
//! │  │  in_stock       │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! - `id`: assigned by storage (AUTO_INCREMENT), never written by callers
//! - `sku`: caller-assigned business key, expected unique but not enforced here

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Storage-assigned identifier.
    pub id: u64,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Quantity currently in stock.
    pub in_stock: i64,
}

// =============================================================================
// Stock Level
// =============================================================================

/// Quantity carried in a create/update request body.
///
/// Clients send either a count (`"in_stock": 12`) or a flag
/// (`"in_stock": true`). Flags map to 1/0, which is also how a MySQL
/// `BOOLEAN` column stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStockLevel", into = "i64")]
pub struct StockLevel(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStockLevel {
    Count(i64),
    Flag(bool),
}

impl From<RawStockLevel> for StockLevel {
    fn from(raw: RawStockLevel) -> Self {
        match raw {
            RawStockLevel::Count(n) => StockLevel(n),
            RawStockLevel::Flag(true) => StockLevel(1),
            RawStockLevel::Flag(false) => StockLevel(0),
        }
    }
}

impl From<StockLevel> for i64 {
    fn from(level: StockLevel) -> Self {
        level.0
    }
}

impl StockLevel {
    /// Creates a stock level from a raw count.
    #[inline]
    pub const fn new(count: i64) -> Self {
        StockLevel(count)
    }

    /// Returns the quantity.
    #[inline]
    pub const fn count(&self) -> i64 {
        self.0
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Fields are optional so that a missing value reaches storage as `NULL`
/// and is rejected there (NOT NULL constraint), not in this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub in_stock: Option<StockLevel>,
}

impl ProductInput {
    /// Builds a fully-populated input.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, in_stock: i64) -> Self {
        ProductInput {
            sku: Some(sku.into()),
            name: Some(name.into()),
            in_stock: Some(StockLevel::new(in_stock)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_accepts_count_and_flag() {
        let count: StockLevel = serde_json::from_str("12").unwrap();
        assert_eq!(count.count(), 12);

        let yes: StockLevel = serde_json::from_str("true").unwrap();
        let no: StockLevel = serde_json::from_str("false").unwrap();
        assert_eq!(yes.count(), 1);
        assert_eq!(no.count(), 0);

        assert!(serde_json::from_str::<StockLevel>("\"many\"").is_err());
    }

    #[test]
    fn test_stock_level_serializes_as_integer() {
        let json = serde_json::to_string(&StockLevel::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_product_input_missing_fields() {
        let input: ProductInput = serde_json::from_str(r#"{"sku":"ABC123"}"#).unwrap();
        assert_eq!(input.sku.as_deref(), Some("ABC123"));
        assert!(input.name.is_none());
        assert!(input.in_stock.is_none());
    }

    #[test]
    fn test_product_wire_shape() {
        let product = Product {
            id: 1,
            sku: "ABC123".to_string(),
            name: "Test Product".to_string(),
            in_stock: 3,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "sku": "ABC123", "name": "Test Product", "in_stock": 3})
        );
    }
}
