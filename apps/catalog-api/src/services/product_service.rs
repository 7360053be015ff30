//! # Product Service
//!
//! The five CRUD operations over the `products` table, each one a single
//! parameterized statement run through a [`SqlExecutor`].
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Service                                      │
//! │                                                                         │
//! │  list_products ──► Pagination ──► SELECT ... LIMIT ?,?                 │
//! │                                        │                                │
//! │  get_product ───────────────────► SELECT ... WHERE id=?                │
//! │  get_product_by_sku ────────────► SELECT ... WHERE sku=?               │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                          Records ──► Product ──► {data, meta?}          │
//! │                                                                         │
//! │  create_product ────────────────► INSERT ...                           │
//! │  update_product ────────────────► UPDATE ... WHERE id=?                │
//! │  remove_product ────────────────► DELETE ... WHERE id=?                │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                    affected_rows >= 1 ? success : failure  {message}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups keep the "not found" distinction internally ([`Lookup`]) while
//! the wire still answers `{"data": []}` unless strict lookups are on.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use catalog_core::pagination::{normalize_rows, PageMeta};
use catalog_core::{CoreError, Pagination, Product, ProductInput};
use catalog_db::{DbResult, QueryOutcome, Record, SqlExecutor, SqlValue};

use crate::error::ApiResult;

// =============================================================================
// Statements
// =============================================================================

const SELECT_PAGE: &str = "SELECT id, sku, name, in_stock FROM products LIMIT ?,?";
const SELECT_BY_ID: &str = "SELECT id, sku, name, in_stock FROM products WHERE id=?";
const SELECT_BY_SKU: &str = "SELECT id, sku, name, in_stock FROM products WHERE sku=?";
const INSERT: &str = "INSERT INTO products (sku, name, in_stock) VALUES (?, ?, ?)";
const UPDATE: &str = "UPDATE products SET sku=?, name=?, in_stock=? WHERE id=?";
const DELETE: &str = "DELETE FROM products WHERE id=?";

// =============================================================================
// Envelopes
// =============================================================================

/// `{data: [...], meta: {page, size}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEnvelope {
    pub data: Vec<Product>,
    pub meta: PageMeta,
}

/// `{data: {...}}` or `{data: []}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEnvelope {
    pub data: Lookup,
}

/// `{message: "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// Result of a single-product lookup.
///
/// Serializes as the product itself when found and as an empty array when
/// not, which is the shape existing clients expect.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup(Option<Product>);

impl Lookup {
    pub fn found(&self) -> Option<&Product> {
        self.0.as_ref()
    }

    pub fn is_found(&self) -> bool {
        self.0.is_some()
    }

    pub fn into_inner(self) -> Option<Product> {
        self.0
    }
}

impl Serialize for Lookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(product) => product.serialize(serializer),
            None => serializer.collect_seq(std::iter::empty::<Product>()),
        }
    }
}

// =============================================================================
// Mutation Messages
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn message(self, applied: bool) -> &'static str {
        match (self, applied) {
            (Mutation::Create, true) => "Product created successfully",
            (Mutation::Create, false) => "Error in creating product",
            (Mutation::Update, true) => "Product updated successfully",
            (Mutation::Update, false) => "Error in updating product",
            (Mutation::Delete, true) => "Product deleted successfully",
            (Mutation::Delete, false) => "Error in deleting product",
        }
    }
}

// =============================================================================
// Service
// =============================================================================

/// Behavior switches for [`ProductService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceOptions {
    /// Answer a lookup miss with 404 instead of `{"data": []}`.
    pub strict_lookups: bool,
}

/// Stateless CRUD service over the `products` table.
pub struct ProductService {
    executor: Arc<dyn SqlExecutor>,
    options: ServiceOptions,
}

impl ProductService {
    pub fn new(executor: Arc<dyn SqlExecutor>, options: ServiceOptions) -> Self {
        ProductService { executor, options }
    }

    /// Lists one page of products in storage scan order.
    pub async fn list_products(&self, pagination: &Pagination) -> ApiResult<ListEnvelope> {
        debug!(
            page = pagination.page(),
            size = pagination.size(),
            offset = pagination.offset(),
            "Listing products"
        );

        let records = self
            .fetch(
                SELECT_PAGE,
                vec![pagination.offset().into(), pagination.size().into()],
            )
            .await?;

        Ok(ListEnvelope {
            data: decode_products(&records)?,
            meta: pagination.meta(),
        })
    }

    /// Looks up a product by id.
    pub async fn get_product(&self, id: u64) -> ApiResult<ItemEnvelope> {
        debug!(id = id, "Getting product");
        let records = self.fetch(SELECT_BY_ID, vec![id.into()]).await?;
        self.single(records, || id.to_string())
    }

    /// Looks up a product by SKU.
    pub async fn get_product_by_sku(&self, sku: &str) -> ApiResult<ItemEnvelope> {
        debug!(sku = %sku, "Getting product by SKU");
        let records = self.fetch(SELECT_BY_SKU, vec![sku.into()]).await?;

        if records.len() > 1 {
            warn!(sku = %sku, count = records.len(), "SKU matches several products, returning the first");
        }

        self.single(records, || sku.to_string())
    }

    /// Inserts a new product; storage assigns the id.
    pub async fn create_product(&self, input: &ProductInput) -> ApiResult<MessageEnvelope> {
        debug!(sku = ?input.sku, "Creating product");
        self.apply(Mutation::Create, INSERT, input_params(input))
            .await
    }

    /// Overwrites sku, name and in_stock of an existing product.
    pub async fn update_product(&self, id: u64, input: &ProductInput) -> ApiResult<MessageEnvelope> {
        debug!(id = id, "Updating product");
        let mut params = input_params(input);
        params.push(id.into());
        self.apply(Mutation::Update, UPDATE, params).await
    }

    /// Deletes a product by id.
    pub async fn remove_product(&self, id: u64) -> ApiResult<MessageEnvelope> {
        debug!(id = id, "Deleting product");
        self.apply(Mutation::Delete, DELETE, vec![id.into()]).await
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    async fn fetch(&self, statement: &str, params: Vec<SqlValue>) -> ApiResult<Vec<Record>> {
        let outcome = self.executor.execute(statement, params).await?;

        let rows = match outcome {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Mutation { .. } => {
                warn!(sql = %statement, "Expected rows, storage returned a mutation result");
                None
            }
        };

        Ok(normalize_rows(rows))
    }

    async fn apply(
        &self,
        mutation: Mutation,
        statement: &str,
        params: Vec<SqlValue>,
    ) -> ApiResult<MessageEnvelope> {
        let outcome = self.executor.execute(statement, params).await?;

        let affected_rows = match outcome {
            QueryOutcome::Mutation { affected_rows, .. } => affected_rows,
            QueryOutcome::Rows(_) => {
                warn!(sql = %statement, "Expected an affected-row count, storage returned rows");
                0
            }
        };

        Ok(MessageEnvelope {
            message: mutation.message(affected_rows > 0).to_string(),
        })
    }

    fn single(&self, records: Vec<Record>, key: impl FnOnce() -> String) -> ApiResult<ItemEnvelope> {
        let product = records.first().map(product_from_record).transpose()?;

        if product.is_none() && self.options.strict_lookups {
            return Err(CoreError::ProductNotFound(key()).into());
        }

        Ok(ItemEnvelope {
            data: Lookup(product),
        })
    }
}

/// `[sku, name, in_stock]`, missing fields bound as NULL.
fn input_params(input: &ProductInput) -> Vec<SqlValue> {
    vec![
        input.sku.clone().into(),
        input.name.clone().into(),
        input.in_stock.map(|level| level.count()).into(),
    ]
}

fn product_from_record(record: &Record) -> DbResult<Product> {
    Ok(Product {
        id: record.get_u64("id")?,
        sku: record.get_str("sku")?.to_string(),
        name: record.get_str("name")?.to_string(),
        in_stock: record.get_i64("in_stock")?,
    })
}

fn decode_products(records: &[Record]) -> DbResult<Vec<Product>> {
    records.iter().map(product_from_record).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
