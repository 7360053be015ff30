//! Product HTTP Routes
//!
//! Thin handlers: extract, call [`ProductService`](crate::ProductService),
//! wrap the envelope in `Json`. Every failure leaves as an [`ApiError`],
//! which is also where it gets logged.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use catalog_core::{Pagination, ProductInput};

use crate::error::ApiResult;
use crate::services::{ItemEnvelope, ListEnvelope, MessageEnvelope};
use crate::AppState;

// ==================
// Request Types
// ==================

/// Raw `?page=&size=` values; coercion happens in [`Pagination::from_query`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub size: Option<String>,
}

// ==================
// Router
// ==================

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/sku/{sku}", get(get_product_by_sku))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(remove_product),
        )
}

// ==================
// Handlers
// ==================

async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ListEnvelope>> {
    let Query(params) = params?;

    let pagination = Pagination::from_query(
        params.page.as_deref(),
        params.size.as_deref(),
        state.list_per_page,
    )?;

    state
        .products
        .list_products(&pagination)
        .await
        .map(Json)
}

async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<ItemEnvelope>> {
    let Path(id) = id?;

    state
        .products
        .get_product(id)
        .await
        .map(Json)
}

async fn get_product_by_sku(
    State(state): State<AppState>,
    sku: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ItemEnvelope>> {
    let Path(sku) = sku?;

    state
        .products
        .get_product_by_sku(&sku)
        .await
        .map(Json)
}

async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<MessageEnvelope>> {
    let Json(input) = body?;

    state
        .products
        .create_product(&input)
        .await
        .map(Json)
}

async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<MessageEnvelope>> {
    let Path(id) = id?;
    let Json(input) = body?;

    state
        .products
        .update_product(id, &input)
        .await
        .map(Json)
}

async fn remove_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<MessageEnvelope>> {
    let Path(id) = id?;

    state
        .products
        .remove_product(id)
        .await
        .map(Json)
}

// ==================
// Tests
// ==================
