//! # HTTP Routes
//!
//! Assembles the product routes and the health check into one router.
//!
//! ```text
//! Request ──► TraceLayer ──► Router ──► handler ──► ProductService
//!                                           │
//!                                           └── Err(ApiError) ──► {"message": ...}
//! ```

pub mod products;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(products::product_routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus one round trip to the database.
async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    match state.executor.health_check().await {
        Ok(_) => Ok(Json(json!({ "status": "ok" }))),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            Err(ApiError::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use catalog_db::{DbError, SqlValue};

    use super::*;
    use crate::test_support::StubExecutor;
    use crate::ServiceOptions;

    #[tokio::test]
    async fn test_health_ok() {
        let stub = StubExecutor::new();
        let app = router(AppState::new(stub.clone(), 10, ServiceOptions::default()));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stub.calls(), vec![("SELECT 1".to_string(), Vec::<SqlValue>::new())]);
    }

    #[tokio::test]
    async fn test_health_database_down() {
        let stub = StubExecutor::failing(DbError::PoolExhausted);
        let app = router(AppState::new(stub, 10, ServiceOptions::default()));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = router(AppState::new(StubExecutor::new(), 10, ServiceOptions::default()));

        let response = app
            .oneshot(Request::get("/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
