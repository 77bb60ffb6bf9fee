//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//!
//! # Catalog API (under the configured base path, e.g. /hw/store)
//! GET  {base}/api/products                  - Product summaries
//! GET  {base}/api/products/{id}             - Product detail
//! ```

pub mod products;

use axum::{Router, http::Request, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the catalog API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
}

/// Create all routes for the storefront, mounted under `base_path`.
pub fn routes(base_path: &str) -> Router<AppState> {
    let store = Router::new().nest("/api", api_routes());

    let router = Router::new().route("/health", get(health));
    // axum does not nest at the root; an empty base path merges instead
    if base_path.is_empty() {
        router.merge(store)
    } else {
        router.nest(base_path, store)
    }
}

/// Build the full application: routes, fallback, tracing, and request IDs.
pub fn app(state: AppState) -> Router {
    let base_path = state.config().base_path.clone();

    routes(&base_path)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(crate::middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
