//! Catalog API handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use example_store_core::{Product, ProductId, ProductSummary};
use tracing::instrument;

use crate::catalog::CatalogClient;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every product summary.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductSummary>>> {
    let products = state.catalog().fetch_product_summaries().await?;
    Ok(Json(products))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id: {id}")))?;
    let product = state.catalog().fetch_product_by_id(id).await?;
    Ok(Json(product))
}
