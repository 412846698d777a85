//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;
use tracing::instrument;

use corner_market_core::ProductId;

use crate::error::Result;
use crate::models::CatalogItem;
use crate::services::{CatalogService, catalog::ProductPage};
use crate::state::AppState;

/// Render the catalog.
///
/// Every render rebuilds the snapshot and replaces the session's copy, so
/// the sequence the customer sees is exactly the one later submissions
/// resolve positions against.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<CatalogItem>>> {
    let items = CatalogService::new(state.pool()).refresh(&session).await?;
    tracing::debug!(items = items.len(), "catalog snapshot refreshed");
    Ok(Json(items))
}

/// Product detail page: product, brand, supplier, and reviews.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ProductPage>> {
    let page = CatalogService::new(state.pool())
        .product_page(product_id)
        .await?;
    Ok(Json(page))
}
