//! Catalog snapshot service.
//!
//! Builds the catalog from the product-contains-category join and pins the
//! resulting sequence into the session. The stored sequence is the positional
//! contract consumed by order submissions: each render **replaces** it
//! wholesale, and nothing mutates it in place between render and submit.

use sqlx::PgPool;
use tower_sessions::Session;

use corner_market_core::ProductId;

use crate::db::{CatalogRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{CatalogItem, ProductDetail, Review, session_keys};

/// Catalog snapshot service.
pub struct CatalogService<'a> {
    catalog: CatalogRepository<'a>,
}

/// Product detail page payload: the product plus its reviews.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProductPage {
    #[serde(flatten)]
    pub product: ProductDetail,
    pub reviews: Vec<Review>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool),
        }
    }

    /// Build the catalog and replace the session's snapshot with it.
    ///
    /// Full overwrite, never a merge: a stale snapshot from a previous render
    /// must not survive alongside newer entries, or submissions would resolve
    /// positions against a sequence the customer never saw.
    ///
    /// # Errors
    ///
    /// Surfaces a query failure as [`AppError::QueryFailed`]; no retry.
    pub async fn refresh(&self, session: &Session) -> Result<Vec<CatalogItem>> {
        let items = self.catalog.list_products().await?;
        session.insert(session_keys::CATALOG, &items).await?;
        Ok(items)
    }

    /// Read the snapshot currently pinned to the session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn snapshot(session: &Session) -> Result<Option<Vec<CatalogItem>>> {
        Ok(session.get::<Vec<CatalogItem>>(session_keys::CATALOG).await?)
    }

    /// Full detail plus reviews for one product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the product doesn't exist.
    pub async fn product_page(&self, product_id: ProductId) -> Result<ProductPage> {
        let product = self.catalog.product_detail(product_id).await.map_err(|e| {
            if matches!(e, RepositoryError::NotFound) {
                AppError::NotFound(format!("product {product_id}"))
            } else {
                AppError::QueryFailed(e)
            }
        })?;
        let reviews = self.catalog.product_reviews(product_id).await?;
        Ok(ProductPage { product, reviews })
    }
}
