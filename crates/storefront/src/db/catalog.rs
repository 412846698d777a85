//! Catalog repository for read-only product queries.

use corner_market_core::ProductId;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{CatalogItem, ProductDetail, Review};

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all catalog rows via the product-contains-category join.
    ///
    /// The `ORDER BY` is load-bearing: positions in the returned sequence
    /// become the order-submission contract once stored into the session, so
    /// the query must be deterministic.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(&self) -> Result<Vec<CatalogItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r"
            SELECT p.id AS product_id, p.name, p.price, c.name AS category
            FROM product p
            JOIN contains con ON con.product_id = p.id
            JOIN category c ON c.id = con.category_id
            ORDER BY p.id, c.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get full detail for one product, including brand and supplier.
    ///
    /// Brand and supplier are left-joined; products without those rows still
    /// appear.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_detail(
        &self,
        product_id: ProductId,
    ) -> Result<ProductDetail, RepositoryError> {
        let detail = sqlx::query_as::<_, ProductDetail>(
            r"
            SELECT p.id AS product_id, p.name, p.price, p.expiry,
                   c.name AS category, b.name AS brand, s.name AS supplier
            FROM product p
            JOIN contains con ON con.product_id = p.id
            JOIN category c ON c.id = con.category_id
            LEFT JOIN belongs_to bt ON bt.product_id = p.id
            LEFT JOIN brand b ON b.id = bt.brand_id
            LEFT JOIN comes_from cf ON cf.product_id = p.id
            LEFT JOIN supplier s ON s.id = cf.supplier_id
            WHERE p.id = $1
            ",
        )
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        detail.ok_or(RepositoryError::NotFound)
    }

    /// List reviews for one product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_reviews(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r"
            SELECT rating, body
            FROM product_review
            WHERE product_id = $1
            ORDER BY id
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }
}
