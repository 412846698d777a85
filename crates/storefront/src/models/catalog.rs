//! Catalog domain types.
//!
//! `CatalogItem` is the session-pinned snapshot entry: the order-submission
//! format identifies products by position in the most recently rendered
//! catalog, so the snapshot sequence must serialize into the session exactly
//! as built and never be reordered in place.

use chrono::NaiveDate;
use corner_market_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the session catalog snapshot.
///
/// Position in the snapshot sequence is the contract used by order
/// submissions; see [`crate::services::orders`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CatalogItem {
    /// Product ID the position resolves to.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price at the time the snapshot was built.
    pub price: Price,
    /// Category name from the contains join.
    pub category: String,
}

/// Full product detail for the product page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub expiry: Option<NaiveDate>,
    pub category: String,
    /// Left-joined; products without a brand row have none.
    pub brand: Option<String>,
    pub supplier: Option<String>,
}

/// A customer review shown on the product page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub rating: i32,
    pub body: String,
}
