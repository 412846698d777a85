//! Order domain types.

use chrono::NaiveDate;
use corner_market_core::{OrderId, Price, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// One usable line drafted from an order submission, ready to be written.
///
/// Invariant: `quantity > 0`. Zero-quantity submissions never produce a
/// draft; see [`crate::services::orders::collect_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDraft {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Per-order aggregate row for the order history page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
    pub order_id: OrderId,
    /// Total units across all lines.
    pub item_count: i64,
    /// Sum of quantity times unit price across all lines.
    pub amount: Decimal,
    pub order_date: NaiveDate,
    pub pay_method: String,
}

/// One line of a single order, joined to product, brand, and category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderLineDetail {
    pub product_name: String,
    /// Left-joined; products without a brand row have none.
    pub brand_name: Option<String>,
    pub category_name: String,
    pub price: Price,
    pub quantity: i32,
    pub line_total: Decimal,
}
