//! Order placement engine and order history queries.
//!
//! A submission is a flat form payload mapping 1-based positional keys to
//! quantity strings, plus a `pay_method` field. Positions resolve against the
//! catalog snapshot pinned to the session at the last render; the scan is a
//! pure function so the resolution rules are testable without a database.

use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::PgPool;
use tower_sessions::Session;

use corner_market_core::{CustomerId, OrderId};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{CatalogItem, LineDraft, OrderLineDetail, OrderSummary};
use crate::services::CatalogService;

/// Form field carrying the payment method label.
///
/// Non-numeric, so the positional scan ignores it by construction.
pub const PAY_METHOD_FIELD: &str = "pay_method";

/// Scan a submission against a snapshot and draft the usable lines.
///
/// A key is a line candidate only if it parses as a positive integer; all
/// other keys (`pay_method` included) are ignored. Candidates resolve as
/// `snapshot[key - 1]`. Per-candidate problems are tolerated without aborting
/// the scan: out-of-range positions, unparseable quantities, and zero or
/// negative quantities each skip that candidate only. Distinct spellings of
/// the same position ("1" and "01") collapse to one draft, last value wins.
///
/// Drafts come back in snapshot order, one per resolved product, every
/// quantity positive.
#[must_use]
pub fn collect_lines(
    submission: &BTreeMap<String, String>,
    snapshot: &[CatalogItem],
) -> Vec<LineDraft> {
    let mut drafts: BTreeMap<usize, LineDraft> = BTreeMap::new();

    for (key, value) in submission {
        let Ok(position) = key.parse::<usize>() else {
            continue;
        };
        if position == 0 {
            continue;
        }
        let index = position - 1;
        let Some(item) = snapshot.get(index) else {
            continue;
        };
        let Ok(quantity) = value.trim().parse::<i32>() else {
            continue;
        };
        if quantity <= 0 {
            continue;
        }
        drafts.insert(
            index,
            LineDraft {
                product_id: item.product_id,
                quantity,
            },
        );
    }

    drafts.into_values().collect()
}

/// Order placement and history service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order from a quantity submission.
    ///
    /// Resolves positions against the session's snapshot, then writes the
    /// order header and all lines as one transaction. A submission with no
    /// usable line is rejected before any write.
    ///
    /// # Errors
    ///
    /// - [`AppError::BadRequest`] if the `pay_method` field is missing.
    /// - [`AppError::EmptyOrder`] if no positive-quantity line resolved
    ///   (including when the session holds no snapshot at all).
    /// - [`AppError::PlacementFailed`] if the transaction could not commit;
    ///   no partial rows are visible in that case.
    pub async fn place_order(
        &self,
        session: &Session,
        customer_id: CustomerId,
        submission: &BTreeMap<String, String>,
    ) -> Result<OrderId> {
        let pay_method = submission
            .get(PAY_METHOD_FIELD)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("missing pay_method".to_owned()))?;

        let snapshot = CatalogService::snapshot(session).await?.unwrap_or_default();

        let lines = collect_lines(submission, &snapshot);
        if lines.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let order_date = Utc::now().date_naive();

        self.orders
            .place(customer_id, pay_method, order_date, &lines)
            .await
            .map_err(AppError::PlacementFailed)
    }

    /// Aggregate the customer's past orders.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::QueryFailed`] if the read fails.
    pub async fn list_orders(&self, customer_id: CustomerId) -> Result<Vec<OrderSummary>> {
        Ok(self.orders.list_orders(customer_id).await?)
    }

    /// List the lines of one of the customer's orders.
    ///
    /// An order id belonging to a different customer yields
    /// [`AppError::NotFound`], not someone else's lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::QueryFailed`] if the read fails.
    pub async fn order_lines(
        &self,
        customer_id: CustomerId,
        order_id: OrderId,
    ) -> Result<Vec<OrderLineDetail>> {
        let lines = self.orders.list_order_lines(customer_id, order_id).await?;
        if lines.is_empty() {
            return Err(AppError::NotFound(format!("order {order_id}")));
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corner_market_core::{Price, ProductId};

    fn item(id: i32, name: &str, cents: i64) -> CatalogItem {
        CatalogItem {
            product_id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(cents),
            category: "Dairy".to_owned(),
        }
    }

    fn submission(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn key_i_maps_to_snapshot_position_i_minus_one() {
        let snapshot = vec![item(7, "Milk", 350), item(9, "Eggs", 200)];
        let lines = collect_lines(&submission(&[("2", "3")]), &snapshot);
        assert_eq!(
            lines,
            vec![LineDraft {
                product_id: ProductId::new(9),
                quantity: 3
            }]
        );
    }

    #[test]
    fn milk_and_eggs_worked_example() {
        // snapshot = [{id:7,"Milk",3.50},{id:9,"Eggs",2.00}]
        // submission {"1":"2","2":"0","pay_method":"card"} -> one line (7, qty 2)
        let snapshot = vec![item(7, "Milk", 350), item(9, "Eggs", 200)];
        let lines = collect_lines(
            &submission(&[("1", "2"), ("2", "0"), ("pay_method", "card")]),
            &snapshot,
        );
        assert_eq!(
            lines,
            vec![LineDraft {
                product_id: ProductId::new(7),
                quantity: 2
            }]
        );
    }

    #[test]
    fn non_numeric_keys_are_ignored() {
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(
            &submission(&[("pay_method", "cash"), ("csrf_token", "abc"), ("1", "1")]),
            &snapshot,
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn all_zero_quantities_yield_no_lines() {
        let snapshot = vec![item(1, "Bread", 299), item(2, "Butter", 450)];
        let lines = collect_lines(
            &submission(&[("1", "0"), ("2", "0"), ("pay_method", "card")]),
            &snapshot,
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn no_numeric_keys_yield_no_lines() {
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("pay_method", "card")]), &snapshot);
        assert!(lines.is_empty());
    }

    #[test]
    fn unparseable_quantity_skips_only_that_candidate() {
        let snapshot = vec![item(1, "Bread", 299), item(2, "Butter", 450)];
        let lines = collect_lines(&submission(&[("1", "lots"), ("2", "4")]), &snapshot);
        assert_eq!(
            lines,
            vec![LineDraft {
                product_id: ProductId::new(2),
                quantity: 4
            }]
        );
    }

    #[test]
    fn out_of_range_position_is_skipped() {
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("5", "2"), ("1", "1")]), &snapshot);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.product_id), Some(ProductId::new(1)));
    }

    #[test]
    fn zero_key_is_not_a_candidate() {
        // Keys are 1-based; "0" must not resolve to any product.
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("0", "2")]), &snapshot);
        assert!(lines.is_empty());
    }

    #[test]
    fn negative_quantity_is_skipped() {
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("1", "-2")]), &snapshot);
        assert!(lines.is_empty());
    }

    #[test]
    fn whitespace_around_quantity_is_tolerated() {
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("1", " 2 ")]), &snapshot);
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn duplicate_spellings_of_a_position_collapse_to_one_line() {
        // "01" and "1" both resolve position 1; the order_line composite key
        // allows only one row per (order, product).
        let snapshot = vec![item(1, "Bread", 299)];
        let lines = collect_lines(&submission(&[("01", "2"), ("1", "5")]), &snapshot);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn lines_come_back_in_snapshot_order() {
        let snapshot = vec![item(7, "Milk", 350), item(9, "Eggs", 200), item(3, "Jam", 410)];
        let lines = collect_lines(
            &submission(&[("3", "1"), ("1", "1"), ("2", "1")]),
            &snapshot,
        );
        let ids: Vec<i32> = lines.iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(ids, vec![7, 9, 3]);
    }

    #[test]
    fn empty_snapshot_resolves_nothing() {
        let lines = collect_lines(&submission(&[("1", "2")]), &[]);
        assert!(lines.is_empty());
    }
}
