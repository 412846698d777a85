//! Order repository: transactional placement and history reads.

use chrono::NaiveDate;
use corner_market_core::{CustomerId, OrderId};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{LineDraft, OrderLineDetail, OrderSummary};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write one order header and all of its lines in a single transaction.
    ///
    /// Either the header and every line are durably committed, or nothing
    /// is. A failure on the second line must leave no row from the first.
    /// Callers guarantee `lines` is non-empty and every quantity is positive;
    /// the table's CHECK constraint backstops the latter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert or the commit fails;
    /// nothing is visible to subsequent reads in that case.
    pub async fn place(
        &self,
        customer_id: CustomerId,
        pay_method: &str,
        order_date: NaiveDate,
        lines: &[LineDraft],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (OrderId,) = sqlx::query_as(
            r"
            INSERT INTO orders (customer_id, pay_method, order_date)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(customer_id)
        .bind(pay_method)
        .bind(order_date)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_line (order_id, product_id, quantity, customer_id)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Aggregate a customer's orders: unit count and total amount per order.
    ///
    /// Scoped to the given customer; other customers' orders never appear.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r"
            SELECT o.id AS order_id,
                   SUM(l.quantity)::BIGINT AS item_count,
                   SUM(l.quantity * p.price) AS amount,
                   o.order_date, o.pay_method
            FROM orders o
            JOIN order_line l ON l.order_id = o.id
            JOIN product p ON p.id = l.product_id
            WHERE o.customer_id = $1
            GROUP BY o.id, o.order_date, o.pay_method
            ORDER BY o.id DESC
            ",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List the lines of one order, joined to product, brand, and category.
    ///
    /// The customer scope is part of the WHERE clause, not a post-filter: a
    /// guessed order id belonging to another customer returns zero rows.
    ///
    /// `contains` admits several categories per product, so the join is
    /// collapsed to one row per line; the first category (and brand) by id is
    /// the one shown. Without this, a multi-category product would repeat its
    /// full `line_total` once per membership and the detail sum would drift
    /// from [`Self::list_orders`]'s `amount`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_order_lines(
        &self,
        customer_id: CustomerId,
        order_id: OrderId,
    ) -> Result<Vec<OrderLineDetail>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLineDetail>(
            r"
            SELECT DISTINCT ON (p.id)
                   p.name AS product_name,
                   b.name AS brand_name,
                   c.name AS category_name,
                   p.price,
                   l.quantity,
                   l.quantity * p.price AS line_total
            FROM order_line l
            JOIN orders o ON o.id = l.order_id
            JOIN product p ON p.id = l.product_id
            JOIN contains con ON con.product_id = p.id
            JOIN category c ON c.id = con.category_id
            LEFT JOIN belongs_to bt ON bt.product_id = p.id
            LEFT JOIN brand b ON b.id = bt.brand_id
            WHERE o.customer_id = $1 AND o.id = $2
            ORDER BY p.id, c.id, b.id
            ",
        )
        .bind(customer_id)
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
