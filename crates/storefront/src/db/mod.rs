//! Database operations for the storefront `PostgreSQL`.
//!
//! ## Tables
//!
//! - `customer`, `address` - Registration and login
//! - `product`, `category`, `brand`, `supplier` - Catalog entities
//! - `contains`, `belongs_to`, `comes_from` - Catalog join tables
//! - `product_review` - Reviews shown on the product detail page
//! - `orders`, `order_line` - Placed orders
//! - `tower_sessions.session` - Session storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p corner-market-cli -- migrate
//! ```
//!
//! All queries use the runtime sqlx API with positional parameters; untrusted
//! input is never interpolated into SQL text.

pub mod catalog;
pub mod customers;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (includes pool acquire timeouts).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate customer name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// A bounded acquire timeout keeps a slow database from hanging a request;
/// acquire failures surface as [`RepositoryError::Database`].
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
