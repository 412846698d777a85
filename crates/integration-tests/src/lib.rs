//! Integration tests for Corner Market.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations to a running Postgres
//! cargo run -p corner-market-cli -- migrate
//!
//! # Start the storefront for the HTTP flow tests
//! cargo run -p corner-market-storefront
//!
//! # Run the ignored tests
//! cargo test -p corner-market-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - End-to-end HTTP tests against a running storefront
//! - `order_placement` - Repository-level transaction tests against Postgres

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session survives
/// across requests the way a browser's would.
///
/// # Panics
///
/// Panics if the client cannot be built (test helper).
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the test database.
///
/// Reads `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`).
///
/// # Panics
///
/// Panics if neither variable is set or the connection fails (test helper).
pub async fn test_pool() -> PgPool {
    let url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("STOREFRONT_DATABASE_URL or DATABASE_URL must be set");

    corner_market_storefront::db::create_pool(&url)
        .await
        .expect("Failed to connect to test database")
}

/// A unique customer name per test run, so tests don't collide.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
