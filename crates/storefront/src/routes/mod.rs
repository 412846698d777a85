//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Catalog
//! GET  /catalog                - Render the catalog, pinning the snapshot
//! GET  /catalog/{product_id}   - Product detail with reviews
//!
//! # Auth
//! POST /auth/login             - Login
//! POST /auth/signup            - Register customer + first address
//! POST /auth/logout            - Clear session identity
//!
//! # Orders (require auth)
//! GET  /orders                 - Order history aggregates
//! GET  /orders/{order_id}      - Lines of one order (ownership-checked)
//! POST /orders                 - Place an order from a quantity submission
//! ```

pub mod auth;
pub mod catalog;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::sign_up))
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{product_id}", get(catalog::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::place))
        .route("/{order_id}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog_routes())
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
}
