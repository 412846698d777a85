//! Order route handlers.
//!
//! All three operations require a logged-in customer; `RequireAuth` fails
//! closed before any handler body runs.

use std::collections::BTreeMap;

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use corner_market_core::OrderId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{OrderLineDetail, OrderSummary};
use crate::services::OrderService;
use crate::state::AppState;

/// Response body for a successful placement.
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
}

/// Place an order from a quantity submission.
///
/// The form is a flat map: 1-based positional keys paired with quantity
/// strings, plus the `pay_method` field. Positions resolve against the
/// snapshot pinned to this session at the last catalog render.
#[instrument(skip_all, fields(customer_id = %customer.id))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(customer): RequireAuth,
    Form(submission): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<PlacedOrder>)> {
    let order_id = OrderService::new(state.pool())
        .place_order(&session, customer.id, &submission)
        .await?;

    tracing::info!(%order_id, "order placed");
    Ok((StatusCode::CREATED, Json(PlacedOrder { order_id })))
}

/// Order history: per-order aggregates for the logged-in customer.
#[instrument(skip_all, fields(customer_id = %customer.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderService::new(state.pool())
        .list_orders(customer.id)
        .await?;
    Ok(Json(orders))
}

/// Lines of one order belonging to the logged-in customer.
///
/// A guessed order id owned by someone else is a 404, never their lines.
#[instrument(skip(state, customer), fields(customer_id = %customer.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Vec<OrderLineDetail>>> {
    let lines = OrderService::new(state.pool())
        .order_lines(customer.id, order_id)
        .await?;
    Ok(Json(lines))
}
