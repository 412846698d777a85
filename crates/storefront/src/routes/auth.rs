//! Authentication route handlers.
//!
//! Login, sign-up, and logout. On success the customer identity is written to
//! the session; failed attempts leave the identity unset.

use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::{CurrentCustomer, NewAddress};
use crate::services::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Sign-up form data: customer fields plus the first address.
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub password: String,
    pub phone: String,
    #[serde(flatten)]
    pub address: NewAddress,
}

/// Login with name and password.
///
/// Exact, case-sensitive match; zero matching rows is a 401.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Json<CurrentCustomer>> {
    let customer = AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await?;

    let current = CurrentCustomer::from(&customer);
    set_current_customer(&current, &session).await?;
    set_sentry_user(&current.id);

    tracing::info!(customer_id = %current.id, "customer logged in");
    Ok(Json(current))
}

/// Register a new customer and log them in.
///
/// The customer row and the address row are one transaction; any failure
/// reports the whole attempt as failed with no partial rows.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignUpForm>,
) -> Result<(StatusCode, Json<CurrentCustomer>)> {
    let customer = AuthService::new(state.pool())
        .sign_up(&form.name, &form.password, &form.phone, &form.address)
        .await?;

    let current = CurrentCustomer::from(&customer);
    set_current_customer(&current, &session).await?;
    set_sentry_user(&current.id);

    tracing::info!(customer_id = %current.id, "customer registered");
    Ok((StatusCode::CREATED, Json(current)))
}

/// Log out: clear the identity portion of session state.
///
/// The cached catalog snapshot is not cleared; the next catalog render
/// overwrites it.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_customer(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
