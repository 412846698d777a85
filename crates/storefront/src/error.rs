//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every variant is recovered at the boundary of the operation that detected
//! it; none crash the process, and none retry automatically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// No valid customer identity in the session.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Login credentials did not match any customer.
    #[error("Auth failed")]
    AuthFailed,

    /// The registration write sequence could not complete.
    #[error("Sign-up failed: {0}")]
    SignUpFailed(String),

    /// The order submission contained no usable positive-quantity line.
    #[error("Empty order")]
    EmptyOrder,

    /// Underlying data access failed or timed out.
    #[error("Query failed: {0}")]
    QueryFailed(#[from] RepositoryError),

    /// The order transaction could not commit.
    #[error("Placement failed: {0}")]
    PlacementFailed(RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::AuthFailed,
            AuthError::AlreadyExists => Self::SignUpFailed("name already taken".to_owned()),
            AuthError::Repository(RepositoryError::Conflict(msg)) => Self::SignUpFailed(msg),
            AuthError::Repository(other) => Self::QueryFailed(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::QueryFailed(_) | Self::PlacementFailed(_) | Self::Session(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Unauthenticated | Self::AuthFailed => StatusCode::UNAUTHORIZED,
            Self::SignUpFailed(_) => StatusCode::CONFLICT,
            Self::EmptyOrder => StatusCode::UNPROCESSABLE_ENTITY,
            Self::QueryFailed(RepositoryError::NotFound) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::QueryFailed(_) | Self::PlacementFailed(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Unauthenticated => "Not logged in".to_owned(),
            Self::AuthFailed => "Invalid credentials".to_owned(),
            Self::SignUpFailed(msg) => msg.clone(),
            Self::EmptyOrder => "Order contained no items".to_owned(),
            Self::QueryFailed(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::QueryFailed(_) | Self::PlacementFailed(_) | Self::Session(_) => {
                "Internal server error".to_owned()
            }
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a customer ID.
///
/// Call this after successful authentication to associate errors with customers.
pub fn set_sentry_user(customer_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(customer_id.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the customer.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::BadRequest("missing pay_method".to_string());
        assert_eq!(err.to_string(), "Bad request: missing pay_method");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AppError::AuthFailed), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::SignUpFailed("taken".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::EmptyOrder),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::QueryFailed(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::PlacementFailed(RepositoryError::Conflict(
                "dup".to_owned()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_conversion() {
        assert!(matches!(
            AppError::from(AuthError::InvalidCredentials),
            AppError::AuthFailed
        ));
        assert!(matches!(
            AppError::from(AuthError::AlreadyExists),
            AppError::SignUpFailed(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::Repository(RepositoryError::Conflict(
                "x".to_owned()
            ))),
            AppError::SignUpFailed(_)
        ));
    }
}
