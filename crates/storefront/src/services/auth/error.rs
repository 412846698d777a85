//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Name/password pair did not match any customer row.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A customer with this name already exists.
    #[error("customer already exists")]
    AlreadyExists,

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
