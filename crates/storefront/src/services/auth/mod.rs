//! Session/identity service.
//!
//! Owns the customer-identity half of the workflow: resolving login and
//! sign-up requests to a [`Customer`]. Session mutation (storing or clearing
//! the identity record) happens in the route handlers via
//! [`crate::middleware::auth`], keeping this service free of HTTP state.
//!
//! Credential comparison is plain SQL equality against the stored password,
//! preserved from the legacy system and isolated in
//! [`CustomerRepository::find_by_credentials`] pending a hashing migration.

mod error;

pub use error::AuthError;

use sqlx::PgPool;

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::{Customer, NewAddress};

/// Authentication service.
///
/// Handles customer login and registration.
pub struct AuthService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Login with name and password.
    ///
    /// Exactly one matching row is expected; zero rows is a failed login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no customer matches.
    pub async fn login(&self, name: &str, password: &str) -> Result<Customer, AuthError> {
        self.customers
            .find_by_credentials(name, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Register a new customer.
    ///
    /// The customer row and its first address row are written in one
    /// transaction; a failed sign-up leaves no partial rows.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyExists` if the name is taken.
    pub async fn sign_up(
        &self,
        name: &str,
        password: &str,
        phone: &str,
        address: &NewAddress,
    ) -> Result<Customer, AuthError> {
        self.customers
            .create_with_address(name, password, phone, address)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AlreadyExists,
                other => AuthError::Repository(other),
            })
    }
}
