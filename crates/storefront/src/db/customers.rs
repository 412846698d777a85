//! Customer repository for registration and login queries.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Customer, NewAddress};

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a customer whose name and password both match exactly.
    ///
    /// Comparison is case-sensitive SQL equality against the plaintext
    /// password column, pending a credential-hashing migration. The password
    /// never leaves the database; only the matched row comes back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_credentials(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, name, phone
            FROM customer
            WHERE name = $1 AND password = $2
            ",
        )
        .bind(name)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Create a new customer and their first address in one transaction.
    ///
    /// Either both rows are committed or neither is; a customer row without
    /// an address must never be observable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_address(
        &self,
        name: &str,
        password: &str,
        phone: &str,
        address: &NewAddress,
    ) -> Result<Customer, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            r"
            INSERT INTO customer (name, password, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone
            ",
        )
        .bind(name)
        .bind(password)
        .bind(phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("customer name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        sqlx::query(
            r"
            INSERT INTO address (street, apt_no, city, state, zip, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&address.street)
        .bind(&address.apt_no)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(customer.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(customer)
    }
}
