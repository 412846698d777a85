//! Customer domain types.

use corner_market_core::CustomerId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered customer (domain type).
///
/// The password column is deliberately never carried on this type; credential
/// comparison happens inside the repository query.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name, also the login name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
}

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer's database ID.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
}

impl From<&Customer> for CurrentCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
        }
    }
}

/// Address fields collected at sign-up.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub apt_no: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}
