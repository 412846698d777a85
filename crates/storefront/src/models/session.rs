//! Session keys for state stored per browser identity.
//!
//! The session holds exactly two records: the logged-in customer identity and
//! the catalog snapshot the customer last saw. Logout clears the identity but
//! may leave the snapshot behind.

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the catalog snapshot pinned to this session.
    pub const CATALOG: &str = "catalog";
}
