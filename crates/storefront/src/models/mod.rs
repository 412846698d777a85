//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from raw form
//! payloads and HTTP concerns.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod session;

pub use catalog::{CatalogItem, ProductDetail, Review};
pub use customer::{Customer, CurrentCustomer, NewAddress};
pub use order::{LineDraft, OrderLineDetail, OrderSummary};
pub use session::keys as session_keys;
