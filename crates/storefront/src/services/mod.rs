//! Business logic services.
//!
//! Services sit between the HTTP routes and the repositories: they own the
//! workflow rules (session snapshot lifecycle, submission scanning, identity
//! establishment) while the repositories own the SQL.

pub mod auth;
pub mod catalog;
pub mod orders;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use orders::OrderService;
