//! `siwaras-app` — tenant-scoped application services.
//!
//! Ties the aggregate, the stock ledger, the renderer and the audit trail
//! together over one record store. Each [`AppServices`] value is bound to a
//! tenant and a signed-in session; the admin frontend holds one per open
//! dashboard.

pub mod error;
pub mod services;

pub use error::ServiceError;
pub use services::AppServices;
