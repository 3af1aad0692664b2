//! `siwaras-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every other
//! crate: the error taxonomy, tenant selection, identifier newtypes and the
//! explicit session context. No IO lives here.

pub mod error;
pub mod id;
pub mod session;
pub mod tenant;

pub use error::{DomainError, DomainResult};
pub use id::{ItemCode, MovementId, ReceiptId};
pub use session::Session;
pub use tenant::Tenant;
