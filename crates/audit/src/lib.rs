//! `siwaras-audit` — best-effort action trail.
//!
//! Every mutation in the app layer reports who did what. Sinks are
//! fire-and-forget: a failed audit write is logged and swallowed, it never
//! fails the operation that triggered it.

pub mod actions;
pub mod sink;

pub use sink::{AuditSink, MemoryAuditSink, StoreAuditSink};
