//! `siwaras-store` — generic client for the remote tabular record store.
//!
//! The backing store is a spreadsheet-style endpoint: GET requests read rows
//! of a record type, POST requests apply one named operation. Everything is
//! scoped to a tenant. Two implementations are provided: the HTTP client
//! used in production and an in-memory stand-in that mirrors the backend's
//! row semantics for tests and local wiring (the same split the rest of the
//! workspace relies on for integration tests).

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod ops;
mod record_store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use http::HttpRecordStore;
pub use memory::InMemoryRecordStore;
pub use record_store::{decode_rows, RecordStore};
