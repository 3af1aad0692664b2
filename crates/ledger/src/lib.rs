//! `siwaras-ledger` — stock ledger over the record store.
//!
//! Maintains per-item quantity-on-hand through inbound and outbound
//! movements. There is no transaction across calls and no concurrency
//! control: the outbound sufficiency check runs against whatever stock
//! figure the store returned for this call, which can be stale by the time
//! the movement posts. See [`StockLedger::record_outbound`].

pub mod ledger;

pub use ledger::{LedgerError, StockLedger};
