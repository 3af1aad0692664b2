//! `siwaras-receipt` — the tanda terima aggregate.
//!
//! A receipt starts as a Draft that accumulates line items and recipient
//! data, then finalizes exactly once. The aggregate here is pure state
//! machine: decisions (`prepare_*`, `ensure_*`, `finalize_preconditions`)
//! are side-effect free, mutation is separate, and all store orchestration
//! lives in `siwaras-app`.

pub mod receipt;

pub use receipt::{
    LineItem, Receipt, ReceiptHeader, Recipient, RecipientField, ReceiptStatus, PLACEHOLDER,
};
