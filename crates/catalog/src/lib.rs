//! `siwaras-catalog` — master item catalog and stock movement records.
//!
//! Field names on the wire follow the backing sheet's columns
//! (`kodeBarang`, `namaBarang`, `satuan`, `stok`, ...).

pub mod item;
pub mod movement;

pub use item::{Item, ItemSnapshot};
pub use movement::{InboundMovement, MovementMeta, OutboundMovement};
