//! `siwaras-render` — printable tanda terima documents.
//!
//! Produces a fixed-width paginated text rendering of a finalized receipt:
//! institution letterhead, document metadata, the line-item table, recipient
//! data and the dual signature block. The print timestamp is injected by the
//! caller so output is reproducible.

pub mod document;

pub use document::{render_receipt, Letterhead, Page, RenderedDocument, PAGE_HEIGHT, PAGE_WIDTH};
