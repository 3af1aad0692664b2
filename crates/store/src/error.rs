//! Store/transport error model.

use thiserror::Error;

/// Failure talking to (or decoding from) the record store.
///
/// The response envelope is `{ok, result?, error?}`; `ok: false`, an
/// HTTP-layer failure, or a missing expected result field all surface as
/// `RequestFailed` — absence of the expected field is never treated as
/// empty-but-successful.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport failure or store-reported error.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// A row came back in a shape the caller cannot decode.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// Client configuration problem (e.g. missing endpoint URL).
    #[error("store configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }
}
