//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, state
/// machine violations, stock invariants). Transport and store concerns belong
/// to `siwaras-store`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or non-positive input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation was attempted against the wrong receipt status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The item code is already present in the receipt's line items.
    #[error("item {0} is already in the receipt")]
    DuplicateItem(String),

    /// A line item requested more than the stock visible when it was added.
    #[error("requested {requested} of {code} but only {available} in stock")]
    ExceedsStock {
        code: String,
        requested: i64,
        available: i64,
    },

    /// An outbound movement would take quantity-on-hand below zero.
    #[error("insufficient stock for {code}: requested {requested}, on hand {available}")]
    InsufficientStock {
        code: String,
        requested: i64,
        available: i64,
    },

    /// Finalize was attempted on a receipt without line items.
    #[error("receipt has no line items")]
    EmptyLineItems,

    /// Finalize was attempted with a missing recipient name or id number.
    #[error("recipient data incomplete: {0}")]
    IncompleteRecipient(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn incomplete_recipient(msg: impl Into<String>) -> Self {
        Self::IncompleteRecipient(msg.into())
    }
}
