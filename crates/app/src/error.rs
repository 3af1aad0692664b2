use thiserror::Error;

use siwaras_core::{DomainError, ReceiptId};
use siwaras_ledger::LedgerError;
use siwaras_store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("tanda terima {0} not found")]
    ReceiptNotFound(ReceiptId),

    /// Finalize stopped partway: `deducted` line items already hit the
    /// store and stay deducted, the receipt stays Draft.
    #[error("finalize stopped at {failed_item} after {deducted} deduction(s): {source}")]
    FinalizeFailed {
        failed_item: String,
        deducted: usize,
        #[source]
        source: LedgerError,
    },
}

impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Domain(e) => ServiceError::Domain(e),
            LedgerError::Store(e) => ServiceError::Store(e),
        }
    }
}
