//! Error types for the match ledger
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Top-level ledger error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Bad or missing input, surfaced to the caller
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store could not be read; recovered locally on plain reads
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// The store did not durably accept a write
    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl LedgerError {
    /// The human-readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            LedgerError::Validation(msg)
            | LedgerError::StorageRead(msg)
            | LedgerError::StorageWrite(msg) => msg,
        }
    }
}
