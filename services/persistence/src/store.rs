//! Store contract shared by every backend

use async_trait::async_trait;
use std::fmt;
use std::io;
use thiserror::Error;
use types::errors::LedgerError;
use types::matches::MatchRecord;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("KV error: {0}")]
    Kv(String),
}

impl StoreError {
    /// Classify a failed read for the ledger error taxonomy.
    pub fn into_read_error(self) -> LedgerError {
        LedgerError::StorageRead(self.to_string())
    }

    /// Classify a failed write for the ledger error taxonomy.
    pub fn into_write_error(self) -> LedgerError {
        LedgerError::StorageWrite(self.to_string())
    }
}

// ── Backend ─────────────────────────────────────────────────────────

/// Which backend serves the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Kv,
    File,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Kv => "kv",
            Backend::File => "file",
            Backend::Memory => "memory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Store Trait ─────────────────────────────────────────────────────

/// Durable home of the match ledger.
///
/// Properties required from implementations:
/// - Whole-ledger reads and writes; no partial updates
/// - Insertion order preserved exactly
/// - A missing ledger reads as an empty sequence
///
/// No isolation is provided across callers: two read-modify-write cycles
/// that interleave resolve as last-write-wins.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// The backend kind, reported for observability.
    fn backend(&self) -> Backend;

    /// Load the full ledger in order.
    async fn read(&self) -> Result<Vec<MatchRecord>, StoreError>;

    /// Replace the full ledger.
    async fn write(&self, matches: &[MatchRecord]) -> Result<(), StoreError>;
}
