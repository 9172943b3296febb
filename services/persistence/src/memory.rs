//! In-memory backend
//!
//! Process-lifetime ledger with no persistence across restarts. The list is
//! owned by the store instance; share it by sharing the instance.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use types::matches::MatchRecord;

use crate::store::{Backend, LedgerStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: Mutex<Vec<MatchRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger.
    pub fn with_matches(matches: Vec<MatchRecord>) -> Self {
        Self {
            matches: Mutex::new(matches),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    async fn read(&self) -> Result<Vec<MatchRecord>, StoreError> {
        // Writes replace the whole Vec in one assignment, so a poisoned lock
        // still guards a consistent ledger.
        let guard = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    async fn write(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        let mut guard = self.matches.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = matches.to_vec();
        Ok(())
    }
}
