//! Ledger Service
//!
//! Orchestrates one read-modify-write cycle per operation against the
//! ledger store. Nothing is cached between calls: every operation starts
//! from the store's latest durable state.
//!
//! Concurrent writes are not isolated. Two `record_match` calls that both
//! read before either writes resolve as last-write-wins.

use std::collections::HashSet;
use std::sync::Arc;

use persistence::{Backend, LedgerStore};
use tracing::{error, info, warn};
use types::errors::LedgerError;
use types::ids::RecordedAt;
use types::matches::{MatchCandidate, MatchRecord};
use types::rating::{RatingSnapshot, Standing};

use crate::clock::{Clock, SystemClock};

/// Result of a read that never fails.
///
/// `degraded` is set when the store could not be read and an empty ledger
/// was substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRead {
    pub matches: Vec<MatchRecord>,
    pub degraded: bool,
}

/// Ledger together with the ratings derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    pub matches: Vec<MatchRecord>,
    pub ratings: RatingSnapshot,
    pub degraded: bool,
}

impl LedgerState {
    pub fn standings(&self) -> Vec<Standing> {
        rating_engine::standings(&self.ratings)
    }
}

pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn backend(&self) -> Backend {
        self.store.backend()
    }

    /// Current ledger. Store failures degrade to an empty ledger.
    pub async fn list_matches(&self) -> LedgerRead {
        match self.store.read().await {
            Ok(matches) => LedgerRead {
                matches,
                degraded: false,
            },
            Err(e) => {
                warn!(backend = %self.backend(), error = %e, "ledger read failed; serving empty ledger");
                LedgerRead {
                    matches: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    /// Current ledger and the ratings folded from it.
    pub async fn current_state(&self) -> LedgerState {
        let LedgerRead { matches, degraded } = self.list_matches().await;
        let ratings = rating_engine::aggregate(&matches);
        LedgerState {
            matches,
            ratings,
            degraded,
        }
    }

    /// Validate, stamp and append a match; returns the new ledger.
    pub async fn record_match(&self, candidate: MatchCandidate) -> Result<Vec<MatchRecord>, LedgerError> {
        let mut record = candidate.into_record(RecordedAt::from_datetime(self.clock.now()))?;

        let mut matches = self.read_for_write().await?;
        record.recorded_at = unique_recorded_at(&matches, record.recorded_at);

        info!(
            participant_a = %record.participant_a,
            participant_b = %record.participant_b,
            outcome = ?record.outcome,
            recorded_at = %record.recorded_at,
            "recording match"
        );
        matches.push(record);

        self.persist(&matches).await?;
        Ok(matches)
    }

    /// Remove the record with exactly this `recordedAt`; returns the new ledger.
    ///
    /// An identifier not present in the ledger is not an error.
    pub async fn delete_match(&self, recorded_at: Option<&str>) -> Result<Vec<MatchRecord>, LedgerError> {
        let raw = recorded_at
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LedgerError::Validation("recordedAt is required".to_string()))?;
        let target: RecordedAt = raw
            .parse()
            .map_err(|e: types::ids::ParseRecordedAtError| LedgerError::Validation(e.to_string()))?;

        let mut matches = self.read_for_write().await?;
        let before = matches.len();
        matches.retain(|m| m.recorded_at != target);

        if matches.len() == before {
            info!(recorded_at = %target, "delete matched no record");
        } else {
            info!(recorded_at = %target, removed = before - matches.len(), "deleting match");
        }

        self.persist(&matches).await?;
        Ok(matches)
    }

    /// Writes never proceed from a substituted empty ledger.
    async fn read_for_write(&self) -> Result<Vec<MatchRecord>, LedgerError> {
        self.store.read().await.map_err(|e| {
            error!(backend = %self.backend(), error = %e, "ledger read failed before write");
            e.into_read_error()
        })
    }

    async fn persist(&self, matches: &[MatchRecord]) -> Result<(), LedgerError> {
        self.store.write(matches).await.map_err(|e| {
            error!(backend = %self.backend(), error = %e, "ledger write failed");
            e.into_write_error()
        })
    }
}

/// First instant at or after `candidate` not used by any record.
fn unique_recorded_at(matches: &[MatchRecord], candidate: RecordedAt) -> RecordedAt {
    let taken: HashSet<RecordedAt> = matches.iter().map(|m| m.recorded_at).collect();
    let mut recorded_at = candidate;
    while taken.contains(&recorded_at) {
        recorded_at = recorded_at.next_millisecond();
    }
    recorded_at
}
