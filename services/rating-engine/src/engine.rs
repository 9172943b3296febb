//! Ledger aggregation
//!
//! Folds an ordered match sequence into a rating snapshot.

use types::matches::MatchRecord;
use types::rating::RatingSnapshot;

use crate::elo::{self, INITIAL_RATING};

/// Compute every participant's rating from the ledger.
///
/// Matches are applied strictly in the given order, starting from an empty
/// snapshot. An empty ledger yields an empty snapshot.
pub fn aggregate(matches: &[MatchRecord]) -> RatingSnapshot {
    matches.iter().fold(RatingSnapshot::new(), |mut ratings, record| {
        apply(&mut ratings, record);
        ratings
    })
}

/// Apply a single match to `ratings` in place.
pub fn apply(ratings: &mut RatingSnapshot, record: &MatchRecord) {
    let rating_a = ratings.get_or(&record.participant_a, INITIAL_RATING);
    let rating_b = ratings.get_or(&record.participant_b, INITIAL_RATING);

    let (next_a, next_b) = elo::update(rating_a, rating_b, record.outcome);

    ratings.set(&record.participant_a, next_a);
    ratings.set(&record.participant_b, next_b);
}


// ── Property-Based Tests ────────────────────────────────────────────
