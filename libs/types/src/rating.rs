//! Rating types
//!
//! Ratings are derived data: they are recomputed from the ledger on every
//! read and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from participant identifier to integer Elo rating
///
/// Uses `BTreeMap` so iteration and serialization order are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingSnapshot(BTreeMap<String, i64>);

impl RatingSnapshot {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Current rating of `participant`, if they have appeared
    pub fn get(&self, participant: &str) -> Option<i64> {
        self.0.get(participant).copied()
    }

    /// Rating of `participant`, or `default` on first appearance
    pub fn get_or(&self, participant: &str, default: i64) -> i64 {
        self.get(participant).unwrap_or(default)
    }

    pub fn set(&mut self, participant: &str, rating: i64) {
        match self.0.get_mut(participant) {
            Some(slot) => *slot = rating,
            None => {
                self.0.insert(participant.to_string(), rating);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in participant identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, rating)| (name.as_str(), *rating))
    }
}

impl FromIterator<(String, i64)> for RatingSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub participant: String,
    pub rating: i64,
}
