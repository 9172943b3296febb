//! Match record types
//!
//! A match record is a single resolved contest between two named
//! participants. Records are immutable once appended to the ledger.
//!
//! Records written by the earlier version of the service used the field
//! names `player1`/`player2`/`result`/`date`; those are accepted as aliases
//! on input, output always uses the current names.

use crate::errors::LedgerError;
use crate::ids::RecordedAt;
use serde::{Deserialize, Serialize};

/// Result of a match from the point of view of participant A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Participant A won
    #[serde(rename = "A_WINS", alias = "player1")]
    AWins,
    /// Participant B won
    #[serde(rename = "B_WINS", alias = "player2")]
    BWins,
    /// Neither won
    #[serde(rename = "DRAW", alias = "draw")]
    Draw,
}

impl Outcome {
    /// Actual scores `(S_A, S_B)` used by the Elo update
    pub fn scores(&self) -> (f64, f64) {
        match self {
            Outcome::AWins => (1.0, 0.0),
            Outcome::BWins => (0.0, 1.0),
            Outcome::Draw => (0.5, 0.5),
        }
    }
}

/// A persisted match record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(alias = "player1")]
    pub participant_a: String,
    #[serde(alias = "player2")]
    pub participant_b: String,
    #[serde(alias = "result")]
    pub outcome: Outcome,
    #[serde(alias = "date")]
    pub recorded_at: RecordedAt,
}

impl MatchRecord {
    /// Whether `participant` took part in this match
    pub fn involves(&self, participant: &str) -> bool {
        self.participant_a == participant || self.participant_b == participant
    }
}

/// A match submitted for recording, before validation
///
/// Every field is optional so that missing input surfaces as a
/// validation error with a useful message rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    #[serde(default, alias = "player1")]
    pub participant_a: Option<String>,
    #[serde(default, alias = "player2")]
    pub participant_b: Option<String>,
    #[serde(default, alias = "result")]
    pub outcome: Option<Outcome>,
}

impl MatchCandidate {
    pub fn new(participant_a: impl Into<String>, participant_b: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            participant_a: Some(participant_a.into()),
            participant_b: Some(participant_b.into()),
            outcome: Some(outcome),
        }
    }

    /// Validate the candidate and stamp it with its identifier.
    ///
    /// Participant names are checked for blankness but stored exactly as
    /// given; equality is exact string comparison.
    pub fn into_record(self, recorded_at: RecordedAt) -> Result<MatchRecord, LedgerError> {
        let participant_a = required_participant(self.participant_a, "participantA")?;
        let participant_b = required_participant(self.participant_b, "participantB")?;

        if participant_a == participant_b {
            return Err(LedgerError::Validation(
                "participantA and participantB must be distinct".to_string(),
            ));
        }

        let outcome = self
            .outcome
            .ok_or_else(|| LedgerError::Validation("outcome is required".to_string()))?;

        Ok(MatchRecord {
            participant_a,
            participant_b,
            outcome,
            recorded_at,
        })
    }
}

fn required_participant(value: Option<String>, field: &str) -> Result<String, LedgerError> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(LedgerError::Validation(format!("{field} must be a non-empty string"))),
    }
}
