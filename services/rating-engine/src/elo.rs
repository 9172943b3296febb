//! Elo update rule
//!
//! Logistic expected score on a 400-point scale with a fixed K-factor.

use types::matches::Outcome;

/// Rating assigned to a participant on first appearance
pub const INITIAL_RATING: i64 = 1200;

/// Maximum rating swing per game
pub const K_FACTOR: f64 = 32.0;

/// Expected score of a player rated `rating` against `opponent`
pub fn expected_score(rating: i64, opponent: i64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / 400.0))
}

/// Round to the nearest integer, `.5` going towards positive infinity.
///
/// `f64::round` rounds half away from zero, which differs for negative
/// halves; ratings produced here must not depend on the sign.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Apply one match to the current ratings of A and B, returning `(R_A', R_B')`.
pub fn update(rating_a: i64, rating_b: i64, outcome: Outcome) -> (i64, i64) {
    let expected_a = expected_score(rating_a, rating_b);
    let expected_b = 1.0 - expected_a;
    let (score_a, score_b) = outcome.scores();

    (
        round_half_up(rating_a as f64 + K_FACTOR * (score_a - expected_a)),
        round_half_up(rating_b as f64 + K_FACTOR * (score_b - expected_b)),
    )
}
