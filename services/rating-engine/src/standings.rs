//! Leaderboard ordering

use types::rating::{RatingSnapshot, Standing};

/// Order participants by rating, highest first; equal ratings by identifier.
pub fn standings(ratings: &RatingSnapshot) -> Vec<Standing> {
    let mut rows: Vec<Standing> = ratings
        .iter()
        .map(|(participant, rating)| Standing {
            participant: participant.to_string(),
            rating,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| a.participant.cmp(&b.participant))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, i64)]) -> RatingSnapshot {
        entries
            .iter()
            .map(|(name, rating)| (name.to_string(), *rating))
            .collect()
    }

    #[test]
    fn test_highest_rating_first() {
        let rows = standings(&snapshot(&[("bob", 1184), ("alice", 1216), ("carol", 1200)]));
        let names: Vec<_> = rows.iter().map(|row| row.participant.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol", "bob"]);
    }

    #[test]
    fn test_ties_broken_by_identifier() {
        let rows = standings(&snapshot(&[("zed", 1200), ("amy", 1200), ("Bea", 1200)]));
        let names: Vec<_> = rows.iter().map(|row| row.participant.as_str()).collect();
        assert_eq!(names, vec!["Bea", "amy", "zed"]);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(standings(&RatingSnapshot::new()).is_empty());
    }
}
