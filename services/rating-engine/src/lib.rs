//! Rating Engine
//!
//! Classic two-player Elo folded left-to-right over the match ledger.
//! The engine holds no state: ratings are recomputed from the full ledger
//! on every read.
//!
//! **Key Invariants:**
//! - Deterministic aggregation (same ledger, same order → same ratings)
//! - Ledger order is load-bearing and never rearranged
//! - First appearance of a participant starts from `INITIAL_RATING`
//! - Updates round half-up to the nearest integer

pub mod elo;
pub mod engine;
pub mod standings;

pub use elo::{INITIAL_RATING, K_FACTOR};
pub use engine::aggregate;
pub use standings::standings;
