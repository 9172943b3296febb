//! Types library for the match ledger
//!
//! This library provides the core type definitions shared by the rating
//! engine, the ledger store backends and the gateway.
//!
//! # Modules
//! - `ids`: The `RecordedAt` instant that identifies a match record
//! - `matches`: Match records, outcomes and creation candidates
//! - `rating`: Ratings, rating snapshots and standings
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod matches;
pub mod rating;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::matches::*;
    pub use crate::rating::*;
    pub use crate::errors::*;
}
