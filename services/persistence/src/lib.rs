//! Ledger Store
//!
//! Durable storage of the match ledger behind a single read/write
//! contract, with three interchangeable backends:
//!
//! - `kv`: managed key-value store reached over its REST API
//! - `file`: a JSON document on local disk
//! - `memory`: process-lifetime list with no persistence
//!
//! Every backend stores the whole ledger as one JSON array and replaces it
//! wholesale on write. `write(M); read() == M` holds for each of them.
//! The backend is chosen once at startup by `select::probe`.

pub mod store;
pub mod normalize;
pub mod memory;
pub mod file;
pub mod kv;
pub mod select;

pub use store::{Backend, LedgerStore, StoreError};
pub use select::{probe, StoreSettings};
