//! Match ledger gateway
//!
//! Hosts the Ledger Service (create/list/delete over the ledger store,
//! ratings through the rating engine) and exposes it over HTTP:
//!
//! - `GET    /matches`                  → ledger as a JSON array
//! - `POST   /matches`                  → record a match (session required)
//! - `DELETE /matches?recordedAt=<ts>`  → delete a match (session required)
//! - `GET    /ratings`                  → standings recomputed from the ledger
//!
//! The same routes are also served under `/api`.

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod service;
pub mod state;
