//! Off-chain client for the twin-ledger key-value store.
//!
//! This crate provides:
//! - [`Ledger`] — the `is_available` / `get_data` / `set_data` seam the
//!   ledger contract exposes, with an in-memory implementation for tests.
//! - [`DigitalTwin`] — the denormalized JSON document stored per twin.
//! - [`TwinStore`] — index synchronization: tolerant loading, twin creation,
//!   and treatment appends.

pub mod error;
pub mod ledger;
pub mod store;
pub mod twin;

pub use error::{ClientError, LedgerError};
pub use ledger::{twin_key, InMemoryLedger, Ledger, INDEX_KEY};
pub use store::TwinStore;
pub use twin::{side_effect_label, DigitalTwin, TreatmentEntry};
