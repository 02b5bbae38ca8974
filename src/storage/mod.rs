//! Storage layer for the consensus set
//!
//! The [`store::StoreTx`] trait is the transactional key-value surface the
//! consensus store must provide; the ledger modules build the three
//! consensus structures on top of it:
//! - `delayed`: not-yet-spendable outputs bucketed by maturity height
//! - `spendable`: the spendable-output set
//! - `contracts`: active storage contracts plus a window-end expiry index

pub mod contracts;
pub mod delayed;
pub mod keys;
pub mod spendable;
pub mod store;

pub use store::{MemStore, StoreError, StoreTx};
