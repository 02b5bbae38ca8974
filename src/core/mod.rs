//! Core consensus-set data
//!
//! Pure data types with no storage behavior:
//! - Value types and identifiers (outputs, storage contracts, id derivation)
//! - The directional diff model and the per-block accumulator

pub mod diff;
pub mod types;

pub use diff::{ContractDiff, DelayedOutputDiff, DiffDirection, OutputDiff, ProcessedBlock};
pub use types::{
    miner_payout_id, missed_payout_id, BlockHeight, BlockId, ContractId, Output, OutputId,
    StorageContract, MATURITY_DELAY,
};
