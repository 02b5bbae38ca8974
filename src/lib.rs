//! Consensus-set block maintenance
//!
//! The per-block maintenance stage of a blockchain consensus engine: the
//! mutations that follow from a block's position in the chain rather than
//! from any single transaction.
//! - Miner payouts become delayed outputs maturing `MATURITY_DELAY` blocks
//!   later
//! - Delayed outputs maturing at the current height are promoted into the
//!   spendable-output set
//! - Storage contracts whose proof window closes at the current height pay
//!   their missed-proof outputs and leave the active contract set
//!
//! Every mutation is recorded as a directional diff on the block's
//! [`ProcessedBlock`], so a chain reorganization can replay the same diffs
//! in reverse to undo the block. Maintenance runs inside one externally
//! owned read/write store transaction; on any error the caller must abort
//! that transaction, and fatal errors ([`MaintenanceError::is_fatal`])
//! must halt the process instead of being committed around.
//!
//! # Example
//!
//! ```rust
//! use consensus_set::{apply_maintenance, MemStore, Output, ProcessedBlock, MATURITY_DELAY};
//!
//! let mut tx = MemStore::new();
//! let payouts = vec![Output { amount: 50, recipient: "miner".to_string() }];
//! let mut pb = ProcessedBlock::new("00ab".to_string(), 10, payouts);
//!
//! apply_maintenance(&mut tx, &mut pb).unwrap();
//!
//! // The payout is scheduled, not yet spendable.
//! assert_eq!(pb.delayed_output_diffs.len(), 1);
//! assert_eq!(pb.delayed_output_diffs[0].maturity_height, 10 + MATURITY_DELAY);
//! assert!(pb.output_diffs.is_empty());
//! ```

pub mod consensus;
pub mod core;
pub mod storage;

// Re-export commonly used types
pub use crate::consensus::{
    apply_maintenance, commit_contract_diff, commit_delayed_output_diff, commit_output_diff,
    ConsistencyError, MaintenanceError, CONSISTENCY_CHECKS,
};
pub use crate::core::{
    miner_payout_id, missed_payout_id, BlockHeight, BlockId, ContractDiff, ContractId,
    DelayedOutputDiff, DiffDirection, Output, OutputDiff, OutputId, ProcessedBlock,
    StorageContract, MATURITY_DELAY,
};
pub use crate::storage::{MemStore, StoreError, StoreTx};
