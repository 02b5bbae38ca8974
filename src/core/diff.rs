//! Directional diff records and the per-block accumulator
//!
//! Every consensus-set mutation performed during block maintenance is
//! recorded as a diff on the block's [`ProcessedBlock`]. Applying a block
//! replays its diffs forward; undoing it during a chain reorganization
//! replays them with the opposite direction, in reverse order.

use crate::core::types::{BlockHeight, BlockId, ContractId, Output, OutputId, StorageContract};
use serde::{Deserialize, Serialize};

/// Direction of a diff: `Apply` performs the mutation, `Revert` undoes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffDirection {
    Apply,
    Revert,
}

impl DiffDirection {
    /// The opposite direction, used when a block is undone.
    pub fn inverse(self) -> Self {
        match self {
            DiffDirection::Apply => DiffDirection::Revert,
            DiffDirection::Revert => DiffDirection::Apply,
        }
    }
}

/// A mutation of the spendable-output set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDiff {
    pub direction: DiffDirection,
    pub id: OutputId,
    pub output: Output,
}

/// A mutation of the delayed-output ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedOutputDiff {
    pub direction: DiffDirection,
    pub id: OutputId,
    pub output: Output,
    /// Height at which the output becomes spendable.
    pub maturity_height: BlockHeight,
}

/// A mutation of the active storage contract set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDiff {
    pub direction: DiffDirection,
    pub id: ContractId,
    pub contract: StorageContract,
}

/// Accumulator for one block's consensus-level effects.
///
/// Created empty when the block begins processing. Each maintenance stage
/// appends diffs in the exact order its mutations hit the store; callers
/// undoing the block must replay them in reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedBlock {
    /// Hash of the block being processed.
    pub block_id: BlockId,
    /// Height of the block within the chain.
    pub height: BlockHeight,
    /// The block's direct miner payouts, in block order.
    pub miner_payouts: Vec<Output>,
    /// Spendable-output mutations, in application order.
    pub output_diffs: Vec<OutputDiff>,
    /// Delayed-output ledger mutations, in application order.
    pub delayed_output_diffs: Vec<DelayedOutputDiff>,
    /// Contract set mutations, in application order.
    pub contract_diffs: Vec<ContractDiff>,
}

impl ProcessedBlock {
    /// Start processing a block: no diffs recorded yet.
    pub fn new(block_id: BlockId, height: BlockHeight, miner_payouts: Vec<Output>) -> Self {
        Self {
            block_id,
            height,
            miner_payouts,
            output_diffs: Vec::new(),
            delayed_output_diffs: Vec::new(),
            contract_diffs: Vec::new(),
        }
    }

    /// Record a spendable-output mutation.
    pub fn record_output_diff(&mut self, diff: OutputDiff) {
        self.output_diffs.push(diff);
    }

    /// Record a delayed-output ledger mutation.
    pub fn record_delayed_output_diff(&mut self, diff: DelayedOutputDiff) {
        self.delayed_output_diffs.push(diff);
    }

    /// Record a contract set mutation.
    pub fn record_contract_diff(&mut self, diff: ContractDiff) {
        self.contract_diffs.push(diff);
    }
}
