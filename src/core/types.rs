//! Fundamental consensus-set value types
//!
//! Identifiers are hex-encoded SHA-256 digests, the same shape transaction
//! processing uses for ordinary output ids. Automatic payout ids are domain
//! separated so they can never collide with transaction outputs or with
//! each other.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// =============================================================================
// Constants
// =============================================================================

/// Number of blocks an output must wait after creation before it becomes
/// spendable. Applies to miner payouts and missed-proof payouts alike.
pub const MATURITY_DELAY: BlockHeight = 50;

// =============================================================================
// Identifiers
// =============================================================================

/// Height of a block within the chain.
pub type BlockHeight = u64;

/// Hex-encoded block hash.
pub type BlockId = String;

/// Hex-encoded output identifier.
pub type OutputId = String;

/// Hex-encoded storage contract identifier.
pub type ContractId = String;

// =============================================================================
// Value types
// =============================================================================

/// An amount of coins bound to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Amount of coins
    pub amount: u64,
    /// Recipient's address
    pub recipient: String,
}

/// An active storage contract, reduced to what block maintenance needs:
/// when its proof window closes and what it owes if no valid proof arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageContract {
    /// Height at which the proof window closes.
    pub window_end: BlockHeight,
    /// Outputs paid, in order, if the window closes without a valid proof.
    pub missed_payouts: Vec<Output>,
}

// =============================================================================
// Id derivation
// =============================================================================

/// Derive the id of the `index`-th miner payout of a block.
pub fn miner_payout_id(block_id: &str, index: u64) -> OutputId {
    derive_id("miner payout", block_id.as_bytes(), index)
}

/// Derive the id of the `index`-th missed-proof payout of a contract.
pub fn missed_payout_id(contract_id: &str, index: u64) -> OutputId {
    derive_id("missed proof payout", contract_id.as_bytes(), index)
}

fn derive_id(tag: &str, parent: &[u8], index: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tag.as_bytes());
    hasher.update(parent);
    hasher.update(index.to_be_bytes());
    hex::encode(hasher.finalize())
}

// =============================================================================
// Tests
// =============================================================================
