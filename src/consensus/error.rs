//! Maintenance error classes
//!
//! Two deliberately distinct classes. Recoverable environment failures
//! (store errors, a referenced-but-absent contract) are answered by
//! aborting the enclosing transaction. Consistency violations mean the
//! consensus state itself is corrupt; callers must treat them as fatal and
//! halt rather than commit an incorrect money supply.

use crate::core::types::ContractId;
use crate::storage::store::StoreError;
use thiserror::Error;

/// Whether fatal consistency checks are compiled in.
///
/// With the `consistency-checks` feature disabled, the checks and the
/// store reads backing them are skipped entirely, trusting that upstream
/// validation already enforced every precondition.
pub const CONSISTENCY_CHECKS: bool = cfg!(feature = "consistency-checks");

/// Fatal consensus-state violations. Never commit after one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("delayed output is already in the spendable output set")]
    OutputAlreadyMature,
    #[error("missed-proof payouts are already in the spendable output set")]
    PayoutsAlreadyPaid,
    #[error("contract settled at a height other than its proof window end")]
    ContractExpiryHeight,
}

/// Errors surfaced by block maintenance.
#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("expiry index references missing storage contract {0}")]
    MissingContract(ContractId),
    #[error("consistency violation: {0}")]
    Consistency(#[from] ConsistencyError),
}

impl MaintenanceError {
    /// True for violations that must terminate the process rather than be
    /// retried or skipped; false for failures answered by aborting the
    /// enclosing transaction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MaintenanceError::Consistency(_))
    }
}
