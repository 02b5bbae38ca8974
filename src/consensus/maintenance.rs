//! Per-block consensus-set maintenance
//!
//! Runs once per accepted block, after all of the block's transactions
//! have been applied and before the enclosing transaction commits. Three
//! stages in fixed order:
//! 1. the block's miner payouts become delayed outputs,
//! 2. delayed outputs maturing at this height become spendable,
//! 3. contracts whose proof window closes at this height settle their
//!    missed payouts and leave the active set.
//!
//! Every mutation is recorded as a diff on the block so a reorganization
//! can undo it. On any error the caller must abort the enclosing
//! transaction; no stage repairs partial state itself.

use crate::consensus::commit::{
    commit_contract_diff, commit_delayed_output_diff, commit_output_diff,
};
use crate::consensus::error::{ConsistencyError, MaintenanceError, CONSISTENCY_CHECKS};
use crate::core::diff::{ContractDiff, DelayedOutputDiff, DiffDirection, OutputDiff, ProcessedBlock};
use crate::core::types::{miner_payout_id, missed_payout_id, ContractId, MATURITY_DELAY};
use crate::storage::store::StoreTx;
use crate::storage::{contracts, delayed, spendable};

/// Schedule the block's miner payouts as delayed outputs maturing
/// `MATURITY_DELAY` blocks from now.
fn apply_miner_payouts<S: StoreTx + ?Sized>(
    tx: &mut S,
    pb: &mut ProcessedBlock,
) -> Result<(), MaintenanceError> {
    for i in 0..pb.miner_payouts.len() {
        let diff = DelayedOutputDiff {
            direction: DiffDirection::Apply,
            id: miner_payout_id(&pb.block_id, i as u64),
            output: pb.miner_payouts[i].clone(),
            maturity_height: pb.height + MATURITY_DELAY,
        };
        commit_delayed_output_diff(tx, &diff, DiffDirection::Apply)?;
        pb.record_delayed_output_diff(diff);
    }
    Ok(())
}

/// Promote every delayed output maturing at this height into the spendable
/// set, then drop the drained per-height bucket.
fn apply_matured_outputs<S: StoreTx + ?Sized>(
    tx: &mut S,
    pb: &mut ProcessedBlock,
) -> Result<(), MaintenanceError> {
    // Nothing can have matured before the chain outlives the delay.
    if pb.height <= MATURITY_DELAY {
        return Ok(());
    }

    let matured = delayed::outputs_at(tx, pb.height)?;
    let count = matured.len();
    for (id, output) in matured {
        // The output must not already be spendable; a duplicate here
        // would create value twice.
        if CONSISTENCY_CHECKS && spendable::exists(tx, &id)? {
            return Err(ConsistencyError::OutputAlreadyMature.into());
        }

        let diff = OutputDiff {
            direction: DiffDirection::Apply,
            id: id.clone(),
            output: output.clone(),
        };
        commit_output_diff(tx, &diff, DiffDirection::Apply)?;
        pb.record_output_diff(diff);

        // Reorg record: undoing this block must re-create the delayed
        // entry the promotion consumed.
        let diff = DelayedOutputDiff {
            direction: DiffDirection::Revert,
            id,
            output,
            maturity_height: pb.height,
        };
        commit_delayed_output_diff(tx, &diff, DiffDirection::Apply)?;
        pb.record_delayed_output_diff(diff);
    }
    if count > 0 {
        log::debug!("height {}: promoted {} matured outputs", pb.height, count);
    }
    delayed::delete_height(tx, pb.height)?;
    Ok(())
}

/// Settle one contract whose proof window closed without a valid proof:
/// pay its missed payouts as delayed outputs and remove it from the
/// active set.
fn settle_missed_contract<S: StoreTx + ?Sized>(
    tx: &mut S,
    pb: &mut ProcessedBlock,
    id: &ContractId,
) -> Result<(), MaintenanceError> {
    // The expiry index claimed this contract exists; a miss is a
    // consistency failure surfaced to the caller, never skipped.
    let contract = contracts::get(tx, id)?
        .ok_or_else(|| MaintenanceError::MissingContract(id.clone()))?;
    if CONSISTENCY_CHECKS && contract.window_end != pb.height {
        return Err(ConsistencyError::ContractExpiryHeight.into());
    }

    for (i, payout) in contract.missed_payouts.iter().enumerate() {
        let payout_id = missed_payout_id(id, i as u64);
        if CONSISTENCY_CHECKS && spendable::exists(tx, &payout_id)? {
            return Err(ConsistencyError::PayoutsAlreadyPaid.into());
        }

        let diff = DelayedOutputDiff {
            direction: DiffDirection::Apply,
            id: payout_id,
            output: payout.clone(),
            maturity_height: pb.height + MATURITY_DELAY,
        };
        commit_delayed_output_diff(tx, &diff, DiffDirection::Apply)?;
        pb.record_delayed_output_diff(diff);
    }

    // Revert direction: un-expiring the contract means restoring it.
    let diff = ContractDiff {
        direction: DiffDirection::Revert,
        id: id.clone(),
        contract,
    };
    commit_contract_diff(tx, &diff, DiffDirection::Apply)?;
    pb.record_contract_diff(diff);
    Ok(())
}

/// Settle every contract whose proof window closes at this height, then
/// drop the drained per-height expiry index bucket.
fn apply_contract_expirations<S: StoreTx + ?Sized>(
    tx: &mut S,
    pb: &mut ProcessedBlock,
) -> Result<(), MaintenanceError> {
    let expiring = contracts::expiring_at(tx, pb.height)?;
    if expiring.is_empty() {
        return Ok(());
    }
    for id in &expiring {
        settle_missed_contract(tx, pb, id)?;
    }
    log::debug!(
        "height {}: settled {} expired storage contracts",
        pb.height,
        expiring.len()
    );
    // Each settlement removed its own index entry; drop the bucket itself
    // so per-height index structures do not accumulate.
    contracts::delete_expiry_index(tx, pb.height)?;
    Ok(())
}

/// Apply block-level alterations to the consensus set.
///
/// Called exactly once per block, strictly after all of the block's
/// transactions have been applied and before the transaction is
/// committed. The stage order is a correctness requirement: payouts
/// scheduled by this block must not be visible to maturation in the same
/// block, and expirations must settle against the same finalized height
/// maturation just ran at. Returns the first error; check
/// [`MaintenanceError::is_fatal`] before deciding between aborting the
/// transaction and halting the process.
pub fn apply_maintenance<S: StoreTx + ?Sized>(
    tx: &mut S,
    pb: &mut ProcessedBlock,
) -> Result<(), MaintenanceError> {
    apply_miner_payouts(tx, pb)?;
    apply_matured_outputs(tx, pb)?;
    apply_contract_expirations(tx, pb)
}
