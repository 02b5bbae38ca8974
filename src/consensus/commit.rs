//! Directional application of recorded diffs
//!
//! Committing a diff with its own direction performs the mutation it
//! describes; committing with the inverse direction undoes it. A chain
//! reorganization undoes a block by replaying its recorded diffs in
//! reverse order with [`DiffDirection::Revert`].

use crate::core::diff::{ContractDiff, DelayedOutputDiff, DiffDirection, OutputDiff};
use crate::storage::store::{StoreError, StoreTx};
use crate::storage::{contracts, delayed, spendable};

/// Apply a spendable-output diff in the given direction.
pub fn commit_output_diff<S: StoreTx + ?Sized>(
    tx: &mut S,
    diff: &OutputDiff,
    dir: DiffDirection,
) -> Result<(), StoreError> {
    if diff.direction == dir {
        spendable::insert(tx, &diff.id, &diff.output)
    } else {
        spendable::remove(tx, &diff.id)
    }
}

/// Apply a delayed-output diff in the given direction.
pub fn commit_delayed_output_diff<S: StoreTx + ?Sized>(
    tx: &mut S,
    diff: &DelayedOutputDiff,
    dir: DiffDirection,
) -> Result<(), StoreError> {
    if diff.direction == dir {
        delayed::insert(tx, diff.maturity_height, &diff.id, &diff.output)
    } else {
        delayed::remove(tx, diff.maturity_height, &diff.id)
    }
}

/// Apply a contract diff in the given direction.
pub fn commit_contract_diff<S: StoreTx + ?Sized>(
    tx: &mut S,
    diff: &ContractDiff,
    dir: DiffDirection,
) -> Result<(), StoreError> {
    if diff.direction == dir {
        contracts::insert(tx, &diff.id, &diff.contract)
    } else {
        contracts::remove(tx, &diff.id, &diff.contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Output, StorageContract};
    use crate::storage::store::MemStore;

    fn output(amount: u64) -> Output {
        Output {
            amount,
            recipient: "addr1".to_string(),
        }
    }

    #[test]
    fn test_output_diff_roundtrip() {
        let mut tx = MemStore::new();
        let diff = OutputDiff {
            direction: DiffDirection::Apply,
            id: "id1".to_string(),
            output: output(10),
        };

        commit_output_diff(&mut tx, &diff, DiffDirection::Apply).unwrap();
        assert!(spendable::exists(&tx, "id1").unwrap());

        commit_output_diff(&mut tx, &diff, DiffDirection::Revert).unwrap();
        assert_eq!(tx, MemStore::new());
    }

    #[test]
    fn test_delayed_output_diff_roundtrip() {
        let mut tx = MemStore::new();
        let diff = DelayedOutputDiff {
            direction: DiffDirection::Apply,
            id: "id1".to_string(),
            output: output(10),
            maturity_height: 60,
        };

        commit_delayed_output_diff(&mut tx, &diff, DiffDirection::Apply).unwrap();
        assert_eq!(delayed::outputs_at(&tx, 60).unwrap().len(), 1);

        commit_delayed_output_diff(&mut tx, &diff, DiffDirection::Revert).unwrap();
        assert_eq!(tx, MemStore::new());
    }

    #[test]
    fn test_contract_diff_roundtrip() {
        let mut tx = MemStore::new();
        let diff = ContractDiff {
            direction: DiffDirection::Apply,
            id: "fc1".to_string(),
            contract: StorageContract {
                window_end: 20,
                missed_payouts: vec![output(75)],
            },
        };

        commit_contract_diff(&mut tx, &diff, DiffDirection::Apply).unwrap();
        assert!(contracts::get(&tx, "fc1").unwrap().is_some());
        assert_eq!(contracts::expiring_at(&tx, 20).unwrap().len(), 1);

        commit_contract_diff(&mut tx, &diff, DiffDirection::Revert).unwrap();
        assert_eq!(tx, MemStore::new());
    }

    #[test]
    fn test_revert_direction_diff_applies_as_removal() {
        // A revert-direction diff committed with Apply removes the entry,
        // and committed with Revert re-creates it.
        let mut tx = MemStore::new();
        delayed::insert(&mut tx, 60, "id1", &output(10)).unwrap();
        let snapshot = tx.clone();

        let diff = DelayedOutputDiff {
            direction: DiffDirection::Revert,
            id: "id1".to_string(),
            output: output(10),
            maturity_height: 60,
        };
        commit_delayed_output_diff(&mut tx, &diff, DiffDirection::Apply).unwrap();
        assert!(delayed::outputs_at(&tx, 60).unwrap().is_empty());

        commit_delayed_output_diff(&mut tx, &diff, DiffDirection::Revert).unwrap();
        assert_eq!(tx, snapshot);
    }
}
