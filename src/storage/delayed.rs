//! Delayed-output ledger
//!
//! Outputs that are not yet spendable, indexed by the height at which they
//! mature. Promotion drains the bucket for the current height and then
//! deletes it, so per-height index structures never accumulate.

use crate::core::types::{BlockHeight, Output, OutputId};
use crate::storage::keys;
use crate::storage::store::{StoreError, StoreTx};

/// Add an output maturing at `maturity_height`. Callers are responsible
/// for supplying a fresh id; no uniqueness check happens here.
pub fn insert<S: StoreTx + ?Sized>(
    tx: &mut S,
    maturity_height: BlockHeight,
    id: &str,
    output: &Output,
) -> Result<(), StoreError> {
    tx.put(
        &keys::delayed_outputs_bucket(maturity_height),
        id.as_bytes(),
        &keys::encode(output)?,
    )
}

/// Remove a single entry from the bucket for `maturity_height`.
pub fn remove<S: StoreTx + ?Sized>(
    tx: &mut S,
    maturity_height: BlockHeight,
    id: &str,
) -> Result<(), StoreError> {
    tx.delete(&keys::delayed_outputs_bucket(maturity_height), id.as_bytes())
}

/// All outputs maturing at `height`, in store enumeration order. An absent
/// bucket yields an empty list. Entries are collected up front so the
/// caller can mutate the same transaction while consuming them.
pub fn outputs_at<S: StoreTx + ?Sized>(
    tx: &S,
    height: BlockHeight,
) -> Result<Vec<(OutputId, Output)>, StoreError> {
    let mut entries = Vec::new();
    tx.for_each(&keys::delayed_outputs_bucket(height), &mut |key, value| {
        let id = String::from_utf8_lossy(key).into_owned();
        entries.push((id, keys::decode(value)?));
        Ok(())
    })?;
    Ok(entries)
}

/// Drop the whole per-height bucket once its outputs have been promoted.
/// An absent bucket is a no-op.
pub fn delete_height<S: StoreTx + ?Sized>(
    tx: &mut S,
    height: BlockHeight,
) -> Result<(), StoreError> {
    tx.delete_bucket(&keys::delayed_outputs_bucket(height))
}
