//! Spendable-output set
//!
//! The final resting state of value: outputs that future transactions may
//! reference. Maintenance only ever adds to this set (promotions) or, when
//! a block is undone, removes what it added.

use crate::core::types::Output;
use crate::storage::keys;
use crate::storage::store::{StoreError, StoreTx};

/// Add an output to the spendable set.
pub fn insert<S: StoreTx + ?Sized>(tx: &mut S, id: &str, output: &Output) -> Result<(), StoreError> {
    tx.put(keys::SPENDABLE_OUTPUTS, id.as_bytes(), &keys::encode(output)?)
}

/// Remove an output from the spendable set.
pub fn remove<S: StoreTx + ?Sized>(tx: &mut S, id: &str) -> Result<(), StoreError> {
    tx.delete(keys::SPENDABLE_OUTPUTS, id.as_bytes())
}

/// Whether an output with this id is currently spendable.
pub fn exists<S: StoreTx + ?Sized>(tx: &S, id: &str) -> Result<bool, StoreError> {
    Ok(tx.get(keys::SPENDABLE_OUTPUTS, id.as_bytes())?.is_some())
}

/// Fetch a spendable output by id.
pub fn get<S: StoreTx + ?Sized>(tx: &S, id: &str) -> Result<Option<Output>, StoreError> {
    match tx.get(keys::SPENDABLE_OUTPUTS, id.as_bytes())? {
        Some(bytes) => Ok(Some(keys::decode(&bytes)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemStore;

    #[test]
    fn test_insert_exists_get_remove() {
        let mut tx = MemStore::new();
        let output = Output {
            amount: 100,
            recipient: "addr1".to_string(),
        };

        assert!(!exists(&tx, "id1").unwrap());
        insert(&mut tx, "id1", &output).unwrap();
        assert!(exists(&tx, "id1").unwrap());
        assert_eq!(get(&tx, "id1").unwrap(), Some(output));

        remove(&mut tx, "id1").unwrap();
        assert!(!exists(&tx, "id1").unwrap());
        assert_eq!(get(&tx, "id1").unwrap(), None);
    }
}
