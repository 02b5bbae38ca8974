//! Active storage contracts and the per-height expiry index
//!
//! Contracts are stored by id; a secondary index keyed by window-end height
//! lets contract-expiry settlement find everything closing at the current
//! block without scanning the whole contract set.

use crate::core::types::{BlockHeight, ContractId, StorageContract};
use crate::storage::keys;
use crate::storage::store::{StoreError, StoreTx};

/// Add a contract to the active set and index it under its window end.
pub fn insert<S: StoreTx + ?Sized>(
    tx: &mut S,
    id: &str,
    contract: &StorageContract,
) -> Result<(), StoreError> {
    tx.put(
        keys::STORAGE_CONTRACTS,
        id.as_bytes(),
        &keys::encode(contract)?,
    )?;
    tx.put(
        &keys::contract_expiry_bucket(contract.window_end),
        id.as_bytes(),
        &[],
    )
}

/// Remove a contract from the active set and from the expiry index.
pub fn remove<S: StoreTx + ?Sized>(
    tx: &mut S,
    id: &str,
    contract: &StorageContract,
) -> Result<(), StoreError> {
    tx.delete(keys::STORAGE_CONTRACTS, id.as_bytes())?;
    tx.delete(
        &keys::contract_expiry_bucket(contract.window_end),
        id.as_bytes(),
    )
}

/// Fetch a contract by id.
pub fn get<S: StoreTx + ?Sized>(
    tx: &S,
    id: &str,
) -> Result<Option<StorageContract>, StoreError> {
    match tx.get(keys::STORAGE_CONTRACTS, id.as_bytes())? {
        Some(bytes) => Ok(Some(keys::decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Ids of contracts whose proof window ends at `height`, in store
/// enumeration order. An absent bucket yields an empty list.
pub fn expiring_at<S: StoreTx + ?Sized>(
    tx: &S,
    height: BlockHeight,
) -> Result<Vec<ContractId>, StoreError> {
    let mut ids = Vec::new();
    tx.for_each(&keys::contract_expiry_bucket(height), &mut |key, _| {
        ids.push(String::from_utf8_lossy(key).into_owned());
        Ok(())
    })?;
    Ok(ids)
}

/// Drop the per-height expiry index bucket once its contracts settled.
pub fn delete_expiry_index<S: StoreTx + ?Sized>(
    tx: &mut S,
    height: BlockHeight,
) -> Result<(), StoreError> {
    tx.delete_bucket(&keys::contract_expiry_bucket(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Output;
    use crate::storage::store::MemStore;

    fn contract(window_end: BlockHeight) -> StorageContract {
        StorageContract {
            window_end,
            missed_payouts: vec![Output {
                amount: 75,
                recipient: "host1".to_string(),
            }],
        }
    }

    #[test]
    fn test_insert_indexes_window_end() {
        let mut tx = MemStore::new();
        let fc = contract(20);
        insert(&mut tx, "fc1", &fc).unwrap();

        assert_eq!(get(&tx, "fc1").unwrap(), Some(fc));
        assert_eq!(expiring_at(&tx, 20).unwrap(), vec!["fc1".to_string()]);
        assert!(expiring_at(&tx, 21).unwrap().is_empty());
    }

    #[test]
    fn test_remove_clears_record_and_index() {
        let mut tx = MemStore::new();
        let fc = contract(20);
        insert(&mut tx, "fc1", &fc).unwrap();
        remove(&mut tx, "fc1", &fc).unwrap();

        assert_eq!(get(&tx, "fc1").unwrap(), None);
        assert!(expiring_at(&tx, 20).unwrap().is_empty());
        assert!(tx.is_empty());
    }

    #[test]
    fn test_missing_contract_is_none() {
        let tx = MemStore::new();
        assert_eq!(get(&tx, "nope").unwrap(), None);
    }

    #[test]
    fn test_delete_expiry_index() {
        let mut tx = MemStore::new();
        insert(&mut tx, "fc1", &contract(20)).unwrap();
        delete_expiry_index(&mut tx, 20).unwrap();
        assert!(expiring_at(&tx, 20).unwrap().is_empty());
        // The contract record itself is untouched.
        assert!(get(&tx, "fc1").unwrap().is_some());
    }
}
