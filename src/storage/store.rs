//! Transactional key-value store abstraction
//!
//! Maintenance runs inside one externally owned, already-open read/write
//! transaction. [`StoreTx`] is the surface this crate needs from that
//! transaction: named byte buckets with point reads, writes, deletes,
//! whole-bucket deletion, and enumeration. The store serializes writers;
//! this crate performs no locking of its own.
//!
//! [`MemStore`] is an in-memory implementation used by the tests and
//! available to embedders without a durable engine.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Storage-layer errors. These are environment failures: the caller must
/// abort the enclosing transaction, never commit around them.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("value encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// One open read/write transaction against the consensus store.
pub trait StoreTx {
    /// Read the value stored under `key`. A missing bucket or key is `None`.
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, creating the bucket if needed.
    fn put(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key` from `bucket`. Removing an absent key is a no-op.
    fn delete(&mut self, bucket: &[u8], key: &[u8]) -> Result<(), StoreError>;

    /// Remove a bucket and everything in it. An absent bucket is a no-op.
    fn delete_bucket(&mut self, bucket: &[u8]) -> Result<(), StoreError>;

    /// Visit every entry in `bucket`, stopping at the first visitor error.
    /// An absent bucket is an empty enumeration.
    fn for_each(
        &self,
        bucket: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
}

/// In-memory store transaction.
///
/// Buckets that become empty are dropped, so two stores holding the same
/// live entries compare equal regardless of the bucket lifecycle that
/// produced them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemStore {
    buckets: HashMap<Vec<u8>, BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl StoreTx for MemStore {
    fn get(&self, bucket: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .buckets
            .get(bucket)
            .and_then(|b| b.get(key))
            .cloned())
    }

    fn put(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.buckets
            .entry(bucket.to_vec())
            .or_default()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, bucket: &[u8], key: &[u8]) -> Result<(), StoreError> {
        if let Some(b) = self.buckets.get_mut(bucket) {
            b.remove(key);
            if b.is_empty() {
                self.buckets.remove(bucket);
            }
        }
        Ok(())
    }

    fn delete_bucket(&mut self, bucket: &[u8]) -> Result<(), StoreError> {
        self.buckets.remove(bucket);
        Ok(())
    }

    fn for_each(
        &self,
        bucket: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        if let Some(b) = self.buckets.get(bucket) {
            for (key, value) in b {
                visit(key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let mut tx = MemStore::new();
        tx.put(b"bucket", b"k1", b"v1").unwrap();
        assert_eq!(tx.get(b"bucket", b"k1").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(tx.get(b"bucket", b"k2").unwrap(), None);
        assert_eq!(tx.get(b"other", b"k1").unwrap(), None);

        tx.delete(b"bucket", b"k1").unwrap();
        assert_eq!(tx.get(b"bucket", b"k1").unwrap(), None);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut tx = MemStore::new();
        tx.delete(b"bucket", b"missing").unwrap();
        tx.delete_bucket(b"missing").unwrap();
        assert!(tx.is_empty());
    }

    #[test]
    fn test_empty_buckets_are_pruned() {
        let mut tx = MemStore::new();
        tx.put(b"bucket", b"k1", b"v1").unwrap();
        tx.delete(b"bucket", b"k1").unwrap();
        assert_eq!(tx, MemStore::new());
    }

    #[test]
    fn test_for_each_visits_every_entry() {
        let mut tx = MemStore::new();
        tx.put(b"bucket", b"k1", b"v1").unwrap();
        tx.put(b"bucket", b"k2", b"v2").unwrap();

        let mut seen = Vec::new();
        tx.for_each(b"bucket", &mut |key, value| {
            seen.push((key.to_vec(), value.to_vec()));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen.len(), 2);

        // Absent bucket enumerates nothing.
        let mut count = 0;
        tx.for_each(b"missing", &mut |_, _| {
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_for_each_propagates_visitor_error() {
        let mut tx = MemStore::new();
        tx.put(b"bucket", b"k1", b"v1").unwrap();
        let err = tx.for_each(b"bucket", &mut |_, _| {
            Err(StoreError::Backend("boom".to_string()))
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_delete_bucket_drops_all_entries() {
        let mut tx = MemStore::new();
        tx.put(b"bucket", b"k1", b"v1").unwrap();
        tx.put(b"bucket", b"k2", b"v2").unwrap();
        tx.delete_bucket(b"bucket").unwrap();
        assert!(tx.is_empty());
    }
}
