//! Bucket layout and value encoding
//!
//! Flat buckets hold the spendable-output set and the active contracts.
//! Delayed outputs and contract expirations live in one bucket per height,
//! so the work done at each block is proportional to what matures or
//! expires at that height rather than to everything outstanding.

use crate::core::types::BlockHeight;
use crate::storage::store::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Spendable outputs, keyed by output id.
pub const SPENDABLE_OUTPUTS: &[u8] = b"SpendableOutputs";

/// Active storage contracts, keyed by contract id.
pub const STORAGE_CONTRACTS: &[u8] = b"StorageContracts";

const PREFIX_DELAYED_OUTPUTS: &[u8] = b"DelayedOutputs_";
const PREFIX_CONTRACT_EXPIRY: &[u8] = b"ContractExpiry_";

/// Bucket of outputs maturing at `height`, keyed by output id.
pub fn delayed_outputs_bucket(height: BlockHeight) -> Vec<u8> {
    bucket_at(PREFIX_DELAYED_OUTPUTS, height)
}

/// Bucket of contract ids whose proof window ends at `height`.
pub fn contract_expiry_bucket(height: BlockHeight) -> Vec<u8> {
    bucket_at(PREFIX_CONTRACT_EXPIRY, height)
}

fn bucket_at(prefix: &[u8], height: BlockHeight) -> Vec<u8> {
    let mut id = Vec::with_capacity(prefix.len() + 8);
    id.extend_from_slice(prefix);
    id.extend_from_slice(&height.to_be_bytes());
    id
}

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a stored value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Output;

    #[test]
    fn test_height_buckets_are_distinct() {
        assert_ne!(delayed_outputs_bucket(1), delayed_outputs_bucket(2));
        assert_ne!(delayed_outputs_bucket(1), contract_expiry_bucket(1));
        assert_eq!(delayed_outputs_bucket(7), delayed_outputs_bucket(7));
    }

    #[test]
    fn test_value_roundtrip() {
        let output = Output {
            amount: 42,
            recipient: "addr1".to_string(),
        };
        let bytes = encode(&output).unwrap();
        let decoded: Output = decode(&bytes).unwrap();
        assert_eq!(decoded, output);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<Output, _> = decode(b"not json");
        assert!(result.is_err());
    }
}
