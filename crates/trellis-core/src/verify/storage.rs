use crate::bytes::trim_leading_zeros;
use crate::constants::{MAX_STORAGE_DEPTH, MAX_STORAGE_LEAF_LENGTH, MAX_STORAGE_VALUE_LENGTH};
use crate::rlp;
use crate::trie::{keccak256, verify_merkle_proof};
use crate::types::ProofInput;
use crate::verify::VerifyError;
use tracing::debug;

/// Verify one storage slot of a contract against its storage root.
///
/// The storage root comes from an already-verified account. The trie
/// stores the slot's word as an RLP string of its significant bytes; an
/// all-zero word has no leaf at all, so only non-zero values can be
/// proven here.
pub fn verify_storage_proof(
    slot: [u8; 32],
    value: [u8; 32],
    input: &ProofInput,
    storage_hash: [u8; 32],
) -> Result<(), VerifyError> {
    // The key in the storage trie is keccak256(slot).
    if input.key.as_slice() != keccak256(&slot).as_slice() {
        return Err(VerifyError::KeyMismatch {
            expected: "keccak256 of the storage slot",
        });
    }

    if input.value.len() > MAX_STORAGE_VALUE_LENGTH {
        return Err(VerifyError::StorageValueTooLong {
            length: input.value.len(),
            max: MAX_STORAGE_VALUE_LENGTH,
        });
    }
    // The trie value is the slot word trimmed of leading zeros, wrapped
    // as an RLP string.
    if input.value != rlp::encode_bytes(trim_leading_zeros(&value)) {
        return Err(VerifyError::Mismatch {
            field: "Storage Value",
        });
    }

    input
        .proof
        .check_limits(MAX_STORAGE_DEPTH, MAX_STORAGE_LEAF_LENGTH)?;
    verify_merkle_proof(&input.key, &input.value, storage_hash, &input.proof)?;

    debug!(slot = %hex::encode(slot), "storage proof verified");
    Ok(())
}
