use crate::constants::{ACCOUNT_FIELDS, MAX_ACCOUNT_DEPTH, MAX_ACCOUNT_LEAF_LENGTH};
use crate::fragment::Fragment;
use crate::rlp;
use crate::trie::{keccak256, verify_merkle_proof};
use crate::types::{Account, ProofInput};
use crate::verify::VerifyError;
use tracing::debug;

/// Verify an account against a known state root.
///
/// The state root must come from an already-verified header; the proof
/// data can come from any source, `eth_getProof` included, because every
/// byte is checked here.
pub fn verify_account(
    account: &Account,
    input: &ProofInput,
    state_root: [u8; 32],
) -> Result<(), VerifyError> {
    // The key in the state trie is keccak256(address).
    if input.key.as_slice() != keccak256(&account.address).as_slice() {
        return Err(VerifyError::KeyMismatch {
            expected: "keccak256 of the account address",
        });
    }

    // The value must be the canonical RLP encoding of
    // (nonce, balance, storage hash, code hash).
    let value = Fragment::from_slice(&input.value);
    let fields = rlp::decode_list(&value, ACCOUNT_FIELDS)?;
    if fields.len() != ACCOUNT_FIELDS {
        return Err(VerifyError::FieldCount {
            structure: "account",
            expected: ACCOUNT_FIELDS,
            found: fields.len(),
        });
    }
    fields.expect_u64(&value, 0, account.nonce, "Nonce")?;
    fields.expect_bytes32_padded(&value, 1, &account.balance, "Balance")?;
    fields.expect_bytes32_exact(&value, 2, &account.storage_hash, "Storage Root")?;
    fields.expect_bytes32_exact(&value, 3, &account.code_hash, "Code Hash")?;

    input
        .proof
        .check_limits(MAX_ACCOUNT_DEPTH, MAX_ACCOUNT_LEAF_LENGTH)?;
    verify_merkle_proof(&input.key, &input.value, state_root, &input.proof)?;

    debug!(address = %hex::encode(account.address), "account proof verified");
    Ok(())
}
