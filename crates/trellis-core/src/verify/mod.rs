//! Top-level verification entry points.
//!
//! Each verifier checks three things, in order: the proof's key is
//! derived from the record's identifier, the proof's value is the
//! canonical RLP encoding of the record's state, and the proof ties that
//! value to the trusted root. Verification either succeeds or fails with
//! the first violated check — there is no partial result to recover.

pub mod account;
pub mod header;
pub mod receipt;
pub mod storage;
pub mod transaction;

pub use account::verify_account;
pub use header::{header_fields_count, verify_header};
pub use receipt::{extract_log, verify_receipt_proof};
pub use storage::verify_storage_proof;
pub use transaction::{verify_transaction_proof, FieldLayout};

use crate::rlp::RlpError;
use crate::trie::ProofError;
use crate::types::TxType;
use thiserror::Error;

/// Errors surfaced by the top-level verifiers.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("proof key is not {expected}")]
    KeyMismatch { expected: &'static str },

    #[error("{field} does not match")]
    Mismatch { field: &'static str },

    #[error("{field} is missing")]
    MissingField { field: &'static str },

    #[error("Block Hash does not match")]
    BlockHashMismatch,

    #[error("invalid number of fields in {structure} RLP: expected {expected}, found {found}")]
    FieldCount {
        structure: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("unsupported chain id {chain_id}")]
    UnsupportedChain { chain_id: u64 },

    #[error("transaction type prefix does not match")]
    TypePrefixMismatch,

    #[error("storage value is {length} bytes, over the {max}-byte limit")]
    StorageValueTooLong { length: usize, max: usize },

    #[error("header RLP is {length} bytes, over the {max}-byte limit")]
    HeaderTooLong { length: usize, max: usize },

    #[error("log index {index} out of range ({count} logs)")]
    LogIndexOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Proof(#[from] ProofError),
}

/// Strip the EIP-2718 type byte in front of a typed trie value.
/// Legacy values pass through untouched.
pub(crate) fn split_type_prefix(tx_type: TxType, value: &[u8]) -> Result<&[u8], VerifyError> {
    if tx_type.is_legacy() {
        return Ok(value);
    }
    match value.first() {
        Some(&byte) if byte == tx_type.as_byte() => Ok(&value[1..]),
        _ => Err(VerifyError::TypePrefixMismatch),
    }
}
