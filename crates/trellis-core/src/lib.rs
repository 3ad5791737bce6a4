//! # Trellis Core
//!
//! Ethereum proof verification: accounts, storage slots, transactions,
//! receipts, and block headers checked against their authoritative roots.
//!
//! Everything here is pure and synchronous — no networking, no I/O. Raw
//! bytes come in, get viewed through [`Fragment`]s, decoded by the RLP
//! layer into header positions inside the same buffers, and tied to a
//! trusted root by walking the Merkle-Patricia proof with keccak256 at
//! every level.
//!
//! ## Trust model
//!
//! The roots (state root, transactions root, receipts root, block hash)
//! must come from an already-verified source. The proof data can come
//! from anywhere — an untrusted RPC included — because every byte of it
//! is checked against a root before anything is believed.
//!
//! ## Usage
//!
//! ```ignore
//! use trellis_core::{verify_account, verify_header, Account, ProofInput};
//!
//! verify_header(1, &header_partial, &header_rlp)?;
//! verify_account(&account, &proof_input, header_partial.state_root)?;
//! ```

pub mod bytes;
pub mod constants;
pub mod fragment;
pub mod rlp;
pub mod trie;
pub mod types;
pub mod verify;

// Re-export commonly used items for convenience
pub use fragment::{Fragment, FragmentError};
pub use rlp::{RlpError, RlpHeader, RlpKind, RlpList};
pub use trie::{keccak256, verify_merkle_proof, Proof, ProofError};
pub use types::{
    Account, HeaderPartial, Log, ProofInput, ReceiptPartial, TransactionPartial, TxType,
};
pub use verify::{
    extract_log, header_fields_count, verify_account, verify_header, verify_receipt_proof,
    verify_storage_proof, verify_transaction_proof, FieldLayout, VerifyError,
};
