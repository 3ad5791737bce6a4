use crate::trie::Proof;
use serde::{Deserialize, Serialize};

/// An Ethereum account as stored in the state trie.
/// Verified against a state root via [`crate::verify::verify_account`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The 20-byte account address.
    pub address: [u8; 20],
    /// Number of transactions sent from this account.
    pub nonce: u64,
    /// Balance in wei (big-endian bytes to avoid precision loss).
    pub balance: [u8; 32],
    /// Root hash of the account's storage trie.
    /// For externally owned accounts this is the empty trie root.
    pub storage_hash: [u8; 32],
    /// Keccak256 hash of the account's code.
    /// For externally owned accounts this is the hash of the empty string.
    pub code_hash: [u8; 32],
}

impl Account {
    /// The keccak256 hash of empty bytes — the code hash for EOAs.
    pub const EMPTY_CODE_HASH: [u8; 32] = [
        0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7,
        0x03, 0xc0, 0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04,
        0x5d, 0x85, 0xa4, 0x70,
    ];

    /// The root of an empty Merkle-Patricia trie.
    pub const EMPTY_STORAGE_ROOT: [u8; 32] = [
        0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0,
        0xf8, 0x6e, 0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5,
        0xe3, 0x63, 0xb4, 0x21,
    ];

    /// Check if this is a contract account (has code deployed).
    pub fn is_contract(&self) -> bool {
        self.code_hash != Self::EMPTY_CODE_HASH
    }

    /// Check if this account has a non-empty storage trie.
    pub fn has_storage(&self) -> bool {
        self.storage_hash != Self::EMPTY_STORAGE_ROOT
    }
}

/// A claimed key/value pair plus the node chain tying it to a root.
///
/// The key is the raw trie key before nibble expansion: a keccak256
/// output for state and storage tries, the RLP-encoded index for
/// transaction and receipt tries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofInput {
    pub key: Vec<u8>,
    /// Exact byte value the trie must carry at `key`.
    pub value: Vec<u8>,
    pub proof: Proof,
}
