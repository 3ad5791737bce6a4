use serde::{Deserialize, Serialize};

/// The header fields verified against a block hash.
///
/// The remaining header fields are covered by the hash check; only the
/// roots that anchor further proofs are asserted individually.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPartial {
    pub number: u64,
    /// keccak256 of the header RLP.
    pub hash: [u8; 32],
    pub state_root: [u8; 32],
    pub transactions_root: [u8; 32],
    pub receipts_root: [u8; 32],
    /// Present for Shanghai and later headers.
    pub withdrawals_root: Option<[u8; 32]>,
}
