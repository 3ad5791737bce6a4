//! Chain constants and the capacity limits enforced on proof inputs.
//!
//! Every structure that could grow without bound in a general-purpose
//! setting carries one of these caps; inputs over a cap are rejected with
//! a specific error rather than accepted.

/// Ethereum mainnet chain id.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Byzantium fork block — receipts switch from an intermediate state root
/// to a status byte.
pub const BYZANTIUM_BLOCK: u64 = 4_370_000;
/// London fork block — headers gain `baseFeePerGas`.
pub const LONDON_BLOCK: u64 = 12_965_000;
/// Shanghai fork block — headers gain `withdrawalsRoot`.
pub const SHANGHAI_BLOCK: u64 = 17_034_870;
/// Cancun fork block — headers gain the blob gas fields and the parent
/// beacon block root.
pub const CANCUN_BLOCK: u64 = 19_426_587;

/// Largest RLP-encoded header accepted.
pub const MAX_HEADER_SIZE: usize = 709;
/// Header field count cap across all supported forks.
pub const MAX_HEADER_FIELDS: usize = 20;

/// An RLP-encoded account is a 4-item list.
pub const ACCOUNT_FIELDS: usize = 4;
/// An RLP-encoded receipt is a 4-item list.
pub const RECEIPT_FIELDS: usize = 4;
/// A log entry is a 3-item list: address, topics, data.
pub const LOG_FIELDS: usize = 3;
/// Logs carry at most 4 indexed topics.
pub const MAX_TOPICS: usize = 4;
/// Logs decoded out of a single receipt.
pub const MAX_RECEIPT_LOGS: usize = 512;
/// The logs bloom filter is always 256 bytes.
pub const BLOOM_FILTER_LENGTH: usize = 256;

/// A branch node decodes to 17 items; extensions and leaves to 2.
pub const BRANCH_FIELDS: usize = 17;
/// Largest trie node accepted: a full branch of 17 hash references plus
/// RLP framing.
pub const MAX_TRIE_NODE_LENGTH: usize = 532;

/// Depth cap for state trie proofs.
pub const MAX_ACCOUNT_DEPTH: usize = 10;
/// Length cap for a state trie leaf (path plus account RLP).
pub const MAX_ACCOUNT_LEAF_LENGTH: usize = 148;

/// Depth cap for storage trie proofs.
pub const MAX_STORAGE_DEPTH: usize = 6;
/// Length cap for the RLP-encoded storage value (32 bytes plus prefix).
pub const MAX_STORAGE_VALUE_LENGTH: usize = 33;
/// Length cap for a storage trie leaf.
pub const MAX_STORAGE_LEAF_LENGTH: usize = 69;

/// Depth cap for transaction and receipt trie proofs; both tries index at
/// most a block's worth of entries.
pub const MAX_TX_PROOF_DEPTH: usize = 7;
/// Length cap for a transaction or receipt trie leaf, which carries the
/// full calldata-bearing payload.
pub const MAX_TX_LEAF_LENGTH: usize = 32_768;
