use serde::{Deserialize, Serialize};

/// The receipt fields a caller asserts against the receipts trie.
///
/// Exactly one of `status` / `state_root` is consulted, picked by the
/// block number relative to the Byzantium fork: earlier receipts commit
/// to an intermediate state root, later ones to a status byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPartial {
    /// Whether the transaction succeeded (1) or failed (0). Post-Byzantium.
    pub status: Option<u8>,
    /// Intermediate state root. Pre-Byzantium only.
    pub state_root: Option<[u8; 32]>,
    /// Cumulative gas used in the block up to and including this
    /// transaction.
    pub cumulative_gas_used: u64,
    /// Bloom filter over the receipt's logs (256 bytes, hex for serde).
    #[serde(with = "bloom_serde")]
    pub logs_bloom: [u8; 256],
}

/// Serde support for the bloom filter: serde's derived array handling
/// stops at 32 elements, so the 256-byte filter travels as a hex string.
mod bloom_serde {
    use crate::constants::BLOOM_FILTER_LENGTH;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bloom: &[u8; 256], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bloom)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 256], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let digits = encoded.strip_prefix("0x").unwrap_or(&encoded);
        hex::decode(digits)
            .map_err(D::Error::custom)?
            .try_into()
            .map_err(|decoded: Vec<u8>| {
                D::Error::custom(format!(
                    "expected a {}-byte bloom filter, got {} bytes",
                    BLOOM_FILTER_LENGTH,
                    decoded.len()
                ))
            })
    }
}

/// A log entry emitted by a smart contract, extracted from a verified
/// receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Address of the contract that emitted the log.
    pub address: [u8; 20],
    /// Indexed topics (up to 4, first is usually the event signature hash).
    pub topics: Vec<[u8; 32]>,
    /// Non-indexed data.
    pub data: Vec<u8>,
}
