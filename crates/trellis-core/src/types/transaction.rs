use serde::{Deserialize, Serialize};

/// EIP-2718 transaction envelope types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    /// Pre-EIP-2718 transactions, stored as a bare 9-field list.
    Legacy,
    /// EIP-2930 access list transactions (type 1).
    AccessList,
    /// EIP-1559 dynamic fee transactions (type 2).
    DynamicFee,
    /// EIP-4844 blob transactions (type 3).
    Blob,
    /// EIP-7702 set-code transactions (type 4).
    SetCode,
}

impl TxType {
    /// Parse an EIP-2718 type byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Legacy),
            1 => Some(Self::AccessList),
            2 => Some(Self::DynamicFee),
            3 => Some(Self::Blob),
            4 => Some(Self::SetCode),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Legacy => 0,
            Self::AccessList => 1,
            Self::DynamicFee => 2,
            Self::Blob => 3,
            Self::SetCode => 4,
        }
    }

    /// Legacy transactions carry no type byte in the trie value.
    pub fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

/// The subset of transaction fields shared by every envelope type.
///
/// Type-specific fields (gas prices, access lists, blob hashes,
/// authorizations) are still covered by the proof's value bytes — they
/// are just not individually asserted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPartial {
    pub nonce: u64,
    pub gas_limit: u64,
    /// None for contract creation, which encodes the recipient as the
    /// empty string.
    pub to: Option<[u8; 20]>,
    /// Value in wei, big-endian.
    pub value: [u8; 32],
    pub data: Vec<u8>,
    /// `v` for legacy transactions, the parity bit for typed ones.
    pub v: u64,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_byte_round_trip() {
        for byte in 0..=4u8 {
            assert_eq!(TxType::from_byte(byte).unwrap().as_byte(), byte);
        }
        assert_eq!(TxType::from_byte(5), None);
        assert_eq!(TxType::from_byte(0x7F), None);
    }

    #[test]
    fn test_only_legacy_is_legacy() {
        assert!(TxType::Legacy.is_legacy());
        assert!(!TxType::DynamicFee.is_legacy());
    }
}
