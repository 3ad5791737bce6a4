//! Hex-prefix encoded trie paths.
//!
//! An extension or leaf node packs its nibble run into bytes with a
//! type-and-parity nibble up front: 0 extension-even, 1 extension-odd,
//! 2 leaf-even, 3 leaf-odd. Even variants pad the first byte's low nibble
//! with zero; odd variants use it as the first path nibble.

use crate::bytes::byte_to_nibbles;
use crate::fragment::Fragment;
use crate::trie::proof::ProofError;

const LEAF_FLAG: u8 = 0x02;
const ODD_FLAG: u8 = 0x01;

/// A decoded encoded-path: the nibble run plus the leaf marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPath {
    pub nibbles: Vec<u8>,
    pub is_leaf: bool,
}

/// Decode the hex-prefix path of an extension or leaf node.
pub fn decode_path(encoded: &Fragment<'_>) -> Result<EncodedPath, ProofError> {
    let first = encoded.first().map_err(|_| ProofError::InvalidPath {
        reason: "encoded path is empty",
    })?;
    let (prefix, pad) = byte_to_nibbles(first);
    if prefix > (LEAF_FLAG | ODD_FLAG) {
        return Err(ProofError::InvalidPath {
            reason: "prefix nibble out of range",
        });
    }
    let is_leaf = prefix & LEAF_FLAG != 0;
    let is_odd = prefix & ODD_FLAG != 0;

    let mut nibbles = Vec::with_capacity(encoded.len() * 2);
    if is_odd {
        nibbles.push(pad);
    } else if pad != 0 {
        return Err(ProofError::InvalidPath {
            reason: "even path has a nonzero padding nibble",
        });
    }
    for index in 1..encoded.len() {
        let (hi, lo) = byte_to_nibbles(encoded.at(index)?);
        nibbles.push(hi);
        nibbles.push(lo);
    }

    Ok(EncodedPath { nibbles, is_leaf })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<EncodedPath, ProofError> {
        decode_path(&Fragment::from_slice(bytes))
    }

    #[test]
    fn test_even_extension() {
        let path = decode(&[0x00, 0xAB, 0xCD]).unwrap();
        assert!(!path.is_leaf);
        assert_eq!(path.nibbles, vec![0xA, 0xB, 0xC, 0xD]);
    }

    #[test]
    fn test_odd_extension() {
        let path = decode(&[0x1A, 0xBC]).unwrap();
        assert!(!path.is_leaf);
        assert_eq!(path.nibbles, vec![0xA, 0xB, 0xC]);
    }

    #[test]
    fn test_even_leaf() {
        let path = decode(&[0x20, 0xAB]).unwrap();
        assert!(path.is_leaf);
        assert_eq!(path.nibbles, vec![0xA, 0xB]);
    }

    #[test]
    fn test_odd_leaf() {
        let path = decode(&[0x3A, 0xBC]).unwrap();
        assert!(path.is_leaf);
        assert_eq!(path.nibbles, vec![0xA, 0xB, 0xC]);
    }

    #[test]
    fn test_zero_length_runs() {
        let path = decode(&[0x00]).unwrap();
        assert!(path.nibbles.is_empty());
        let path = decode(&[0x20]).unwrap();
        assert!(path.is_leaf);
        assert!(path.nibbles.is_empty());
    }

    #[test]
    fn test_rejects_bad_prefixes() {
        assert!(matches!(
            decode(&[0x40, 0xAB]),
            Err(ProofError::InvalidPath { .. })
        ));
        assert!(matches!(
            decode(&[0x05, 0xAB]),
            Err(ProofError::InvalidPath { .. })
        ));
        assert!(matches!(decode(&[]), Err(ProofError::InvalidPath { .. })));
    }
}
