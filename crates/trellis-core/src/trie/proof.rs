//! Merkle-Patricia trie proof verification.
//!
//! A proof is the chain of RLP-encoded nodes from the root of the trie
//! down to the node carrying the claimed value. Verification walks that
//! chain, checking at every level that the node hashes to the reference
//! its parent committed to, and consuming the key nibble-by-nibble
//! through branch and extension nodes until the terminal node yields the
//! value.

use crate::bytes;
use crate::constants::{BRANCH_FIELDS, MAX_TRIE_NODE_LENGTH};
use crate::fragment::{Fragment, FragmentError};
use crate::rlp::{self, RlpError, RlpKind, RlpList};
use crate::trie::path::decode_path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 of a byte range.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Errors during Merkle-Patricia trie proof verification.
/// Each variant names exactly which check failed; there is nothing to
/// recover from any of them.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("node {depth} does not hash to its parent reference: computed {computed}, expected {expected}")]
    HashMismatch {
        depth: usize,
        computed: String,
        expected: String,
    },

    #[error("invalid trie node at depth {depth}: {arity}-item list")]
    InvalidNode { depth: usize, arity: usize },

    #[error("leaf node in interior position at depth {depth}")]
    LeafInInterior { depth: usize },

    #[error("empty child selected at depth {depth} with key nibbles remaining")]
    EmptyChild { depth: usize },

    #[error("child reference of {length} bytes at depth {depth}")]
    InvalidChildReference { depth: usize, length: usize },

    #[error("path nibbles diverge from the key at depth {depth}")]
    PathMismatch { depth: usize },

    #[error("key exhausted before the terminal node")]
    KeyExhausted,

    #[error("key not fully consumed at the terminal node")]
    KeyNotConsumed,

    #[error("terminal node has no value for this key")]
    MissingValue,

    #[error("value carried by the proof does not match")]
    ValueMismatch,

    #[error("terminal node at depth {depth} refers onward by hash; the proof ends early")]
    TruncatedProof { depth: usize },

    #[error("proof depth {depth} exceeds the limit of {max} nodes")]
    DepthExceeded { depth: usize, max: usize },

    #[error("proof node {index} is {length} bytes, over the {max}-byte limit")]
    NodeTooLong {
        index: usize,
        length: usize,
        max: usize,
    },

    #[error("proof leaf is {length} bytes, over the {max}-byte limit")]
    LeafTooLong { length: usize, max: usize },

    #[error("invalid encoded path: {reason}")]
    InvalidPath { reason: &'static str },

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

/// The node chain of a Merkle-Patricia proof.
///
/// `nodes` holds the intermediate nodes from the root down; the terminal
/// `leaf` node is kept separate because its length bound is key-dependent
/// and differs per trie.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proof {
    nodes: Vec<Vec<u8>>,
    leaf: Vec<u8>,
}

impl Proof {
    /// Build a proof, rejecting intermediate nodes over the node-length cap.
    pub fn new(nodes: Vec<Vec<u8>>, leaf: Vec<u8>) -> Result<Self, ProofError> {
        let proof = Self { nodes, leaf };
        proof.check_node_lengths()?;
        Ok(proof)
    }

    /// Intermediate node count. Inline descents do not add to this.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Vec<u8>] {
        &self.nodes
    }

    pub fn leaf(&self) -> &[u8] {
        &self.leaf
    }

    fn check_node_lengths(&self) -> Result<(), ProofError> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.len() > MAX_TRIE_NODE_LENGTH {
                return Err(ProofError::NodeTooLong {
                    index,
                    length: node.len(),
                    max: MAX_TRIE_NODE_LENGTH,
                });
            }
        }
        Ok(())
    }

    /// Enforce the per-trie depth and leaf-size caps. Re-checks the node
    /// cap as well, so deserialized proofs go through the same gate as
    /// constructed ones.
    pub fn check_limits(&self, max_depth: usize, max_leaf_length: usize) -> Result<(), ProofError> {
        self.check_node_lengths()?;
        if self.nodes.len() > max_depth {
            return Err(ProofError::DepthExceeded {
                depth: self.nodes.len(),
                max: max_depth,
            });
        }
        if self.leaf.len() > max_leaf_length {
            return Err(ProofError::LeafTooLong {
                length: self.leaf.len(),
                max: max_leaf_length,
            });
        }
        Ok(())
    }
}

/// A reference to the next node, read out of a branch or extension child.
/// Children under 32 bytes are embedded in place instead of hashed.
enum ChildRef<'a> {
    Hash([u8; 32]),
    Inline(Fragment<'a>),
}

/// Verify that `key` maps to `value` in the trie committed to by `root`.
///
/// Walks `proof.nodes` from the root down, checking the keccak256 linkage
/// at every level and consuming the key nibble-by-nibble, then matches
/// the terminal leaf node and compares the carried value byte-for-byte.
/// Inline children are descended without consuming further proof nodes.
pub fn verify_merkle_proof(
    key: &[u8],
    value: &[u8],
    root: [u8; 32],
    proof: &Proof,
) -> Result<(), ProofError> {
    let nibbles = bytes::to_nibbles(key);
    let mut path = Fragment::from_slice(&nibbles);
    let mut expected = root;

    for (depth, node) in proof.nodes().iter().enumerate() {
        check_node_hash(node, expected, depth)?;
        expected = descend(Fragment::from_slice(node), &mut path, depth)?;
    }

    let depth = proof.depth();
    check_node_hash(proof.leaf(), expected, depth)?;
    let carried = terminal_value(Fragment::from_slice(proof.leaf()), &mut path, depth)?;
    if carried.as_slice() != value {
        return Err(ProofError::ValueMismatch);
    }
    Ok(())
}

fn check_node_hash(node: &[u8], expected: [u8; 32], depth: usize) -> Result<(), ProofError> {
    let computed = keccak256(node);
    if computed != expected {
        return Err(ProofError::HashMismatch {
            depth,
            computed: hex::encode(computed),
            expected: hex::encode(expected),
        });
    }
    Ok(())
}

/// Interpret child `index` of a decoded node as a next-node reference.
fn child_ref<'a>(
    list: &RlpList,
    node: &Fragment<'a>,
    index: usize,
    depth: usize,
) -> Result<ChildRef<'a>, ProofError> {
    let item = list.item(index)?;
    match item.kind {
        RlpKind::List => {
            // An embedded node: its full encoding stands in for the next
            // node and must be under the 32-byte inline bound.
            let encoding = item.encoding(node)?;
            if encoding.len() >= 32 {
                return Err(ProofError::InvalidChildReference {
                    depth,
                    length: encoding.len(),
                });
            }
            Ok(ChildRef::Inline(encoding))
        }
        RlpKind::String => {
            let payload = item.payload(node)?;
            match payload.len() {
                0 => Err(ProofError::EmptyChild { depth }),
                32 => {
                    let mut hash = [0u8; 32];
                    hash.copy_from_slice(payload.as_slice());
                    Ok(ChildRef::Hash(hash))
                }
                length => Err(ProofError::InvalidChildReference { depth, length }),
            }
        }
    }
}

/// Match a run of path nibbles against the front of the key.
fn consume_path(path: &mut Fragment<'_>, run: &[u8], depth: usize) -> Result<(), ProofError> {
    for &nibble in run {
        let next = path.pop_front().map_err(|_| ProofError::KeyExhausted)?;
        if next != nibble {
            return Err(ProofError::PathMismatch { depth });
        }
    }
    Ok(())
}

/// Walk one intermediate node and any inline children embedded in it,
/// returning the hash the next proof node must match.
fn descend(
    node: Fragment<'_>,
    path: &mut Fragment<'_>,
    depth: usize,
) -> Result<[u8; 32], ProofError> {
    let mut node = node;
    loop {
        let list = rlp::decode_list(&node, BRANCH_FIELDS)?;
        let child = match list.len() {
            BRANCH_FIELDS => {
                let nibble = path.pop_front().map_err(|_| ProofError::KeyExhausted)?;
                child_ref(&list, &node, nibble as usize, depth)?
            }
            2 => {
                let encoded = list.bytes_at(&node, 0)?;
                let decoded = decode_path(&encoded)?;
                if decoded.is_leaf {
                    return Err(ProofError::LeafInInterior { depth });
                }
                consume_path(path, &decoded.nibbles, depth)?;
                child_ref(&list, &node, 1, depth)?
            }
            arity => return Err(ProofError::InvalidNode { depth, arity }),
        };
        match child {
            ChildRef::Hash(hash) => return Ok(hash),
            ChildRef::Inline(inner) => node = inner,
        }
    }
}

/// Walk the terminal node down to the value slot the key ends at. The
/// value may sit in a leaf node, in the 17th slot of a branch when the
/// key ends there, or inside an inline child of either.
fn terminal_value<'a>(
    node: Fragment<'a>,
    path: &mut Fragment<'_>,
    depth: usize,
) -> Result<Fragment<'a>, ProofError> {
    let mut node = node;
    loop {
        let list = rlp::decode_list(&node, BRANCH_FIELDS)?;
        let child = match list.len() {
            BRANCH_FIELDS => {
                if path.is_empty() {
                    // Key ends at this branch: the 17th slot is the value.
                    let slot = list.bytes_at(&node, BRANCH_FIELDS - 1)?;
                    if slot.is_empty() {
                        return Err(ProofError::MissingValue);
                    }
                    return Ok(slot);
                }
                let nibble = path.pop_front()?;
                child_ref(&list, &node, nibble as usize, depth)?
            }
            2 => {
                let encoded = list.bytes_at(&node, 0)?;
                let decoded = decode_path(&encoded)?;
                consume_path(path, &decoded.nibbles, depth)?;
                if decoded.is_leaf {
                    if !path.is_empty() {
                        return Err(ProofError::KeyNotConsumed);
                    }
                    let carried = list.bytes_at(&node, 1)?;
                    if carried.is_empty() {
                        return Err(ProofError::MissingValue);
                    }
                    return Ok(carried);
                }
                child_ref(&list, &node, 1, depth)?
            }
            arity => return Err(ProofError::InvalidNode { depth, arity }),
        };
        match child {
            // The terminal chain must stay in this buffer; a hash here
            // means the proof stopped short of the value.
            ChildRef::Hash(_) => return Err(ProofError::TruncatedProof { depth }),
            ChildRef::Inline(inner) => node = inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn leaf_node(path_byte: u8, value: &[u8]) -> Vec<u8> {
        rlp::encode_list(&[rlp::encode_bytes(&[path_byte]), rlp::encode_bytes(value)])
    }

    #[test]
    fn test_keccak256_known_vectors() {
        // keccak256("") — a fixed point every Ethereum implementation pins.
        assert_eq!(
            keccak256(&[]),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            keccak256(b"hello"),
            hex!("1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8")
        );
    }

    #[test]
    fn test_leaf_only_proof() {
        // Key 0xAB, even leaf path covering both nibbles.
        let leaf = rlp::encode_list(&[
            rlp::encode_bytes(&[0x20, 0xAB]),
            rlp::encode_bytes(b"value"),
        ]);
        let root = keccak256(&leaf);
        let proof = Proof::new(vec![], leaf).unwrap();
        verify_merkle_proof(&[0xAB], b"value", root, &proof).unwrap();
    }

    #[test]
    fn test_value_mismatch() {
        let leaf = rlp::encode_list(&[
            rlp::encode_bytes(&[0x20, 0xAB]),
            rlp::encode_bytes(b"value"),
        ]);
        let root = keccak256(&leaf);
        let proof = Proof::new(vec![], leaf).unwrap();
        assert!(matches!(
            verify_merkle_proof(&[0xAB], b"other", root, &proof),
            Err(ProofError::ValueMismatch)
        ));
    }

    #[test]
    fn test_root_mismatch() {
        let leaf = leaf_node(0x3B, b"v");
        let proof = Proof::new(vec![], leaf).unwrap();
        assert!(matches!(
            verify_merkle_proof(&[0xAB], b"v", [0u8; 32], &proof),
            Err(ProofError::HashMismatch { depth: 0, .. })
        ));
    }

    #[test]
    fn test_path_divergence() {
        // Leaf path says nibbles [C, D]; key says [A, B].
        let leaf = rlp::encode_list(&[
            rlp::encode_bytes(&[0x20, 0xCD]),
            rlp::encode_bytes(b"v"),
        ]);
        let root = keccak256(&leaf);
        let proof = Proof::new(vec![], leaf).unwrap();
        assert!(matches!(
            verify_merkle_proof(&[0xAB], b"v", root, &proof),
            Err(ProofError::PathMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_arity_rejected() {
        let node = rlp::encode_list(&[
            rlp::encode_bytes(b"a"),
            rlp::encode_bytes(b"b"),
            rlp::encode_bytes(b"c"),
        ]);
        let root = keccak256(&node);
        let proof = Proof::new(vec![], node).unwrap();
        assert!(matches!(
            verify_merkle_proof(&[0xAB], b"v", root, &proof),
            Err(ProofError::InvalidNode { arity: 3, .. })
        ));
    }

    #[test]
    fn test_proof_limits() {
        let proof = Proof::new(vec![vec![0u8; 100]; 3], vec![0u8; 80]).unwrap();
        proof.check_limits(3, 80).unwrap();
        assert!(matches!(
            proof.check_limits(2, 80),
            Err(ProofError::DepthExceeded { depth: 3, max: 2 })
        ));
        assert!(matches!(
            proof.check_limits(3, 69),
            Err(ProofError::LeafTooLong { length: 80, max: 69 })
        ));
        assert!(matches!(
            Proof::new(vec![vec![0u8; MAX_TRIE_NODE_LENGTH + 1]], vec![]),
            Err(ProofError::NodeTooLong { index: 0, .. })
        ));
    }
}
