pub mod path;
pub mod proof;

pub use path::{decode_path, EncodedPath};
pub use proof::{keccak256, verify_merkle_proof, Proof, ProofError};
