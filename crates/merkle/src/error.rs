//! Error types for the merkle crate.

use thiserror::Error;
use veiltree_core::CoreError;

/// Merkle tree error type.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Entropy of the wrong length was supplied to a salter.
    #[error("Invalid entropy length: expected 32 bytes, got {0}")]
    InvalidEntropy(usize),

    /// A tree build was attempted with zero leaves.
    #[error("Tree has no leaves")]
    EmptyTree,

    /// A proof selector matched no leaf in the tree.
    #[error("No leaf matches selector {0}")]
    LeafNotFound(String),

    /// A proof is structurally invalid (distinct from a well-formed
    /// proof that simply fails to reproduce the expected root).
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Flattening or encoding failure surfaced during a build.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal error (should not happen in correct usage).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for MerkleError.
pub type Result<T> = std::result::Result<T, MerkleError>;
