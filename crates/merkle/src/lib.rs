//! # Veiltree Merkle
//!
//! Salted Merkle commitment trees with single-leaf inclusion proofs.
//!
//! This crate provides:
//! - a deterministic salter seeded from one 32-byte entropy value
//! - an atomic tree builder over flattened documents or explicit leaves
//! - inclusion proof generation by label or index
//! - proof verification that never panics on adversarial input
//!
//! The root commits to the sorted multiset of salted leaf digests, so a
//! prover can later reveal one field and prove it was part of the
//! commitment without exposing any sibling field.

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod proof;
pub mod salt;
pub mod tree;

// Re-export commonly used items
pub use builder::{create_tree, TreeBuilder};
pub use error::{MerkleError, Result};
pub use proof::{verify_leaf_proof, LeafProof, LeafProofBundle, ProofStep, Side};
pub use salt::Salter;
pub use tree::{LeafSelector, MerkleTree};
