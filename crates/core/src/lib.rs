//! # Veiltree Core
//!
//! Core building blocks for the veiltree selective-disclosure commitment
//! scheme: the document value model, the flattener, the canonical byte
//! encoder, and SHA-256 hashing over canonical encodings.
//!
//! These pieces are shared by the tree builder in `veiltree-merkle` and
//! the offline bundle verifier in `veiltree-verifier`, ensuring that a
//! committing party and a relying party always compute bit-identical
//! digests from the same revealed data.

#![warn(missing_docs)]

pub mod canonical;
pub mod constants;
pub mod error;
pub mod flatten;
pub mod hashing;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use canonical::{canonical_bytes, canonical_record_bytes};
pub use constants::*;
pub use error::{CoreError, Result};
pub use flatten::flatten;
pub use hashing::{hash_data_block, hash_pair, sha256};
pub use types::{LeafInput, LeafRecord};
pub use value::Value;

// Re-export the digest type for convenience
pub use alloy_primitives::B256;
