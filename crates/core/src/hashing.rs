//! SHA-256 hashing over canonical encodings.
//!
//! Every digest in the system comes from one of the two functions here:
//! leaf digests from [`hash_data_block`], internal tree nodes from
//! [`hash_pair`]. Leaf digests are consumed by the tree builder as-is and
//! never re-hashed before pairing.

use alloy_primitives::B256;
use sha2::{Digest, Sha256};

use crate::canonical::canonical_record_bytes;
use crate::error::Result;
use crate::types::LeafRecord;

/// Compute the SHA-256 hash of raw bytes.
pub fn sha256(data: &[u8]) -> B256 {
    let digest: [u8; 32] = Sha256::digest(data).into();
    B256::from(digest)
}

/// Compute the digest of a leaf record.
///
/// This is the sole way a leaf enters the tree, and it is exposed so a
/// relying party can independently recompute the digest of a revealed
/// record without holding the full tree.
pub fn hash_data_block(record: &LeafRecord) -> Result<B256> {
    Ok(sha256(&canonical_record_bytes(record)?))
}

/// Compute an internal tree node: SHA-256(left || right).
pub fn hash_pair(left: &B256, right: &B256) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(left.as_slice());
    hasher.update(right.as_slice());
    let digest: [u8; 32] = hasher.finalize().into();
    B256::from(digest)
}
