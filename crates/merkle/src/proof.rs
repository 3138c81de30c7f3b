//! Inclusion proofs and proof verification.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use veiltree_core::{hash_pair, LeafRecord};

use crate::error::{MerkleError, Result};

/// Which side of the target a sibling hash sits on at its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The sibling is the left input of the parent hash.
    Left,
    /// The sibling is the right input of the parent hash.
    Right,
}

/// One sibling hash along the path from a leaf to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// The sibling digest at this level.
    pub sibling: B256,
    /// The sibling's side relative to the target.
    pub side: Side,
}

/// An inclusion proof for a single leaf.
///
/// Levels at which the target is the odd last node carry no entry in
/// `siblings`: the verifier re-derives the self-pairing from
/// `total_leaves`. Proofs are ephemeral, recomputed on demand and never
/// persisted as standalone entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafProof {
    /// Sibling hashes from the leaf level up to (excluding) the root.
    pub siblings: Vec<ProofStep>,
    /// The target's position in the sorted digest order.
    pub leaf_index: u64,
    /// Total number of leaves in the tree. Needed to replicate the
    /// odd-level self-pairing rule at each level.
    pub total_leaves: u64,
    /// The root this proof was generated against.
    pub root: B256,
}

impl LeafProof {
    /// Verify this proof: recompute a candidate root from `leaf_digest`
    /// and compare it to `expected_root`.
    ///
    /// Returns `Ok(false)` for a well-formed proof that does not
    /// reproduce the expected root. Structural defects are reported as
    /// [`MerkleError::MalformedProof`]; adversarial input never panics.
    pub fn verify(&self, leaf_digest: B256, expected_root: B256) -> Result<bool> {
        let computed = self.compute_root(leaf_digest)?;
        let matches = computed == expected_root;
        debug!(
            "leaf proof verified: leaf_index={} match={}",
            self.leaf_index, matches
        );
        Ok(matches)
    }

    /// Fold the leaf digest with each recorded sibling, applying the
    /// same odd-level self-pairing rule the builder used.
    pub fn compute_root(&self, leaf_digest: B256) -> Result<B256> {
        if self.total_leaves == 0 {
            return Err(MerkleError::MalformedProof(
                "total leaf count is zero".into(),
            ));
        }
        if self.leaf_index >= self.total_leaves {
            return Err(MerkleError::MalformedProof(format!(
                "leaf index {} out of range for {} leaves",
                self.leaf_index, self.total_leaves
            )));
        }

        let mut hash = leaf_digest;
        let mut pos = self.leaf_index;
        let mut width = self.total_leaves;
        let mut steps = self.siblings.iter();

        while width > 1 {
            if pos == width - 1 && width % 2 == 1 {
                // Odd last node at this level: paired with itself.
                hash = hash_pair(&hash, &hash);
            } else {
                let step = steps.next().ok_or_else(|| {
                    MerkleError::MalformedProof("sibling list truncated".into())
                })?;
                hash = match step.side {
                    Side::Left => hash_pair(&step.sibling, &hash),
                    Side::Right => hash_pair(&hash, &step.sibling),
                };
            }
            pos /= 2;
            width = (width + 1) / 2;
        }

        if steps.next().is_some() {
            return Err(MerkleError::MalformedProof(
                "sibling list has excess entries".into(),
            ));
        }

        Ok(hash)
    }
}

/// Everything a relying party needs to check one revealed leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafProofBundle {
    /// The inclusion proof.
    pub proof: LeafProof,
    /// The revealed leaf record.
    pub target: LeafRecord,
    /// The digest of the revealed record.
    pub leaf_digest: B256,
}

/// Verify a single leaf proof against an expected root.
///
/// Free-function form of [`LeafProof::verify`] for callers that received
/// the pieces separately.
pub fn verify_leaf_proof(
    leaf_digest: B256,
    proof: &LeafProof,
    expected_root: B256,
) -> Result<bool> {
    proof.verify(leaf_digest, expected_root)
}
