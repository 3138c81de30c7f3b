//! The committed Merkle tree.

use std::collections::BTreeMap;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use veiltree_core::{hash_pair, LeafRecord, Value};

use crate::error::{MerkleError, Result};
use crate::proof::{LeafProof, LeafProofBundle, ProofStep, Side};

/// A built commitment tree.
///
/// Immutable once built: it owns its leaf records and entropy
/// exclusively, and the root is a pure function of the sorted multiset
/// of leaf digests. Persistence and identifier assignment are the
/// caller's responsibility; the entropy is retained so an auditor can
/// re-derive every salt from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerkleTree {
    /// Leaf records in storage (traversal) order.
    leaves: Vec<LeafRecord>,
    /// Leaf digests in storage order, parallel to `leaves`.
    digests: Vec<B256>,
    /// The entropy the build's salter was seeded with.
    entropy: B256,
    /// The Merkle root over the sorted leaf digests.
    root: B256,
    /// Caller-supplied data that is not part of the commitment.
    metadata: BTreeMap<String, Value>,
}

/// Selects a leaf for proof generation, by label or by storage-order
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafSelector<'a> {
    /// Dot-joined path label of the leaf.
    Label(&'a str),
    /// Position in storage (traversal) order.
    Index(usize),
}

impl<'a> From<&'a str> for LeafSelector<'a> {
    fn from(label: &'a str) -> Self {
        LeafSelector::Label(label)
    }
}

impl From<usize> for LeafSelector<'_> {
    fn from(index: usize) -> Self {
        LeafSelector::Index(index)
    }
}

impl MerkleTree {
    pub(crate) fn from_parts(
        leaves: Vec<LeafRecord>,
        digests: Vec<B256>,
        entropy: B256,
        root: B256,
        metadata: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            leaves,
            digests,
            entropy,
            root,
            metadata,
        }
    }

    /// The Merkle root committing to every leaf.
    pub fn root(&self) -> B256 {
        self.root
    }

    /// The Merkle root as a hex string.
    pub fn root_as_hex(&self) -> String {
        format!("{:#x}", self.root)
    }

    /// Leaf records in storage order.
    pub fn leaves(&self) -> &[LeafRecord] {
        &self.leaves
    }

    /// Leaf digests in storage order, parallel to [`Self::leaves`].
    pub fn digests(&self) -> &[B256] {
        &self.digests
    }

    /// The entropy the per-leaf salts were derived from.
    pub fn entropy(&self) -> B256 {
        self.entropy
    }

    /// Caller-supplied metadata. Not part of the commitment.
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Number of leaves in the tree.
    pub fn total_leaves(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Generate an inclusion proof for one leaf.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::LeafNotFound`] when the selector matches
    /// no leaf.
    pub fn prove<'a>(&self, selector: impl Into<LeafSelector<'a>>) -> Result<LeafProofBundle> {
        let selector = selector.into();
        let storage_index = match selector {
            LeafSelector::Label(label) => self
                .leaves
                .iter()
                .position(|leaf| leaf.label == label)
                .ok_or_else(|| MerkleError::LeafNotFound(format!("label '{}'", label)))?,
            LeafSelector::Index(index) => {
                if index >= self.leaves.len() {
                    return Err(MerkleError::LeafNotFound(format!("index {}", index)));
                }
                index
            }
        };

        let target = self.leaves[storage_index].clone();
        let leaf_digest = self.digests[storage_index];

        let mut sorted = self.digests.clone();
        sorted.sort_unstable();
        let leaf_index = sorted
            .binary_search(&leaf_digest)
            .map_err(|_| MerkleError::Internal("leaf digest missing from sorted set".into()))?;

        let levels = build_levels(&sorted);
        let mut siblings = Vec::with_capacity(levels.len());
        let mut pos = leaf_index;
        for level in &levels[..levels.len() - 1] {
            let width = level.len();
            if pos == width - 1 && width % 2 == 1 {
                // Odd last node: self-paired, nothing for the verifier
                // to receive at this level.
            } else if pos % 2 == 0 {
                siblings.push(ProofStep {
                    sibling: level[pos + 1],
                    side: Side::Right,
                });
            } else {
                siblings.push(ProofStep {
                    sibling: level[pos - 1],
                    side: Side::Left,
                });
            }
            pos /= 2;
        }

        debug!(
            "leaf proof generated: label='{}' leaf_index={} total_leaves={}",
            target.label,
            leaf_index,
            self.leaves.len()
        );

        Ok(LeafProofBundle {
            proof: LeafProof {
                siblings,
                leaf_index: leaf_index as u64,
                total_leaves: self.leaves.len() as u64,
                root: self.root,
            },
            target,
            leaf_digest,
        })
    }
}

/// Build every tree level bottom-up from the sorted leaf digests.
///
/// Digests are paired adjacent left-to-right; an odd level pairs its
/// last node with itself. The last level always holds exactly the root.
pub(crate) fn build_levels(sorted_digests: &[B256]) -> Vec<Vec<B256>> {
    let mut levels = vec![sorted_digests.to_vec()];
    while levels[levels.len() - 1].len() > 1 {
        let prev = &levels[levels.len() - 1];
        let mut next = Vec::with_capacity((prev.len() + 1) / 2);
        for pair in prev.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            next.push(hash_pair(left, right));
        }
        levels.push(next);
    }
    levels
}
