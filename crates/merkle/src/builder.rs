//! Builder for committing a document into a Merkle tree.

use std::collections::{BTreeMap, HashSet};

use alloy_primitives::B256;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use veiltree_core::{flatten, CoreError, LeafInput, LeafRecord, Value, ENTROPY_LEN};

use crate::error::{MerkleError, Result};
use crate::salt::Salter;
use crate::tree::{build_levels, MerkleTree};

/// Builder collecting leaf inputs for one tree.
///
/// A build is atomic: any flattening, salting, or encoding error aborts
/// the whole operation and no tree is produced.
///
/// # Examples
///
/// ```
/// use veiltree_merkle::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// builder.push("name", "alice");
/// builder.push("age", 42i64);
/// let tree = builder.build(&[0u8; 32]).unwrap();
/// let root = tree.root();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    leaves: Vec<LeafInput>,
    metadata: BTreeMap<String, Value>,
}

impl TreeBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder pre-populated with a document's flattened leaves.
    pub fn from_document(document: &Value) -> Result<Self> {
        Ok(Self {
            leaves: flatten(document)?,
            metadata: BTreeMap::new(),
        })
    }

    /// Append a leaf input.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.leaves.push(LeafInput::new(label, value));
        self
    }

    /// Attach a metadata entry. Metadata travels with the tree but is
    /// not part of the commitment.
    pub fn insert_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of collected leaf inputs.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if the builder has no leaf inputs.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Salt every leaf, hash, and build the tree.
    ///
    /// Salts are drawn in lexicographic label order, so a record keeps
    /// its salt no matter where it sits in the input sequence; combined
    /// with digest sorting this makes the root fully independent of
    /// record ordering. Leaves are stored in their input (traversal)
    /// order.
    ///
    /// # Errors
    ///
    /// [`MerkleError::EmptyTree`] with zero leaves,
    /// [`MerkleError::InvalidEntropy`] unless `entropy` is 32 bytes, a
    /// duplicate-label input error, and any encoding failure from
    /// hashing a leaf.
    pub fn build(self, entropy: &[u8]) -> Result<MerkleTree> {
        if self.leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut seen = HashSet::with_capacity(self.leaves.len());
        for leaf in &self.leaves {
            if !seen.insert(leaf.label.as_str()) {
                return Err(
                    CoreError::Input(format!("duplicate leaf label '{}'", leaf.label)).into(),
                );
            }
        }

        let mut salter = Salter::new(entropy)?;
        let entropy = B256::from_slice(entropy);

        let mut order: Vec<usize> = (0..self.leaves.len()).collect();
        order.sort_unstable_by(|&a, &b| self.leaves[a].label.cmp(&self.leaves[b].label));
        let mut salts = vec![B256::ZERO; self.leaves.len()];
        for &index in &order {
            salts[index] = salter.next_salt();
        }

        let records: Vec<LeafRecord> = self
            .leaves
            .into_iter()
            .zip(salts)
            .map(|(leaf, salt)| leaf.into_record(salt))
            .collect();

        let digests = records
            .iter()
            .map(LeafRecord::digest)
            .collect::<veiltree_core::Result<Vec<B256>>>()?;

        let mut sorted = digests.clone();
        sorted.sort_unstable();
        let levels = build_levels(&sorted);
        let root = levels[levels.len() - 1][0];

        debug!(
            "merkle tree built: root={:#x} total_leaves={}",
            root,
            digests.len()
        );

        Ok(MerkleTree::from_parts(
            records,
            digests,
            entropy,
            root,
            self.metadata,
        ))
    }
}

/// Commit a document in one step.
///
/// Flattens `document`, salts each leaf from `entropy` (drawing fresh
/// operating-system entropy when `None`), and builds the tree
/// atomically. The caller persists the returned tree and assigns it an
/// identifier.
///
/// # Examples
///
/// ```
/// use veiltree_core::Value;
/// use veiltree_merkle::create_tree;
///
/// let doc: Value = [
///     ("name".to_owned(), Value::from("alice")),
///     ("age".to_owned(), Value::from(42)),
/// ]
/// .into_iter()
/// .collect();
///
/// let tree = create_tree(&doc, Some(&[0u8; 32])).unwrap();
/// let bundle = tree.prove("age").unwrap();
/// assert!(bundle.proof.verify(bundle.leaf_digest, tree.root()).unwrap());
/// ```
pub fn create_tree(document: &Value, entropy: Option<&[u8]>) -> Result<MerkleTree> {
    let builder = TreeBuilder::from_document(document)?;
    match entropy {
        Some(bytes) => builder.build(bytes),
        None => {
            let mut fresh = [0u8; ENTROPY_LEN];
            OsRng.fill_bytes(&mut fresh);
            builder.build(&fresh)
        }
    }
}
