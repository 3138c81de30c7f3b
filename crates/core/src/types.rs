//! Leaf types shared across the workspace.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hashing::hash_data_block;
use crate::value::Value;

/// An unsalted `(label, value)` pair produced by the flattener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafInput {
    /// Dot-joined path from the document root.
    pub label: String,
    /// The field data. Always a leaf value (scalar, null, or bytes) when
    /// produced by the flattener.
    pub value: Value,
}

impl LeafInput {
    /// Create a new leaf input.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Attach a salt, producing the immutable record that gets hashed.
    pub fn into_record(self, salt: B256) -> LeafRecord {
        LeafRecord {
            label: self.label,
            value: self.value,
            salt,
        }
    }
}

/// The piece of data a Merkle tree leaf commits to.
///
/// Immutable once created: the salt is generated exactly once during a
/// tree build and never regenerated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRecord {
    /// Dot-joined path from the document root.
    pub label: String,
    /// The field data.
    pub value: Value,
    /// Per-leaf salt preventing value guessing from the digest.
    pub salt: B256,
}

impl LeafRecord {
    /// Create a new leaf record.
    pub fn new(label: impl Into<String>, value: impl Into<Value>, salt: B256) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            salt,
        }
    }

    /// SHA-256 digest of this record's canonical encoding.
    pub fn digest(&self) -> Result<B256> {
        hash_data_block(self)
    }
}
