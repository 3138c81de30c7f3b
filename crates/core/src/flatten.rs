//! Document flattening.
//!
//! Walks an arbitrary nested [`Value`] and emits one [`LeafInput`] per
//! scalar field, labelled with the dot-joined path from the document
//! root, in the container's natural traversal order (insertion order for
//! mappings, index order for sequences). Traversal order determines only
//! how leaves are stored and displayed; the tree root is computed over
//! sorted digests and is unaffected by it.

use std::collections::HashSet;

use crate::constants::{LABEL_SEPARATOR, MAX_DEPTH};
use crate::error::{CoreError, Result};
use crate::types::LeafInput;
use crate::value::Value;

/// Flatten a document into its ordered leaf inputs.
///
/// `Bytes` values are atomic leaves and are never descended into.
/// Containers contribute no leaf themselves, so empty containers vanish.
/// A scalar document yields a single leaf with an empty label.
///
/// # Errors
///
/// Returns [`CoreError::Input`] when nesting exceeds [`MAX_DEPTH`] or
/// when two paths collapse to the same label (a mapping key containing
/// the separator can collide with a genuinely nested path; proofs are
/// label-addressed, so labels must be unique).
pub fn flatten(document: &Value) -> Result<Vec<LeafInput>> {
    let mut leaves = Vec::new();
    let mut path: Vec<String> = Vec::new();
    walk(document, &mut path, 0, &mut leaves)?;

    let mut seen = HashSet::with_capacity(leaves.len());
    for leaf in &leaves {
        if !seen.insert(leaf.label.as_str()) {
            return Err(CoreError::Input(format!(
                "duplicate leaf label '{}'",
                leaf.label
            )));
        }
    }

    Ok(leaves)
}

fn walk(
    value: &Value,
    path: &mut Vec<String>,
    depth: usize,
    out: &mut Vec<LeafInput>,
) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(CoreError::Input(format!(
            "nesting exceeds maximum depth of {}",
            MAX_DEPTH
        )));
    }

    match value {
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                walk(item, path, depth + 1, out)?;
                path.pop();
            }
        }
        Value::Mapping(entries) => {
            for (key, item) in entries {
                path.push(key.clone());
                walk(item, path, depth + 1, out)?;
                path.pop();
            }
        }
        leaf => out.push(LeafInput {
            label: path.join(LABEL_SEPARATOR),
            value: leaf.clone(),
        }),
    }

    Ok(())
}
