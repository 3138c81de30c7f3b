//! Offline verifier for veiltree disclosure bundles.
//!
//! A disclosure bundle is the self-contained JSON artifact a prover
//! hands to a relying party: one revealed leaf record (label, value,
//! salt) together with its inclusion proof and the committed root. The
//! verifier recomputes the leaf digest from the revealed record itself,
//! so a bundle cannot smuggle in a digest that does not match its
//! claimed data.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use veiltree_core::{hash_data_block, LeafRecord, Value, B256, SALT_LEN};
use veiltree_merkle::{LeafProof, LeafProofBundle, ProofStep, Side};

/// Bundle format identifier.
pub const BUNDLE_TYPE_V1: &str = "veiltree.leafProof.v1";

fn parse_hex_bytes(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

fn parse_b256(s: &str) -> anyhow::Result<B256> {
    Ok(s.parse::<B256>()?)
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// A plain Option field would turn an explicit JSON null into None,
// erasing the difference between a revealed null leaf and a value that
// travels in `valueBytes`.
fn some_even_if_null<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// One sibling entry in the canonical JSON proof format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiblingJson {
    /// Hex-encoded sibling digest.
    pub hash: String,
    /// Which side of the target the sibling sits on.
    pub side: Side,
}

/// Canonical JSON disclosure bundle format.
///
/// Scalar leaf values travel as native JSON in `value`; binary leaf
/// values travel hex-encoded in `valueBytes`. Exactly one of the two
/// must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureBundleV1 {
    /// Format identifier, [`BUNDLE_TYPE_V1`].
    #[serde(rename = "type")]
    pub ty: String,
    /// Dot-joined label of the revealed leaf.
    pub label: String,
    /// The revealed value, when it is JSON-representable. A present
    /// `null` means a revealed null leaf; an absent field means the
    /// value travels in `valueBytes` instead.
    #[serde(
        default,
        deserialize_with = "some_even_if_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<serde_json::Value>,
    /// The revealed value, hex-encoded, when it is a binary blob.
    #[serde(rename = "valueBytes", default, skip_serializing_if = "Option::is_none")]
    pub value_bytes: Option<String>,
    /// Hex-encoded 32-byte leaf salt.
    pub salt: String,
    /// Hex-encoded digest of the revealed record.
    #[serde(rename = "leafDigest")]
    pub leaf_digest: String,
    /// The leaf's position in the tree's sorted digest order.
    #[serde(rename = "leafIndex")]
    pub leaf_index: u64,
    /// Total number of leaves in the committed tree.
    #[serde(rename = "totalLeaves")]
    pub total_leaves: u64,
    /// Hex-encoded Merkle root the proof was generated against.
    pub root: String,
    /// Sibling hashes from the leaf level upward.
    pub siblings: Vec<SiblingJson>,
}

impl DisclosureBundleV1 {
    /// Render a proof bundle produced by `MerkleTree::prove` into the
    /// JSON disclosure format.
    pub fn from_bundle(bundle: &LeafProofBundle) -> anyhow::Result<Self> {
        let (value, value_bytes) = match &bundle.target.value {
            Value::Bytes(bytes) => (None, Some(to_hex(bytes))),
            other => (
                Some(value_to_json(other).with_context(|| {
                    format!("leaf '{}' is not JSON-representable", bundle.target.label)
                })?),
                None,
            ),
        };

        Ok(Self {
            ty: BUNDLE_TYPE_V1.to_owned(),
            label: bundle.target.label.clone(),
            value,
            value_bytes,
            salt: to_hex(bundle.target.salt.as_slice()),
            leaf_digest: to_hex(bundle.leaf_digest.as_slice()),
            leaf_index: bundle.proof.leaf_index,
            total_leaves: bundle.proof.total_leaves,
            root: to_hex(bundle.proof.root.as_slice()),
            siblings: bundle
                .proof
                .siblings
                .iter()
                .map(|step| SiblingJson {
                    hash: to_hex(step.sibling.as_slice()),
                    side: step.side,
                })
                .collect(),
        })
    }
}

/// Convert a JSON value into a document value.
///
/// Integers that fit i64 stay integers; all other JSON numbers become
/// floats. Fails on integers outside the i64 range.
pub fn json_to_value(json: &serde_json::Value) -> anyhow::Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(v) => Value::Bool(*v),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Value::Int(v)
            } else if let Some(v) = n.as_f64() {
                Value::Float(v)
            } else {
                anyhow::bail!("integer {} out of range", n);
            }
        }
        serde_json::Value::String(v) => Value::String(v.clone()),
        serde_json::Value::Array(items) => Value::Sequence(
            items
                .iter()
                .map(json_to_value)
                .collect::<anyhow::Result<_>>()?,
        ),
        serde_json::Value::Object(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), json_to_value(v)?)))
                .collect::<anyhow::Result<_>>()?,
        ),
    })
}

/// Convert a document value into JSON.
///
/// Fails on binary blobs (those travel in the bundle's `valueBytes`
/// field) and on floats JSON cannot represent.
pub fn value_to_json(value: &Value) -> anyhow::Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(v) => serde_json::Value::Bool(*v),
        Value::Int(v) => serde_json::Value::Number((*v).into()),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .with_context(|| format!("float {} is not JSON-representable", v))?,
        Value::String(v) => serde_json::Value::String(v.clone()),
        Value::Bytes(_) => anyhow::bail!("binary values have no JSON form"),
        Value::Sequence(items) => serde_json::Value::Array(
            items
                .iter()
                .map(value_to_json)
                .collect::<anyhow::Result<_>>()?,
        ),
        Value::Mapping(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), value_to_json(v)?)))
                .collect::<anyhow::Result<_>>()?,
        ),
    })
}

/// Verify a disclosure bundle, returning the revealed value on success.
///
/// The leaf digest is recomputed from the revealed record; the bundle's
/// own `leafDigest` field is only cross-checked for consistency. When
/// `expected_root` is given (obtained from a trusted channel), the
/// bundle's root must match it.
pub fn verify_disclosure(
    bundle: &DisclosureBundleV1,
    expected_root: Option<B256>,
) -> anyhow::Result<Value> {
    anyhow::ensure!(
        bundle.ty == BUNDLE_TYPE_V1,
        "unsupported bundle type: {}",
        bundle.ty
    );

    let salt_bytes = parse_hex_bytes(&bundle.salt).context("invalid bundle.salt")?;
    anyhow::ensure!(
        salt_bytes.len() == SALT_LEN,
        "invalid salt length: expected {} bytes, got {}",
        SALT_LEN,
        salt_bytes.len()
    );
    let salt = B256::from_slice(&salt_bytes);

    let value = match (&bundle.value, &bundle.value_bytes) {
        (Some(json), None) => json_to_value(json).context("invalid bundle.value")?,
        (None, Some(hex_str)) => {
            Value::Bytes(parse_hex_bytes(hex_str).context("invalid bundle.valueBytes")?)
        }
        _ => anyhow::bail!("bundle must carry exactly one of value and valueBytes"),
    };

    let record = LeafRecord::new(bundle.label.clone(), value, salt);
    let computed = hash_data_block(&record)?;

    let claimed = parse_b256(&bundle.leaf_digest).context("invalid bundle.leafDigest")?;
    anyhow::ensure!(
        computed == claimed,
        "revealed record does not match bundle leafDigest (computed={:#x})",
        computed
    );

    let root = parse_b256(&bundle.root).context("invalid bundle.root")?;
    if let Some(expected) = expected_root {
        anyhow::ensure!(
            root == expected,
            "bundle root mismatch: bundle={:#x}, expected={:#x}",
            root,
            expected
        );
    }

    let proof = LeafProof {
        siblings: bundle
            .siblings
            .iter()
            .map(|entry| {
                Ok(ProofStep {
                    sibling: parse_b256(&entry.hash).context("invalid sibling hash")?,
                    side: entry.side,
                })
            })
            .collect::<anyhow::Result<_>>()?,
        leaf_index: bundle.leaf_index,
        total_leaves: bundle.total_leaves,
        root,
    };

    let verified = proof.verify(computed, root)?;
    anyhow::ensure!(
        verified,
        "proof does not reproduce root for label '{}'",
        bundle.label
    );

    Ok(record.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_preserves_int_vs_float() {
        let int = json_to_value(&serde_json::json!(7)).unwrap();
        assert_eq!(int, Value::Int(7));

        let float = json_to_value(&serde_json::json!(7.0)).unwrap();
        assert_eq!(float, Value::Float(7.0));
    }

    #[test]
    fn test_bytes_have_no_json_form() {
        assert!(value_to_json(&Value::Bytes(vec![1, 2])).is_err());
    }

    #[test]
    fn test_hex_parsing_accepts_prefix() {
        assert_eq!(parse_hex_bytes("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(parse_hex_bytes("0102").unwrap(), vec![1, 2]);
        assert!(parse_hex_bytes("0xzz").is_err());
    }
}
