//! Canonical byte encoding for document values.
//!
//! Logically equal values must produce identical bytes regardless of how
//! they were constructed, so the encoding is fully deterministic: every
//! value carries an explicit one-byte type tag, scalars use fixed-width
//! big-endian encodings, variable-length payloads carry a u64 big-endian
//! length prefix, and mapping keys are sorted lexicographically by their
//! UTF-8 bytes at every nesting level.
//!
//! The byte layout is a wire contract shared with any independent
//! implementation:
//!
//! ```text
//! null      := 0x00
//! bool      := 0x01 (0x00 | 0x01)
//! int       := 0x02 i64-be
//! float     := 0x03 f64-bits-be        (NaN rejected, -0.0 encodes as +0.0)
//! string    := 0x04 len-u64-be utf8
//! bytes     := 0x05 len-u64-be raw
//! sequence  := 0x06 count-u64-be item*
//! mapping   := 0x07 count-u64-be (string value)*   keys sorted ascending
//! ```

use crate::constants::{
    TAG_BOOL, TAG_BYTES, TAG_FLOAT, TAG_INT, TAG_MAPPING, TAG_NULL, TAG_SEQUENCE, TAG_STRING,
};
use crate::error::{CoreError, Result};
use crate::types::LeafRecord;
use crate::value::Value;

/// Encode a value into its canonical byte form.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_value(value, &mut out)?;
    Ok(out)
}

/// Encode a leaf record into its canonical byte form.
///
/// The layout is `string(label) || value || bytes(salt)`. This is the
/// exact preimage of a leaf digest.
pub fn canonical_record_bytes(record: &LeafRecord) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_str(&record.label, &mut out);
    encode_value(&record.value, &mut out)?;
    encode_bytes(record.salt.as_slice(), &mut out);
    Ok(out)
}

fn encode_value(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Null => out.push(TAG_NULL),
        Value::Bool(v) => {
            out.push(TAG_BOOL);
            out.push(u8::from(*v));
        }
        Value::Int(v) => {
            out.push(TAG_INT);
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::Float(v) => {
            if v.is_nan() {
                return Err(CoreError::Encoding("NaN has no canonical form".into()));
            }
            // IEEE-754 has two zero encodings; canonical form keeps one.
            let normalized = if *v == 0.0 { 0.0f64 } else { *v };
            out.push(TAG_FLOAT);
            out.extend_from_slice(&normalized.to_bits().to_be_bytes());
        }
        Value::String(v) => encode_str(v, out),
        Value::Bytes(v) => encode_bytes(v, out),
        Value::Sequence(items) => {
            out.push(TAG_SEQUENCE);
            out.extend_from_slice(&(items.len() as u64).to_be_bytes());
            for item in items {
                encode_value(item, out)?;
            }
        }
        Value::Mapping(entries) => {
            out.push(TAG_MAPPING);
            out.extend_from_slice(&(entries.len() as u64).to_be_bytes());
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort_unstable();
            for key in keys {
                encode_str(key, out);
                encode_value(&entries[key.as_str()], out)?;
            }
        }
    }
    Ok(())
}

fn encode_str(s: &str, out: &mut Vec<u8>) {
    out.push(TAG_STRING);
    out.extend_from_slice(&(s.len() as u64).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn encode_bytes(b: &[u8], out: &mut Vec<u8>) {
    out.push(TAG_BYTES);
    out.extend_from_slice(&(b.len() as u64).to_be_bytes());
    out.extend_from_slice(b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_scalar_layouts() {
        assert_eq!(canonical_bytes(&Value::Null).unwrap(), [0x00]);
        assert_eq!(canonical_bytes(&Value::Bool(true)).unwrap(), [0x01, 0x01]);
        assert_eq!(
            canonical_bytes(&Value::Int(1)).unwrap(),
            [0x02, 0, 0, 0, 0, 0, 0, 0, 1]
        );

        let mut expected = vec![0x04];
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.push(b'1');
        assert_eq!(canonical_bytes(&Value::from("1")).unwrap(), expected);
    }

    #[test]
    fn test_type_tags_prevent_cross_type_collisions() {
        // string "1" and integer 1 must never encode to the same bytes
        let s = canonical_bytes(&Value::from("1")).unwrap();
        let i = canonical_bytes(&Value::Int(1)).unwrap();
        assert_ne!(s, i);

        // empty string vs empty bytes
        let s = canonical_bytes(&Value::from("")).unwrap();
        let b = canonical_bytes(&Value::Bytes(vec![])).unwrap();
        assert_ne!(s, b);
    }

    #[test]
    fn test_mapping_key_order_is_irrelevant() {
        let ab: Value = [
            ("a".to_owned(), Value::from(1)),
            ("b".to_owned(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        let ba: Value = [
            ("b".to_owned(), Value::from(2)),
            ("a".to_owned(), Value::from(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(canonical_bytes(&ab).unwrap(), canonical_bytes(&ba).unwrap());
    }

    #[test]
    fn test_nested_mapping_keys_sorted_at_every_level() {
        let mut inner1 = IndexMap::new();
        inner1.insert("y".to_owned(), Value::from(1));
        inner1.insert("x".to_owned(), Value::from(2));
        let mut inner2 = IndexMap::new();
        inner2.insert("x".to_owned(), Value::from(2));
        inner2.insert("y".to_owned(), Value::from(1));

        let mut outer1 = IndexMap::new();
        outer1.insert("inner".to_owned(), Value::Mapping(inner1));
        let mut outer2 = IndexMap::new();
        outer2.insert("inner".to_owned(), Value::Mapping(inner2));

        assert_eq!(
            canonical_bytes(&Value::Mapping(outer1)).unwrap(),
            canonical_bytes(&Value::Mapping(outer2)).unwrap()
        );
    }

    #[test]
    fn test_nan_rejected() {
        let err = canonical_bytes(&Value::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(
            canonical_bytes(&Value::Float(-0.0)).unwrap(),
            canonical_bytes(&Value::Float(0.0)).unwrap()
        );
    }

    #[test]
    fn test_float_and_int_disjoint() {
        let f = canonical_bytes(&Value::Float(1.0)).unwrap();
        let i = canonical_bytes(&Value::Int(1)).unwrap();
        assert_ne!(f, i);
    }
}
