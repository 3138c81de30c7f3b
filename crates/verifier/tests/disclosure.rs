//! End-to-end disclosure round trips: commit, prove, serialize the
//! bundle to JSON, parse it back, verify offline.

use veiltree_core::Value;
use veiltree_merkle::create_tree;
use veiltree_verifier::{verify_disclosure, DisclosureBundleV1, BUNDLE_TYPE_V1};

fn mapping(entries: &[(&str, Value)]) -> Value {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

fn credential_doc() -> Value {
    mapping(&[
        ("name", Value::from("alice")),
        ("age", Value::from(42)),
        ("score", Value::from(0.75)),
        ("verified", Value::from(true)),
        ("middle_name", Value::Null),
        (
            "address",
            mapping(&[("city", Value::from("berlin")), ("zip", Value::from("10115"))]),
        ),
        ("photo", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])),
    ])
}

fn bundle_for(label: &str) -> (DisclosureBundleV1, veiltree_core::B256) {
    let tree = create_tree(&credential_doc(), Some(&[0x42; 32])).unwrap();
    let bundle = tree.prove(label).unwrap();
    let json_bundle = DisclosureBundleV1::from_bundle(&bundle).unwrap();

    // Round-trip through the wire format.
    let wire = serde_json::to_string(&json_bundle).unwrap();
    let parsed: DisclosureBundleV1 = serde_json::from_str(&wire).unwrap();
    (parsed, tree.root())
}

#[test]
fn scalar_leaf_round_trip() {
    let (bundle, root) = bundle_for("age");
    assert_eq!(bundle.ty, BUNDLE_TYPE_V1);
    let revealed = verify_disclosure(&bundle, Some(root)).unwrap();
    assert_eq!(revealed, Value::Int(42));
}

#[test]
fn null_leaf_round_trip() {
    let (bundle, root) = bundle_for("middle_name");
    // JSON null must round-trip as a present-but-null value.
    assert!(bundle.value.is_some());
    let revealed = verify_disclosure(&bundle, Some(root)).unwrap();
    assert_eq!(revealed, Value::Null);
}

#[test]
fn nested_leaf_round_trip() {
    let (bundle, root) = bundle_for("address.city");
    let revealed = verify_disclosure(&bundle, Some(root)).unwrap();
    assert_eq!(revealed, Value::from("berlin"));
}

#[test]
fn binary_leaf_round_trip() {
    let (bundle, root) = bundle_for("photo");
    assert!(bundle.value.is_none());
    assert!(bundle.value_bytes.is_some());
    let revealed = verify_disclosure(&bundle, Some(root)).unwrap();
    assert_eq!(revealed, Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
}

#[test]
fn float_and_bool_leaves_round_trip() {
    let (bundle, root) = bundle_for("score");
    assert_eq!(verify_disclosure(&bundle, Some(root)).unwrap(), Value::Float(0.75));

    let (bundle, root) = bundle_for("verified");
    assert_eq!(verify_disclosure(&bundle, Some(root)).unwrap(), Value::Bool(true));
}

#[test]
fn verification_without_expected_root_uses_bundle_root() {
    let (bundle, _) = bundle_for("name");
    assert!(verify_disclosure(&bundle, None).is_ok());
}

#[test]
fn tampered_value_is_rejected() {
    let (mut bundle, root) = bundle_for("age");
    bundle.value = Some(serde_json::json!(21));
    let err = verify_disclosure(&bundle, Some(root)).unwrap_err();
    assert!(err.to_string().contains("leafDigest"), "{}", err);
}

#[test]
fn tampered_label_is_rejected() {
    let (mut bundle, root) = bundle_for("age");
    bundle.label = "name".to_owned();
    assert!(verify_disclosure(&bundle, Some(root)).is_err());
}

#[test]
fn wrong_type_of_equal_value_is_rejected() {
    // Integer 42 revealed as string "42" must not verify.
    let (mut bundle, root) = bundle_for("age");
    bundle.value = Some(serde_json::json!("42"));
    assert!(verify_disclosure(&bundle, Some(root)).is_err());
}

#[test]
fn truncated_siblings_are_rejected() {
    let (mut bundle, root) = bundle_for("age");
    // Keep the leafDigest consistency intact and break only the proof.
    bundle.siblings.pop();
    assert!(verify_disclosure(&bundle, Some(root)).is_err());
}

#[test]
fn wrong_root_is_rejected() {
    let (bundle, _) = bundle_for("age");
    let other_root = veiltree_core::sha256(b"unrelated");
    let err = verify_disclosure(&bundle, Some(other_root)).unwrap_err();
    assert!(err.to_string().contains("root mismatch"), "{}", err);
}

#[test]
fn unknown_bundle_type_is_rejected() {
    let (mut bundle, root) = bundle_for("age");
    bundle.ty = "veiltree.somethingElse.v9".to_owned();
    assert!(verify_disclosure(&bundle, Some(root)).is_err());
}

#[test]
fn value_and_value_bytes_are_mutually_exclusive() {
    let (mut bundle, root) = bundle_for("age");
    bundle.value_bytes = Some("0xdeadbeef".to_owned());
    assert!(verify_disclosure(&bundle, Some(root)).is_err());

    let (mut bundle, root) = bundle_for("age");
    bundle.value = None;
    assert!(verify_disclosure(&bundle, Some(root)).is_err());
}

#[test]
fn proofs_from_different_trees_do_not_cross_verify() {
    let doc = credential_doc();
    let tree_a = create_tree(&doc, Some(&[0x01; 32])).unwrap();
    let tree_b = create_tree(&doc, Some(&[0x02; 32])).unwrap();

    let bundle = tree_a.prove("age").unwrap();
    let json_bundle = DisclosureBundleV1::from_bundle(&bundle).unwrap();
    let err = verify_disclosure(&json_bundle, Some(tree_b.root())).unwrap_err();
    assert!(err.to_string().contains("root mismatch"), "{}", err);
}
