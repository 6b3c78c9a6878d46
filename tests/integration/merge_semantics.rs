//! Integration tests for fragment merge semantics

use crate::integration::test_utils::{build, write_fragment};
use serde_json::json;
use tempfile::TempDir;

/// A fragment file loads first; the identically-named sibling directory's
/// fragments then merge over it.
#[test]
fn test_file_then_directory_precedence() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_fragment(root, "a.toml", "x = 1");
    write_fragment(root, "a/b.toml", "y = 2");

    let tree = build(&[root]);
    assert_eq!(tree.to_json(), json!({"a": {"x": 1, "b": {"y": 2}}}));
}

/// Only a fragment's own top-level keys overwrite; keys it does not supply
/// are preserved, and re-supplied nested mappings replace wholesale.
#[test]
fn test_shallow_overwrite() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_fragment(first.path(), "pos.toml", "x = 0\nw = 9");
    write_fragment(second.path(), "pos.toml", "x = 1\nz = 3");

    let tree = build(&[first.path(), second.path()]);
    assert_eq!(tree.to_json(), json!({"pos": {"x": 1, "z": 3, "w": 9}}));
}

#[test]
fn test_nested_mapping_replaced_not_deep_merged() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_fragment(first.path(), "pos.toml", "[n]\ndeep = 1\nkeep = 2");
    write_fragment(second.path(), "pos.toml", "[n]\ndeep = 7");

    let tree = build(&[first.path(), second.path()]);
    // "keep" is gone: nested mappings are replaced wholesale, never merged.
    assert_eq!(tree.to_json(), json!({"pos": {"n": {"deep": 7}}}));
}

/// A non-mapping fragment value replaces the node at its position.
#[test]
fn test_leaf_fragment_replaces_position() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_fragment(first.path(), "limit.toml", "soft = 10\nhard = 20");
    write_fragment(second.path(), "limit.json", "100");

    let tree = build(&[first.path(), second.path()]);
    assert_eq!(tree.to_json(), json!({"limit": 100}));
}

/// A later mapping fragment displaces an earlier leaf at the same position.
#[test]
fn test_mapping_fragment_displaces_leaf() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_fragment(first.path(), "limit.json", "100");
    write_fragment(second.path(), "limit.toml", "soft = 10");

    let tree = build(&[first.path(), second.path()]);
    assert_eq!(tree.to_json(), json!({"limit": {"soft": 10}}));
}

/// Two fragments with the same stem in one directory apply in lexicographic
/// file order.
#[test]
fn test_same_stem_different_extension_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_fragment(root, "svc.json", r#"{"x": "json", "only_json": 1}"#);
    write_fragment(root, "svc.toml", "x = \"toml\"\nonly_toml = 2");

    let tree = build(&[root]);
    // svc.json sorts before svc.toml, so the TOML keys win on collision.
    assert_eq!(
        tree.to_json(),
        json!({"svc": {"x": "toml", "only_json": 1, "only_toml": 2}})
    );
}

/// Deeply nested fragments create the intermediate mappings their path
/// implies.
#[test]
fn test_intermediate_mappings_created() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_fragment(root, "region/zone/rack.toml", "id = \"r1\"");

    let tree = build(&[root]);
    assert_eq!(
        tree.to_json(),
        json!({"region": {"zone": {"rack": {"id": "r1"}}}})
    );
}
