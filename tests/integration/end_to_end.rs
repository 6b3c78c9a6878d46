//! End-to-end scenario tests

use crate::integration::test_utils::{build, write_fragment};
use serde_json::json;
use strata::api::{self, Entity, GetOptions};
use tempfile::TempDir;

#[test]
fn test_mixed_file_and_directory_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_fragment(root, "a/b.toml", "e = \"f\"");
    write_fragment(root, "c.toml", "g = \"h\"");
    write_fragment(root, "c/d.toml", "i = \"j\"");

    let tree = build(&[root]);
    assert_eq!(
        tree.to_json(),
        json!({
            "a": {"b": {"e": "f"}},
            "c": {"g": "h", "d": {"i": "j"}}
        })
    );

    let get = |coordinate: &str| match api::get_entity(&tree, coordinate, &GetOptions::default()) {
        Some(Entity::Node(node)) => node.to_json(),
        other => panic!("expected node at {}, got {:?}", coordinate, other),
    };
    assert_eq!(get("a.b.e"), json!("f"));
    assert_eq!(get("c.d.i"), json!("j"));
}

/// Building twice from unchanged roots yields structurally equal trees.
#[test]
fn test_rebuild_is_structurally_equal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_fragment(root, "a/b.toml", "e = \"f\"");
    write_fragment(root, "c.toml", "g = \"h\"");
    write_fragment(root, "c/d.toml", "i = \"j\"");

    assert_eq!(build(&[root]), build(&[root]));
}

/// A realistic deployment layout: defaults root plus environment overlay,
/// queried with ancestor fallback.
#[test]
fn test_deployment_layout_with_overlay_and_fallback() {
    let defaults_root = TempDir::new().unwrap();
    let env_root = TempDir::new().unwrap();

    write_fragment(
        defaults_root.path(),
        "services.toml",
        "log_level = \"info\"",
    );
    write_fragment(
        defaults_root.path(),
        "services/api.toml",
        "port = 8080",
    );
    write_fragment(
        env_root.path(),
        "services/api.toml",
        "port = 9090\nreplicas = 3",
    );

    let tree = build(&[defaults_root.path(), env_root.path()]);
    assert_eq!(
        tree.to_json(),
        json!({"services": {
            "log_level": "info",
            "api": {"port": 9090, "replicas": 3}
        }})
    );

    let mut settings = crate::integration::test_utils::defaults(&[
        ("port", json!(80)),
        ("log_level", json!("warn")),
    ]);
    api::fill(
        &tree,
        "services.api",
        &mut settings,
        &strata::resolve::FillOptions { ancestry: true },
    );
    assert_eq!(settings.get("port"), Some(&json!(9090)));
    assert_eq!(settings.get("log_level"), Some(&json!("info")));
}
