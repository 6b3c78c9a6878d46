//! Integration tests for property snapshots and interpolation

use crate::integration::test_utils::{build_with_options, write_fragment};
use serde_json::json;
use std::fs;
use strata::api::{self, BuildOptions};
use strata::eval::FormatEvaluator;
use strata::error::LoadError;
use tempfile::TempDir;

#[test]
fn test_direct_properties_override_file_properties() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("conf");
    fs::create_dir(&root).unwrap();
    write_fragment(&root, "app.toml", "f = \"${f}\"\ng = \"${g}\"");

    let props_file = temp_dir.path().join("props.toml");
    fs::write(&props_file, "f = \"file\"\ng = \"only-file\"").unwrap();

    let mut options = BuildOptions::default();
    options.properties_file = Some(props_file);
    options.properties.insert("f".to_string(), json!("direct"));

    let tree = build_with_options(&[root.as_path()], &options);
    assert_eq!(
        tree.to_json(),
        json!({"app": {"f": "direct", "g": "only-file"}})
    );
}

#[test]
fn test_properties_file_must_be_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("conf");
    fs::create_dir(&root).unwrap();
    write_fragment(&root, "app.toml", "x = 1");

    let props_file = temp_dir.path().join("props.json");
    fs::write(&props_file, "[1, 2, 3]").unwrap();

    let mut options = BuildOptions::default();
    options.properties_file = Some(props_file);

    let result = api::build_entities(&[root], &FormatEvaluator, &options);
    assert!(matches!(result, Err(LoadError::PropertiesShape { .. })));
}

#[test]
fn test_interpolation_reaches_every_fragment() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("conf");
    fs::create_dir(&root).unwrap();
    write_fragment(&root, "web.toml", "endpoint = \"http://${host}/web\"");
    write_fragment(&root, "web/tls.toml", "endpoint = \"https://${host}/web\"");

    let mut options = BuildOptions::default();
    options
        .properties
        .insert("host".to_string(), json!("svc.internal"));

    let tree = build_with_options(&[root.as_path()], &options);
    assert_eq!(
        tree.to_json(),
        json!({"web": {
            "endpoint": "http://svc.internal/web",
            "tls": {"endpoint": "https://svc.internal/web"}
        }})
    );
}

#[test]
fn test_whole_string_placeholder_is_typed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("conf");
    fs::create_dir(&root).unwrap();
    write_fragment(&root, "scale.toml", "replicas = \"${replicas}\"");

    let mut options = BuildOptions::default();
    options.properties.insert("replicas".to_string(), json!(4));

    let tree = build_with_options(&[root.as_path()], &options);
    assert_eq!(tree.to_json(), json!({"scale": {"replicas": 4}}));
}
