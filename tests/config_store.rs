mod common;
use crate::common::builders::ConfigTreeBuilder;
use crate::common::init_tracing;

use std::path::Path;
use std::sync::Arc;

use dyncomp::config::ConfigFileStore;
use dyncomp::errors::DyncompError;
use dyncomp::fs::mock::MockFileSystem;
use dyncomp::types::CONFIG_FILE_NAME;

#[test]
fn parse_missing_file_is_io_error() {
    init_tracing();

    let store = ConfigFileStore::default();
    match store.parse(Path::new("unexistent-file.json")) {
        Err(DyncompError::Io { path, .. }) => {
            assert_eq!(path, Path::new("unexistent-file.json"));
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn parse_empty_object_yields_empty_mapping() {
    init_tracing();

    let tree = ConfigTreeBuilder::new().with_raw_config("", "{}").build();
    let store = ConfigFileStore::default();

    let config = store.parse(&tree.path(CONFIG_FILE_NAME)).unwrap();
    assert!(config.is_empty());
}

#[test]
fn parse_reads_command_strings() {
    init_tracing();

    let tree = ConfigTreeBuilder::new()
        .with_config("", &[("run", "cargo run"), ("test", "cargo test --all")])
        .build();
    let store = ConfigFileStore::default();

    let config = store.parse(&tree.path(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config.len(), 2);
    assert_eq!(config["run"], "cargo run");
    assert_eq!(config["test"], "cargo test --all");
}

#[test]
fn parse_invalid_json_is_malformed_with_diagnostic() {
    init_tracing();

    let tree = ConfigTreeBuilder::new()
        .with_raw_config("", "incorrect json")
        .build();
    let store = ConfigFileStore::default();

    let err = store.parse(&tree.path(CONFIG_FILE_NAME)).unwrap_err();
    assert!(matches!(err, DyncompError::MalformedConfig { .. }), "got {:?}", err);
    assert!(
        err.to_string().contains("expected value"),
        "diagnostic missing from: {}",
        err
    );
}

#[test]
fn parse_rejects_non_string_values() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("/p/dyncomp.json", r#"{"run": 1}"#);
    fs.add_file("/q/dyncomp.json", r#"{"run": {"cmd": "ls"}}"#);
    fs.add_file("/r/dyncomp.json", r#"["ls"]"#);
    let store = ConfigFileStore::new(Arc::new(fs));

    for path in ["/p/dyncomp.json", "/q/dyncomp.json", "/r/dyncomp.json"] {
        let err = store.parse(Path::new(path)).unwrap_err();
        assert!(
            matches!(err, DyncompError::MalformedConfig { .. }),
            "{path}: expected MalformedConfig, got {:?}",
            err
        );
    }
}

#[test]
fn parse_directory_named_like_config_is_io_error() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_dir("/p/dyncomp.json");
    let store = ConfigFileStore::new(Arc::new(fs));

    let err = store.parse(Path::new("/p/dyncomp.json")).unwrap_err();
    assert!(matches!(err, DyncompError::Io { .. }), "got {:?}", err);
}

#[test]
fn contains_config_file_detects_presence() {
    init_tracing();

    let tree = ConfigTreeBuilder::new()
        .with_config("with", &[("run", "true")])
        .with_dir("without")
        .build();
    let store = ConfigFileStore::default();

    assert_eq!(
        store.contains_config_file(&tree.path("with")),
        Some(tree.path("with").join(CONFIG_FILE_NAME))
    );
    assert_eq!(store.contains_config_file(&tree.path("without")), None);
}
