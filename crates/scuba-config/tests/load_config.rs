//! End-to-end tests: discover, load, and resolve `.scuba.yml` files on disk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use scuba_common::error::ConfigError;
use scuba_common::types::Entrypoint;
use scuba_config::schema::build_config_with_env;
use scuba_config::{DiscoveryOptions, Loader, find_config_from, load_config, load_config_str};

fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join(".scuba.yml");
    std::fs::write(&path, text).expect("write config");
    path
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn empty_config_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(tmp.path(), "");
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Empty { .. }), "got: {err}");
}

#[test]
fn comment_only_config_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(tmp.path(), "# nothing here\n");
    assert!(load_config(&path).is_err());
}

#[test]
fn missing_config_file_is_io_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = load_config(&tmp.path().join(".scuba.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
}

#[test]
fn malformed_yaml_is_parse_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(tmp.path(), "image: [unterminated\n");
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn image_from_yaml() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join(".gitlab.yml"), "image: debian:8.2\n").expect("write");
    let path = write_config(tmp.path(), "image: !from_yaml .gitlab.yml image\n");

    let config = load_config(&path).expect("should load");
    assert_eq!(config.image().expect("image"), "debian:8.2");
}

#[test]
fn config_from_string_resolves_against_base_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("versions.yml"), "base: alpine:3.19\n").expect("write");

    let config = load_config_str("image: !from_yaml versions.yml base\n", tmp.path())
        .expect("should load");
    assert_eq!(config.image().expect("image"), "alpine:3.19");
    assert!(matches!(
        load_config_str("  \n", tmp.path()),
        Err(ConfigError::Empty { .. })
    ));
}

#[test]
fn image_from_yaml_nested_keys() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        tmp.path().join(".gitlab.yml"),
        "somewhere:\n  down:\n    here: debian:8.2\n",
    )
    .expect("write");
    let path = write_config(tmp.path(), "image: !from_yaml .gitlab.yml somewhere.down.here\n");

    let config = load_config(&path).expect("should load");
    assert_eq!(config.image().expect("image"), "debian:8.2");
}

#[test]
fn image_from_yaml_missing_key() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join(".gitlab.yml"), "somewhere:\n  down:\n").expect("write");
    let path = write_config(tmp.path(), "image: !from_yaml .gitlab.yml somewhere.NONEXISTANT\n");

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FromYaml { .. }), "got: {err}");
}

#[test]
fn from_yaml_in_alias_fields() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        tmp.path().join("ci.yml"),
        "images:\n  build: gcc:13\n  lint: node:20\n",
    )
    .expect("write");
    let path = write_config(
        tmp.path(),
        "image: !from_yaml ci.yml images.build\n\
         aliases:\n  lint:\n    image: !from_yaml ci.yml images.lint\n    script: npm run lint\n",
    );

    let config = load_config(&path).expect("should load");
    assert_eq!(config.image().expect("image"), "gcc:13");
    let ctx = config.process_command(&["lint"], None).expect("resolves");
    assert_eq!(ctx.image, "node:20");
}

#[test]
fn shared_reference_file_read_once() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("a.yml"), "one: first\ntwo: second\n").expect("write");
    let path = write_config(
        tmp.path(),
        "image: !from_yaml a.yml one\n\
         aliases:\n  x:\n    image: !from_yaml a.yml two\n    script: run\n",
    );

    let mut loader = Loader::new();
    let tree = loader.load_document(&path).expect("should load");
    assert_eq!(loader.disk_reads(), 2);

    let config = build_config_with_env(&tree, &|_: &str| None).expect("valid");
    assert_eq!(config.image().expect("image"), "first");
    assert_eq!(
        config.alias("x").and_then(|a| a.image.as_deref()),
        Some("second")
    );
}

#[test]
fn merge_key_fills_alias_fields() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        tmp.path(),
        r"
image: busybox
aliases:
  build: &b
    image: gcc
    script: make
  test:
    <<: *b
    script: make test
",
    );

    let config = load_config(&path).expect("should load");
    let alias = config.alias("test").expect("alias");
    assert_eq!(alias.image.as_deref(), Some("gcc"));
    assert_eq!(alias.script, vec!["make test".to_string()]);
}

#[test]
fn unsafe_tag_never_executes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let marker = tmp.path().join("pwned");
    let path = write_config(
        tmp.path(),
        &format!(
            "image: !!python/object/apply:os.system [\"touch {}\"]\n",
            marker.display()
        ),
    );

    assert!(load_config(&path).is_err());
    assert!(!marker.exists());
}

// ── Environment ─────────────────────────────────────────────────────

#[test]
fn bare_environment_variable_uses_lookup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        tmp.path(),
        "image: na\nenvironment:\n  - EXTERNAL\n  - EXTERNAL_NOTSET\n",
    );

    let tree = Loader::new().load_document(&path).expect("should load");
    let lookup = |name: &str| (name == "EXTERNAL").then(|| "Outside world".to_string());
    let config = build_config_with_env(&tree, &lookup).expect("valid");

    assert_eq!(config.environment()["EXTERNAL"], "Outside world");
    assert_eq!(config.environment()["EXTERNAL_NOTSET"], "");
}

#[test]
fn alias_environment_merges_with_top_level() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        tmp.path(),
        r"
image: na
environment:
  FOO: Top-level
  BAR: 42
aliases:
  al:
    script: Don't care
    environment:
      FOO: Overridden
      MORE: Hello world
",
    );

    let config = load_config(&path).expect("should load");
    assert_eq!(config.environment().len(), 2);
    assert_eq!(config.environment()["FOO"], "Top-level");
    assert_eq!(config.environment()["BAR"], "42");

    let alias = config.alias("al").expect("alias");
    assert_eq!(alias.environment.len(), 2);
    assert_eq!(alias.environment["FOO"], "Overridden");
    assert_eq!(alias.environment["MORE"], "Hello world");

    let ctx = config.process_command(&["al"], None).expect("resolves");
    assert_eq!(ctx.environment.len(), 3);
    assert_eq!(ctx.environment["FOO"], "Overridden");
    assert_eq!(ctx.environment["BAR"], "42");
    assert_eq!(ctx.environment["MORE"], "Hello world");
}

// ── Discovery through resolution ────────────────────────────────────

#[test]
fn discover_load_and_resolve_from_subdirectory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let _ = write_config(
        tmp.path(),
        "image: busybox\nentrypoint:\naliases:\n  greet: echo hello\n",
    );
    let sub = tmp.path().join("src").join("lib");
    std::fs::create_dir_all(&sub).expect("mkdir -p");

    let found = find_config_from(
        &sub,
        DiscoveryOptions {
            cross_filesystem: true,
        },
    )
    .expect("should find");
    assert_eq!(found.relative, Path::new("src").join("lib"));

    let config = load_config(&found.file()).expect("should load");
    let ctx = config
        .process_command(&["greet", "world"], None)
        .expect("resolves");
    assert_eq!(ctx.image, "busybox");
    assert_eq!(ctx.entrypoint, Entrypoint::explicit(""));
    assert_eq!(ctx.script, Some(vec!["echo hello world".to_string()]));
}

#[test]
fn context_serializes_for_consumers() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_config(tmp.path(), "image: busybox\nenvironment: [A=1]\n");

    let config = load_config(&path).expect("should load");
    let ctx = config.process_command::<&str>(&[], None).expect("resolves");
    let json = serde_json::to_value(&ctx).expect("serialize");
    assert_eq!(json["image"], "busybox");
    assert!(json["entrypoint"].is_null());
    assert!(json["script"].is_null());
    assert_eq!(json["environment"]["A"], "1");
}
