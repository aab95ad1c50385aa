//! Well-known names shared by discovery, loading, and the CLI.

/// File name looked up in the working directory and its ancestors.
pub const SCUBA_YML: &str = ".scuba.yml";

/// Name of the cross-file reference tag (written `!from_yaml` in documents).
pub const FROM_YAML_TAG: &str = "from_yaml";

/// Top-level keys accepted in a configuration document.
pub const TOP_LEVEL_KEYS: &[&str] = &["image", "entrypoint", "aliases", "hooks", "environment"];

/// Hook names accepted under the `hooks` key.
pub const HOOK_NAMES: &[&str] = &["user", "root"];

/// When set, discovery keeps walking past filesystem boundaries.
pub const DISCOVERY_ACROSS_FILESYSTEM_ENV: &str = "SCUBA_DISCOVERY_ACROSS_FILESYSTEM";

