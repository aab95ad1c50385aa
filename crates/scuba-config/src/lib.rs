//! # scuba-config
//!
//! Turns a `.scuba.yml` file and a user command line into an
//! [`ExecutionContext`]: the image, entrypoint, script, and environment a
//! container runner needs.
//!
//! Handles:
//! - **Discovery**: upward search for the nearest configuration file.
//! - **Loader**: restricted YAML parsing with the `!from_yaml` directive.
//! - **Script**: normalization of script nodes shared by hooks and aliases.
//! - **Environment**: mapping and `KEY=VALUE` list forms.
//! - **Schema**: validation and assembly into [`ScubaConfig`].
//! - **Command**: alias expansion and override merging.

pub mod command;
pub mod config;
pub mod discovery;
pub mod environment;
pub mod loader;
pub mod schema;
pub mod script;

use std::path::Path;

use scuba_common::error::{ConfigError, Result};
use serde_yaml::Value;

pub use crate::command::{ExecutionContext, process_command};
pub use crate::config::{AliasDefinition, ScubaConfig};
pub use crate::discovery::{ConfigFilePath, DiscoveryOptions, find_config, find_config_from};
pub use crate::loader::Loader;

/// Loads and validates the configuration file at `path`.
///
/// Documents referenced through `!from_yaml` are read at most once for the
/// duration of this call.
///
/// # Errors
///
/// Returns an error if the file is missing, empty, malformed, uses an
/// unsupported tag, or fails schema validation.
pub fn load_config(path: &Path) -> Result<ScubaConfig> {
    tracing::info!(path = %path.display(), "loading configuration");
    let mut loader = Loader::new();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse_top_level(&mut loader, &text, path)?;
    schema::build_config(&tree)
}

/// Loads a configuration from `text`, resolving relative `!from_yaml`
/// paths against `base_dir`.
///
/// # Errors
///
/// Same as [`load_config`], minus the read of the top-level file.
pub fn load_config_str(text: &str, base_dir: &Path) -> Result<ScubaConfig> {
    let origin = base_dir.join(scuba_common::constants::SCUBA_YML);
    let tree = parse_top_level(&mut Loader::new(), text, &origin)?;
    schema::build_config(&tree)
}

fn parse_top_level(loader: &mut Loader, text: &str, path: &Path) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }
    match loader.parse_document(text, path)? {
        Value::Null => Err(ConfigError::Empty {
            path: path.to_path_buf(),
        }),
        tree => Ok(tree),
    }
}
