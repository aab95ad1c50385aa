//! The configuration error surfaced by every resolution step.
//!
//! Discovery, loading, schema validation, and command processing all fail
//! with [`ConfigError`]. Each variant carries enough context (file, key, or
//! alias) for the message to be shown to the user verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while locating, loading, or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Discovery reached the filesystem root (or a mount point) without
    /// finding the configuration file.
    #[error(
        "{filename} not found in {} or any parent directory{}",
        .start.display(),
        .boundary.as_ref().map_or_else(String::new, |b| format!(" up to mount point {}", b.display()))
    )]
    NotFound {
        /// File name that was searched for.
        filename: &'static str,
        /// Directory the search started from.
        start: PathBuf,
        /// Mount point where the search stopped, if it stopped early.
        boundary: Option<PathBuf>,
    },

    /// A file could not be read.
    #[error("error reading {}: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A document is not well-formed YAML.
    #[error("error parsing {}: {source}", .path.display())]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// A configuration document has no content.
    #[error("{}: configuration is empty", .path.display())]
    Empty {
        /// Empty document.
        path: PathBuf,
    },

    /// A document uses a tag other than `!from_yaml`.
    #[error("{}: unsupported YAML tag {tag}", .path.display())]
    UnsupportedTag {
        /// Document containing the tag.
        path: PathBuf,
        /// The offending tag, as written.
        tag: String,
    },

    /// The document structure does not match the configuration schema.
    #[error("invalid configuration: {message}")]
    Schema {
        /// Description naming the offending key, alias, or hook.
        message: String,
    },

    /// A `!from_yaml` directive could not be resolved.
    #[error("!from_yaml {file} {key}: {message}")]
    FromYaml {
        /// Referenced file, as written in the directive.
        file: String,
        /// Dotted key path, as written in the directive.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// The image was read but never configured.
    #[error("no image configured; set 'image' in the configuration or pass an image override")]
    ImageNotConfigured,

    /// Extra command-line arguments were given to a multi-line alias.
    #[error("additional arguments not permitted with multi-line alias '{alias}'")]
    AliasArguments {
        /// The alias that was invoked.
        alias: String,
    },
}

impl ConfigError {
    /// Builds a [`ConfigError::Schema`] from any message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_without_boundary() {
        let err = ConfigError::NotFound {
            filename: ".scuba.yml",
            start: PathBuf::from("/work/project"),
            boundary: None,
        };
        assert_eq!(
            err.to_string(),
            ".scuba.yml not found in /work/project or any parent directory"
        );
    }

    #[test]
    fn not_found_names_mount_point() {
        let err = ConfigError::NotFound {
            filename: ".scuba.yml",
            start: PathBuf::from("/mnt/data/src"),
            boundary: Some(PathBuf::from("/mnt/data")),
        };
        assert!(err.to_string().ends_with("up to mount point /mnt/data"));
    }

    #[test]
    fn alias_arguments_names_alias() {
        let err = ConfigError::AliasArguments {
            alias: "build".into(),
        };
        assert!(err.to_string().contains("'build'"));
    }
}
