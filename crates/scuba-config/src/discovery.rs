//! Upward search for the configuration file.
//!
//! Starting from a directory, each ancestor is checked for [`SCUBA_YML`]
//! until the file is found, the filesystem root is reached, or (unless
//! crossing is enabled) a mount point is reached.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use scuba_common::constants::{DISCOVERY_ACROSS_FILESYSTEM_ENV, SCUBA_YML};
use scuba_common::error::{ConfigError, Result};

/// Location of a discovered configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFilePath {
    /// Directory containing the configuration file.
    pub dir: PathBuf,
    /// Path from `dir` down to the directory the search started in.
    /// Empty when the file sits in the start directory itself.
    pub relative: PathBuf,
}

impl ConfigFilePath {
    /// Full path of the configuration file.
    #[must_use]
    pub fn file(&self) -> PathBuf {
        self.dir.join(SCUBA_YML)
    }
}

/// Knobs for [`find_config_from`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Keep searching past mount points.
    pub cross_filesystem: bool,
}

impl DiscoveryOptions {
    /// Reads options from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            cross_filesystem: std::env::var_os(DISCOVERY_ACROSS_FILESYSTEM_ENV).is_some(),
        }
    }
}

/// Searches upward from the current working directory.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no configuration file exists in the
/// working directory or any searchable ancestor.
pub fn find_config() -> Result<ConfigFilePath> {
    let cwd = current_dir()?;
    find_config_from(&cwd, DiscoveryOptions::from_env())
}

/// Searches upward from `start`.
///
/// `start` is canonicalized first, so `..` components and symlinks are
/// resolved before walking. Only existence checks are performed; the file
/// is not opened.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if `start` cannot be resolved, and
/// [`ConfigError::NotFound`] if no configuration file exists in `start` or
/// any searchable ancestor.
pub fn find_config_from(start: &Path, options: DiscoveryOptions) -> Result<ConfigFilePath> {
    let start = std::fs::canonicalize(start).map_err(|source| ConfigError::Io {
        path: start.to_path_buf(),
        source,
    })?;
    tracing::debug!(start = %start.display(), "searching for {SCUBA_YML}");

    let mut dir = start.clone();
    // Directory names walked through, innermost first.
    let mut walked: Vec<OsString> = Vec::new();

    loop {
        if dir.join(SCUBA_YML).exists() {
            let relative: PathBuf = walked.iter().rev().collect();
            tracing::info!(
                dir = %dir.display(),
                relative = %relative.display(),
                "found {SCUBA_YML}"
            );
            return Ok(ConfigFilePath { dir, relative });
        }

        if !options.cross_filesystem && is_mount_point(&dir) {
            return Err(ConfigError::NotFound {
                filename: SCUBA_YML,
                start,
                boundary: Some(dir),
            });
        }

        let Some(name) = dir.file_name().map(OsString::from) else {
            break;
        };
        walked.push(name);
        if !dir.pop() {
            break;
        }
    }

    Err(ConfigError::NotFound {
        filename: SCUBA_YML,
        start,
        boundary: None,
    })
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })
}

#[cfg(unix)]
fn is_mount_point(dir: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Some(parent) = dir.parent() else {
        return true;
    };
    match (std::fs::metadata(dir), std::fs::metadata(parent)) {
        (Ok(here), Ok(above)) => here.dev() != above.dev(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_mount_point(dir: &Path) -> bool {
    dir.parent().is_none()
}
