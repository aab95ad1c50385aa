//! Restricted YAML loading with the `!from_yaml` directive.
//!
//! Documents are parsed into plain [`serde_yaml::Value`] trees; nothing is
//! ever constructed from a tag name. After parsing, a single pass walks the
//! tree and dispatches tagged nodes against a fixed whitelist: `!from_yaml`
//! is replaced by the scalar it references, every other tag is rejected.
//! Merge keys (`<<`) are applied before that pass.
//!
//! A [`Loader`] owns the cache of referenced documents. Create one per
//! top-level load and drop it afterwards.

pub mod keypath;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use scuba_common::constants::FROM_YAML_TAG;
use scuba_common::error::{ConfigError, Result};
use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

/// Loads YAML documents, resolving `!from_yaml` references.
#[derive(Debug, Default)]
pub struct Loader {
    /// Referenced documents, keyed by canonical path.
    cache: HashMap<PathBuf, Rc<Value>>,
    /// Documents currently being resolved, for cycle detection.
    in_progress: HashSet<PathBuf>,
    disk_reads: usize,
}

impl Loader {
    /// Creates a loader with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files read from disk so far.
    #[must_use]
    pub const fn disk_reads(&self) -> usize {
        self.disk_reads
    }

    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, uses an
    /// unsupported tag, or contains an unresolvable `!from_yaml` reference.
    pub fn load_document(&mut self, path: &Path) -> Result<Value> {
        tracing::debug!(path = %path.display(), "reading document");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.disk_reads += 1;
        self.parse_document(&text, path)
    }

    /// Parses `text` as if it had been read from `path`.
    ///
    /// Relative `!from_yaml` paths resolve against the parent of `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Loader::load_document`], minus the read.
    pub fn parse_document(&mut self, text: &str, path: &Path) -> Result<Value> {
        let parse_error = |source: serde_yaml::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let mut raw: Value = serde_yaml::from_str(text).map_err(parse_error)?;
        raw.apply_merge().map_err(parse_error)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.resolve_tags(raw, path, base_dir)
    }

    fn resolve_tags(&mut self, node: Value, path: &Path, base_dir: &Path) -> Result<Value> {
        match node {
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                if tag == FROM_YAML_TAG {
                    self.from_yaml(&value, base_dir)
                } else {
                    Err(ConfigError::UnsupportedTag {
                        path: path.to_path_buf(),
                        tag: tag.to_string(),
                    })
                }
            }
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.resolve_tags(item, path, base_dir))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Value::Mapping(map) => {
                let mut resolved = serde_yaml::Mapping::with_capacity(map.len());
                for (key, value) in map {
                    let key = self.resolve_tags(key, path, base_dir)?;
                    let value = self.resolve_tags(value, path, base_dir)?;
                    let _ = resolved.insert(key, value);
                }
                Ok(Value::Mapping(resolved))
            }
            scalar => Ok(scalar),
        }
    }

    /// Resolves `!from_yaml <file> <key.path>` to the referenced scalar.
    fn from_yaml(&mut self, argument: &Value, base_dir: &Path) -> Result<Value> {
        let Value::String(text) = argument else {
            return Err(ConfigError::FromYaml {
                file: String::new(),
                key: String::new(),
                message: "arguments must be a plain string".into(),
            });
        };

        let fail = |file: &str, key: &str, message: String| ConfigError::FromYaml {
            file: file.to_string(),
            key: key.to_string(),
            message,
        };

        if !text.is_ascii() {
            return Err(fail(text.as_str(), "", "arguments must be ASCII".into()));
        }
        let mut args = text.split_whitespace();
        let (Some(file), Some(key), None) = (args.next(), args.next(), args.next()) else {
            return Err(fail(
                text.as_str(),
                "",
                "expected exactly two arguments: <file> <key.path>".into(),
            ));
        };

        let target = std::fs::canonicalize(base_dir.join(file))
            .map_err(|e| fail(file, key, e.to_string()))?;
        let document = self
            .external_document(&target)
            .map_err(|e| fail(file, key, e.to_string()))?;

        let segments = keypath::split_key_path(key);
        let value = keypath::lookup(&document, &segments).map_err(|m| fail(file, key, m))?;
        tracing::debug!(file, key, "resolved !from_yaml reference");
        Ok(value.clone())
    }

    fn external_document(&mut self, path: &Path) -> Result<Rc<Value>> {
        if let Some(doc) = self.cache.get(path) {
            tracing::debug!(path = %path.display(), "document cache hit");
            return Ok(Rc::clone(doc));
        }

        if !self.in_progress.insert(path.to_path_buf()) {
            return Err(ConfigError::schema(format!(
                "circular !from_yaml reference to {}",
                path.display()
            )));
        }
        let loaded = self.load_document(path);
        let _ = self.in_progress.remove(path);

        let doc = Rc::new(loaded?);
        let _ = self.cache.insert(path.to_path_buf(), Rc::clone(&doc));
        Ok(doc)
    }
}
