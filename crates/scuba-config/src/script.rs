//! Script nodes shared by hooks and aliases.
//!
//! Three shapes are accepted and normalize to the same thing:
//!
//! ```yaml
//! a: echo hello
//! b:
//!   script: echo hello
//! c:
//!   script:
//!     - echo hello
//! ```

use scuba_common::error::{ConfigError, Result};
use serde_yaml::Value;

/// Decoded form of a script node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptNode {
    /// A single command line.
    Line(String),
    /// An ordered list of command lines.
    Lines(Vec<String>),
}

impl ScriptNode {
    /// Decodes `node`, naming `context` in any error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Schema`] if `node` is neither a string nor a
    /// mapping whose `script` key holds a string or a list of strings.
    pub fn decode(node: &Value, context: &str) -> Result<Self> {
        match node {
            Value::String(line) => Ok(Self::Line(line.clone())),
            Value::Mapping(map) => match map.get("script") {
                Some(Value::String(line)) => Ok(Self::Line(line.clone())),
                Some(Value::Sequence(items)) => {
                    let lines = items
                        .iter()
                        .map(|item| match item {
                            Value::String(line) => Ok(line.clone()),
                            _ => Err(ConfigError::schema(format!(
                                "{context}: every 'script' entry must be a string"
                            ))),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    if lines.is_empty() {
                        return Err(ConfigError::schema(format!(
                            "{context}: 'script' must not be empty"
                        )));
                    }
                    Ok(Self::Lines(lines))
                }
                Some(_) => Err(ConfigError::schema(format!(
                    "{context}: 'script' must be a string or a list of strings"
                ))),
                None => Err(ConfigError::schema(format!(
                    "{context}: must have a 'script' subkey"
                ))),
            },
            _ => Err(ConfigError::schema(format!(
                "{context}: must be a string or a mapping with a 'script' subkey"
            ))),
        }
    }

    /// Consumes the node, returning its lines in order.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Line(line) => vec![line],
            Self::Lines(lines) => lines,
        }
    }
}

/// Normalizes any accepted script shape into an ordered list of lines.
///
/// # Errors
///
/// See [`ScriptNode::decode`].
pub fn normalize_script(node: &Value, context: &str) -> Result<Vec<String>> {
    ScriptNode::decode(node, context).map(ScriptNode::into_lines)
}
