//! Environment declarations.
//!
//! Both forms below resolve to the same mapping:
//!
//! ```yaml
//! environment:
//!   MAGIC: 42
//!   EXTERNAL:
//! ```
//!
//! ```yaml
//! environment:
//!   - MAGIC=42
//!   - EXTERNAL
//! ```
//!
//! A variable with no inline value takes its value from the process
//! environment at load time, or the empty string if it is not set there.

use scuba_common::error::{ConfigError, Result};
use scuba_common::types::Environment;
use serde_yaml::Value;

/// One declared variable before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    name: String,
    value: Option<String>,
}

/// Resolves `node` against the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] if `node` is not a mapping or list of
/// assignments, or if a value is not a scalar.
pub fn resolve_environment(node: &Value, context: &str) -> Result<Environment> {
    resolve_environment_with(node, context, &|name: &str| std::env::var(name).ok())
}

/// Resolves `node`, using `lookup` for variables declared without a value.
///
/// # Errors
///
/// See [`resolve_environment`].
pub fn resolve_environment_with(
    node: &Value,
    context: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Environment> {
    let mut environment = Environment::new();
    for Declaration { name, value } in decode(node, context)? {
        let value = value.unwrap_or_else(|| {
            tracing::debug!(name = %name, "taking value from process environment");
            lookup(&name).unwrap_or_default()
        });
        let _ = environment.insert(name, value);
    }
    Ok(environment)
}

fn decode(node: &Value, context: &str) -> Result<Vec<Declaration>> {
    match node {
        Value::Null => Ok(Vec::new()),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| {
                let Value::String(name) = key else {
                    return Err(ConfigError::schema(format!(
                        "{context}: environment variable names must be strings"
                    )));
                };
                let value = scalar_to_string(value).ok_or_else(|| {
                    ConfigError::schema(format!(
                        "{context}: value of '{name}' must be a scalar"
                    ))
                })?;
                Ok(Declaration {
                    name: name.clone(),
                    value,
                })
            })
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                let Value::String(entry) = item else {
                    return Err(ConfigError::schema(format!(
                        "{context}: list entries must be KEY=VALUE strings"
                    )));
                };
                parse_assignment(entry, context)
            })
            .collect(),
        _ => Err(ConfigError::schema(format!(
            "{context}: must be a mapping or a list of KEY=VALUE strings"
        ))),
    }
}

fn parse_assignment(entry: &str, context: &str) -> Result<Declaration> {
    let (name, value) = match entry.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (entry, None),
    };
    if name.is_empty() {
        return Err(ConfigError::schema(format!(
            "{context}: invalid environment entry '{entry}'"
        )));
    }
    Ok(Declaration {
        name: name.to_string(),
        value,
    })
}

/// Stringifies a scalar value. Returns `None` for non-scalars and
/// `Some(None)` for null, which defers to the process environment.
///
/// Booleans render as `True`/`False`.
fn scalar_to_string(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(true) => Some(Some("True".to_string())),
        Value::Bool(false) => Some(Some("False".to_string())),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
