//! Validation of a raw document tree and assembly into [`ScubaConfig`].
//!
//! Fails on the first structural problem; no partially built configuration
//! is ever returned.

use scuba_common::constants::{HOOK_NAMES, TOP_LEVEL_KEYS};
use scuba_common::error::{ConfigError, Result};
use scuba_common::types::{Entrypoint, Environment};
use serde_yaml::{Mapping, Value};

use crate::config::{AliasDefinition, ScubaConfig};
use crate::environment::resolve_environment_with;
use crate::script::normalize_script;

/// Assembles a configuration, resolving bare environment variables from the
/// process environment.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] on the first structural violation.
pub fn build_config(tree: &Value) -> Result<ScubaConfig> {
    build_config_with_env(tree, &|name: &str| std::env::var(name).ok())
}

/// Assembles a configuration, using `lookup` for environment variables
/// declared without a value.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] on the first structural violation.
pub fn build_config_with_env(
    tree: &Value,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<ScubaConfig> {
    let Value::Mapping(root) = tree else {
        return Err(ConfigError::schema("configuration must be a mapping"));
    };
    check_top_level_keys(root)?;

    let image = optional_string(root, "image", "top level")?;
    let entrypoint = decode_entrypoint(root, "top level")?;
    let environment = match root.get("environment") {
        Some(node) => resolve_environment_with(node, "environment", lookup)?,
        None => Environment::new(),
    };

    let mut config = ScubaConfig::new(image)
        .with_entrypoint(entrypoint)
        .with_environment(environment);

    if let Some(node) = root.get("aliases") {
        for (name, alias) in decode_aliases(node, lookup)? {
            config = config.with_alias(name, alias);
        }
    }
    if let Some(node) = root.get("hooks") {
        for (name, script) in decode_hooks(node)? {
            config = config.with_hook(name, script);
        }
    }

    tracing::debug!(
        aliases = config.aliases().len(),
        hooks = config.hooks().len(),
        "assembled configuration"
    );
    Ok(config)
}

fn check_top_level_keys(root: &Mapping) -> Result<()> {
    for key in root.keys() {
        match key.as_str() {
            Some(name) if TOP_LEVEL_KEYS.contains(&name) => {}
            Some(name) => {
                return Err(ConfigError::schema(format!(
                    "unexpected top-level key '{name}'"
                )));
            }
            None => {
                return Err(ConfigError::schema(format!(
                    "unexpected top-level key {key:?}"
                )));
            }
        }
    }
    Ok(())
}

fn key_name<'a>(key: &'a Value, what: &str) -> Result<&'a str> {
    key.as_str()
        .ok_or_else(|| ConfigError::schema(format!("{what} names must be strings, got {key:?}")))
}

fn optional_string(map: &Mapping, key: &str, context: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ConfigError::schema(format!(
            "{context}: '{key}' must be a string"
        ))),
    }
}

/// Absent key is `Unset`; a null value is an explicit empty entrypoint.
fn decode_entrypoint(map: &Mapping, context: &str) -> Result<Entrypoint> {
    match map.get("entrypoint") {
        None => Ok(Entrypoint::Unset),
        Some(Value::Null) => Ok(Entrypoint::explicit("")),
        Some(Value::String(value)) => Ok(Entrypoint::explicit(value.clone())),
        Some(_) => Err(ConfigError::schema(format!(
            "{context}: 'entrypoint' must be a string"
        ))),
    }
}

fn decode_aliases(
    node: &Value,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Vec<(String, AliasDefinition)>> {
    let map = match node {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(map) => map,
        _ => return Err(ConfigError::schema("'aliases' must be a mapping")),
    };

    let mut aliases = Vec::with_capacity(map.len());
    for (key, body) in map {
        let name = key_name(key, "alias")?;
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::schema(format!(
                "alias names cannot contain whitespace: '{name}'"
            )));
        }
        aliases.push((name.to_string(), decode_alias(name, body, lookup)?));
    }
    Ok(aliases)
}

fn decode_alias(
    name: &str,
    body: &Value,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<AliasDefinition> {
    let context = format!("alias '{name}'");
    let mut alias = AliasDefinition::new(normalize_script(body, &context)?);

    if let Value::Mapping(map) = body {
        alias.image = optional_string(map, "image", &context)?;
        alias.entrypoint = decode_entrypoint(map, &context)?;
        if let Some(env) = map.get("environment") {
            alias.environment = resolve_environment_with(env, &context, lookup)?;
        }
    }
    Ok(alias)
}

fn decode_hooks(node: &Value) -> Result<Vec<(String, Vec<String>)>> {
    let map = match node {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(map) => map,
        _ => return Err(ConfigError::schema("'hooks' must be a mapping")),
    };

    map.iter()
        .map(|(key, body)| {
            let name = key_name(key, "hook")?;
            if !HOOK_NAMES.contains(&name) {
                return Err(ConfigError::schema(format!(
                    "unknown hook '{name}' (expected one of: {})",
                    HOOK_NAMES.join(", ")
                )));
            }
            let script = normalize_script(body, &format!("hook '{name}'"))?;
            Ok((name.to_string(), script))
        })
        .collect()
}
