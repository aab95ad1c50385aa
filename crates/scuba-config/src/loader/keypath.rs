//! Dotted key paths used by `!from_yaml`.
//!
//! Segments are separated by `.`; a segment may contain a literal dot
//! written as `\.`.

use serde_yaml::Value;

/// Splits `key` on unescaped dots, unescaping `\.` inside segments.
///
/// A backslash not followed by a dot is kept as-is.
pub fn split_key_path(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                let _ = chars.next();
            }
            '.' => segments.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    segments.push(current);
    segments
}

/// Walks `segments` through nested mappings of `doc`, returning the scalar
/// found at the end.
///
/// # Errors
///
/// Returns a description of the failure if a segment is missing, an
/// intermediate node is not a mapping, or the leaf is not a scalar.
pub fn lookup<'a>(doc: &'a Value, segments: &[String]) -> Result<&'a Value, String> {
    let mut node = doc;
    for (depth, segment) in segments.iter().enumerate() {
        let Value::Mapping(map) = node else {
            return Err(if depth == 0 {
                "document is not a mapping".to_string()
            } else {
                format!("'{}' is not a mapping", segments[..depth].join("."))
            });
        };
        node = map
            .get(segment.as_str())
            .ok_or_else(|| format!("key '{segment}' not found"))?;
    }

    match node {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(node),
        _ => Err("value is not a scalar".to_string()),
    }
}
