//! Human-readable rendering of resolved contexts and aliases.

use std::fmt::Write;

use scuba_config::{AliasDefinition, ExecutionContext};

/// Renders an execution context as an indented report.
#[must_use]
pub fn format_context(ctx: &ExecutionContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "image:      {}", ctx.image);
    let _ = writeln!(out, "entrypoint: {}", ctx.entrypoint);
    match &ctx.script {
        None => {
            let _ = writeln!(out, "script:     (interactive shell)");
        }
        Some(lines) => {
            let _ = writeln!(out, "script:");
            for line in lines {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    if !ctx.environment.is_empty() {
        let _ = writeln!(out, "environment:");
        for (name, value) in &ctx.environment {
            let _ = writeln!(out, "    {name}={value}");
        }
    }
    out
}

/// Renders one alias with its overrides.
#[must_use]
pub fn format_alias(name: &str, alias: &AliasDefinition) -> String {
    let mut out = String::new();
    let _ = write!(out, "{name}");
    if let Some(image) = &alias.image {
        let _ = write!(out, " [image: {image}]");
    }
    if alias.entrypoint.is_set() {
        let _ = write!(out, " [entrypoint: {}]", alias.entrypoint);
    }
    let _ = writeln!(out);
    for line in &alias.script {
        let _ = writeln!(out, "    {line}");
    }
    out
}
