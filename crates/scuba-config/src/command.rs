//! Resolution of a user command line against a [`ScubaConfig`].

use std::borrow::Cow;

use scuba_common::error::{ConfigError, Result};
use scuba_common::types::{Entrypoint, Environment};
use serde::Serialize;

use crate::config::ScubaConfig;

/// Everything the container runner needs to launch a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    /// Image to run.
    pub image: String,
    /// Entrypoint to use.
    pub entrypoint: Entrypoint,
    /// Shell command lines to run, or `None` for an interactive shell.
    pub script: Option<Vec<String>>,
    /// Environment passed into the container.
    pub environment: Environment,
}

impl ScubaConfig {
    /// Resolves `args` against this configuration.
    ///
    /// # Errors
    ///
    /// See [`process_command`].
    pub fn process_command<S: AsRef<str>>(
        &self,
        args: &[S],
        image_override: Option<&str>,
    ) -> Result<ExecutionContext> {
        process_command(self, args, image_override)
    }
}

/// Resolves a user command line into an [`ExecutionContext`].
///
/// If the first token names an alias, the alias is expanded and its image,
/// entrypoint, and environment are layered over the top-level values.
/// Otherwise the tokens are joined into a single shell-quoted line. An
/// `image_override` always wins.
///
/// # Errors
///
/// Returns [`ConfigError::AliasArguments`] if extra arguments are given to a
/// multi-line alias, or [`ConfigError::ImageNotConfigured`] if no image is
/// available from the alias, the override, or the top level.
pub fn process_command<S: AsRef<str>>(
    config: &ScubaConfig,
    args: &[S],
    image_override: Option<&str>,
) -> Result<ExecutionContext> {
    let Some((first, rest)) = args.split_first() else {
        tracing::debug!("no command given");
        return Ok(ExecutionContext {
            image: resolve_image(config, None, image_override)?,
            entrypoint: config.entrypoint().clone(),
            script: None,
            environment: config.environment().clone(),
        });
    };

    let Some(alias) = config.alias(first.as_ref()) else {
        tracing::debug!(command = first.as_ref(), "running literal command");
        return Ok(ExecutionContext {
            image: resolve_image(config, None, image_override)?,
            entrypoint: config.entrypoint().clone(),
            script: Some(vec![shell_join(args)]),
            environment: config.environment().clone(),
        });
    };

    let name = first.as_ref();
    tracing::debug!(alias = name, lines = alias.script.len(), "expanding alias");
    let script = if rest.is_empty() {
        alias.script.clone()
    } else if alias.is_multiline() {
        return Err(ConfigError::AliasArguments {
            alias: name.to_string(),
        });
    } else {
        alias
            .script
            .iter()
            .map(|line| format!("{line} {}", shell_join(rest)))
            .collect()
    };

    let mut environment = config.environment().clone();
    environment.extend(
        alias
            .environment
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    Ok(ExecutionContext {
        image: resolve_image(config, alias.image.as_deref(), image_override)?,
        entrypoint: alias.entrypoint.clone().or(config.entrypoint().clone()),
        script: Some(script),
        environment,
    })
}

fn resolve_image(
    config: &ScubaConfig,
    alias_image: Option<&str>,
    image_override: Option<&str>,
) -> Result<String> {
    match image_override.or(alias_image) {
        Some(image) => Ok(image.to_string()),
        None => config.image().map(str::to_string),
    }
}

/// Joins tokens into one POSIX shell line, quoting where needed.
fn shell_join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|token| shell_escape::unix::escape(Cow::Borrowed(token.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}
