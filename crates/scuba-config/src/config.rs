//! Typed configuration produced by the schema assembler.

use std::collections::BTreeMap;

use scuba_common::error::{ConfigError, Result};
use scuba_common::types::{Entrypoint, Environment};

/// A named command shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDefinition {
    /// Command lines, in order. Never empty.
    pub script: Vec<String>,
    /// Image to use instead of the top-level one.
    pub image: Option<String>,
    /// Entrypoint override; `Unset` inherits the top-level entrypoint.
    pub entrypoint: Entrypoint,
    /// Variables merged over the top-level environment.
    pub environment: Environment,
}

impl AliasDefinition {
    /// Creates an alias running `script` with no overrides.
    #[must_use]
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            image: None,
            entrypoint: Entrypoint::Unset,
            environment: Environment::new(),
        }
    }

    /// Overrides the image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Overrides the entrypoint.
    #[must_use]
    pub fn with_entrypoint(mut self, entrypoint: Entrypoint) -> Self {
        self.entrypoint = entrypoint;
        self
    }

    /// Adds an environment variable.
    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.environment.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if the alias expands to more than one command line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.script.len() > 1
    }
}

/// A fully assembled `.scuba.yml`.
///
/// Read-only once built. The image is validated lazily: a configuration
/// without one is valid until [`ScubaConfig::image`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScubaConfig {
    image: Option<String>,
    entrypoint: Entrypoint,
    aliases: BTreeMap<String, AliasDefinition>,
    hooks: BTreeMap<String, Vec<String>>,
    environment: Environment,
}

impl ScubaConfig {
    /// Creates a configuration with the given image and nothing else.
    #[must_use]
    pub fn new(image: Option<String>) -> Self {
        Self {
            image,
            ..Self::default()
        }
    }

    /// Sets the top-level entrypoint.
    #[must_use]
    pub fn with_entrypoint(mut self, entrypoint: Entrypoint) -> Self {
        self.entrypoint = entrypoint;
        self
    }

    /// Adds (or replaces) an alias.
    #[must_use]
    pub fn with_alias(mut self, name: impl Into<String>, alias: AliasDefinition) -> Self {
        let _ = self.aliases.insert(name.into(), alias);
        self
    }

    /// Adds (or replaces) a hook.
    #[must_use]
    pub fn with_hook(mut self, name: impl Into<String>, script: Vec<String>) -> Self {
        let _ = self.hooks.insert(name.into(), script);
        self
    }

    /// Replaces the top-level environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// The configured image.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ImageNotConfigured`] if no image was set.
    pub fn image(&self) -> Result<&str> {
        self.image.as_deref().ok_or(ConfigError::ImageNotConfigured)
    }

    /// The top-level entrypoint.
    #[must_use]
    pub const fn entrypoint(&self) -> &Entrypoint {
        &self.entrypoint
    }

    /// All aliases, by name.
    #[must_use]
    pub const fn aliases(&self) -> &BTreeMap<String, AliasDefinition> {
        &self.aliases
    }

    /// Looks up an alias by name.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&AliasDefinition> {
        self.aliases.get(name)
    }

    /// All hooks, by name.
    #[must_use]
    pub const fn hooks(&self) -> &BTreeMap<String, Vec<String>> {
        &self.hooks
    }

    /// Script lines for the named hook, if defined.
    #[must_use]
    pub fn hook(&self, name: &str) -> Option<&[String]> {
        self.hooks.get(name).map(Vec::as_slice)
    }

    /// The resolved top-level environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }
}
