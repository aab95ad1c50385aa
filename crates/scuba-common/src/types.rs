//! Domain primitives shared by the configuration and its consumers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Resolved environment: variable name to value.
pub type Environment = BTreeMap<String, String>;

/// Container entrypoint as declared in the configuration.
///
/// `Unset` defers to whatever the image or runtime defaults to, while
/// `Explicit("")` forces no entrypoint at all. The two must stay distinct
/// through alias overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Entrypoint {
    /// No `entrypoint` key was present.
    #[default]
    Unset,
    /// The key was present; a null value is recorded as an empty string.
    Explicit(String),
}

impl Entrypoint {
    /// Creates an explicit entrypoint.
    #[must_use]
    pub fn explicit(value: impl Into<String>) -> Self {
        Self::Explicit(value.into())
    }

    /// Returns the explicit value, if any.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Explicit(value) => Some(value),
        }
    }

    /// Returns `true` unless the entrypoint is [`Entrypoint::Unset`].
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Returns `self` if set, otherwise `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        match self {
            Self::Unset => fallback,
            explicit @ Self::Explicit(_) => explicit,
        }
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "(unset)"),
            Self::Explicit(value) if value.is_empty() => write!(f, "(none)"),
            Self::Explicit(value) => write!(f, "{value}"),
        }
    }
}
