//! Instantiation scope forwarded to the single-binding resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested instantiation scope for resolved implementations.
///
/// The scope is passed through unchanged to every per-entry construction
/// call; the resolver owns its meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionScope {
    /// Reuse the resolver's process-wide shared instance, constructing it
    /// on first use.
    #[default]
    Shared,
    /// Construct a fresh instance for this request.
    Transient,
}

impl ResolutionScope {
    /// Returns the canonical string form of the scope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
