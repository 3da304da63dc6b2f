//! Per-registration binding record.

use super::CapabilityKey;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single capability-to-implementation registration.
///
/// Duplicate registrations of the same pair are permitted, so individual
/// registrations need their own identity for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(Uuid);

impl BindingId {
    /// Creates a new random binding identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a binding identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for BindingId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for BindingId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagnostic description of one registration in the multi-binding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    id: BindingId,
    capability: String,
    implementation: String,
    registered_at: DateTime<Utc>,
}

impl BindingRecord {
    /// Creates a record for a registration happening now.
    #[must_use]
    pub fn new(capability: CapabilityKey, implementation: &str, clock: &impl Clock) -> Self {
        Self {
            id: BindingId::new(),
            capability: capability.name().to_owned(),
            implementation: implementation.to_owned(),
            registered_at: clock.utc(),
        }
    }

    /// Returns the registration identifier.
    #[must_use]
    pub const fn id(&self) -> BindingId {
        self.id
    }

    /// Returns the capability's type name.
    #[must_use]
    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Returns the implementation's type name.
    #[must_use]
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
