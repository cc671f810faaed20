//! Construction policies for entity type descriptors.

use serde::{Deserialize, Serialize};

/// What happens when a second member claims an already bound key role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRolePolicy {
    /// Fail construction with an argument error.
    #[default]
    Reject,
    /// Keep the first member and leave the later one unmapped.
    KeepFirst,
}

/// How members without a setter are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOnlyPolicy {
    /// Map them into records; skip them when reading records back.
    #[default]
    Skip,
    /// Fail construction with an argument error.
    Reject,
}

/// Options for [`EntityTypeDescriptor::build_with`](crate::EntityTypeDescriptor::build_with).
///
/// Deserializable so a host can embed it in its own configuration file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    pub duplicate_roles: DuplicateRolePolicy,
    pub read_only: ReadOnlyPolicy,
    /// Match unmarked members named `PartitionKey`, `RowKey`, `Timestamp`
    /// or `ETag` to their role.
    pub conventions: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            duplicate_roles: DuplicateRolePolicy::Reject,
            read_only: ReadOnlyPolicy::Skip,
            conventions: true,
        }
    }
}

impl MapperOptions {
    #[must_use]
    pub const fn with_duplicate_roles(mut self, policy: DuplicateRolePolicy) -> Self {
        self.duplicate_roles = policy;
        self
    }

    #[must_use]
    pub const fn with_read_only(mut self, policy: ReadOnlyPolicy) -> Self {
        self.read_only = policy;
        self
    }

    #[must_use]
    pub const fn with_conventions(mut self, enabled: bool) -> Self {
        self.conventions = enabled;
        self
    }
}
