//! Error types for descriptor construction and conversion.

use thiserror::Error;

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

/// Errors raised while building a descriptor or converting through it.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A conversion was handed no entity or no record.
    #[error("{0} must not be null")]
    NullArgument(&'static str),

    /// The entity type cannot be mapped (no key role, duplicate names, ...).
    #[error("invalid entity type {entity}: {reason}")]
    Argument { entity: &'static str, reason: String },

    /// A member's declared type has no column mapping.
    #[error("member {member} of {entity} has unsupported type {type_name}")]
    UnsupportedType {
        entity: &'static str,
        member: &'static str,
        type_name: &'static str,
    },

    /// A stored value cannot be converted into (or out of) a member.
    #[error("member {member}: {source}")]
    TypeMismatch {
        member: &'static str,
        #[source]
        source: tablemap_types::Error,
    },
}

impl MapperError {
    /// Returns true for errors only raised while building a descriptor.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(self, Self::Argument { .. } | Self::UnsupportedType { .. })
    }
}
