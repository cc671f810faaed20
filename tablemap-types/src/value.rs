//! Scalar values carried in the columns of a table record.
//!
//! [`PropertyValue`] is a closed union over the kinds a table column can hold.
//! [`ValueKind`] names those kinds without a payload and is what member
//! metadata reports as the "declared type" of a field.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The declared kind of a mapped member or the kind of a stored value.
///
/// `Enum` only appears as a declared kind: enum members are stored as
/// either `Int32` or `String` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Boolean,
    Int32,
    Int64,
    Double,
    DateTime,
    Binary,
    Guid,
    Enum,
}

impl ValueKind {
    /// Lowercase name used in error messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::DateTime => "datetime",
            Self::Binary => "binary",
            Self::Guid => "guid",
            Self::Enum => "enum",
        }
    }

    /// Whether a member of this kind can hold a partition or row key.
    #[must_use]
    pub const fn is_key_compatible(self) -> bool {
        matches!(
            self,
            Self::String | Self::Int32 | Self::Int64 | Self::Guid | Self::Enum
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    String(String),
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    DateTime(DateTime<Utc>),
    Binary(Vec<u8>),
    Guid(Uuid),
}

impl PropertyValue {
    /// Returns the kind of the stored value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Double(_) => ValueKind::Double,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Binary(_) => ValueKind::Binary,
            Self::Guid(_) => ValueKind::Guid,
        }
    }

    /// Returns the text of a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag of a `Boolean` value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, widening `Int32`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, widening `Int32`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the instant of a `DateTime` value.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the bytes of a `Binary` value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the UUID of a `Guid` value.
    #[must_use]
    pub const fn as_guid(&self) -> Option<Uuid> {
        match self {
            Self::Guid(id) => Some(*id),
            _ => None,
        }
    }

    /// Renders the value the way partition and row keys store it.
    ///
    /// Strings pass through, integers use decimal notation and GUIDs the
    /// lowercase hyphenated form. Other kinds cannot be keys.
    pub fn to_key_string(&self) -> Result<String> {
        match self {
            Self::String(s) => Ok(s.clone()),
            Self::Int32(v) => Ok(v.to_string()),
            Self::Int64(v) => Ok(v.to_string()),
            Self::Guid(id) => Ok(id.hyphenated().to_string()),
            other => Err(Error::TypeMismatch {
                expected: ValueKind::String,
                found: other.kind(),
            }),
        }
    }

    /// Parses a stored key back into a value of the requested kind.
    ///
    /// `Enum` keys come back as strings; the enum member resolves the name
    /// or number itself.
    pub fn parse_key(kind: ValueKind, key: &str) -> Result<Self> {
        let unparseable = || Error::Unparseable {
            expected: kind,
            text: key.to_string(),
        };
        match kind {
            ValueKind::String | ValueKind::Enum => Ok(Self::String(key.to_string())),
            ValueKind::Int32 => key.parse().map(Self::Int32).map_err(|_| unparseable()),
            ValueKind::Int64 => key.parse().map(Self::Int64).map_err(|_| unparseable()),
            ValueKind::Guid => Uuid::parse_str(key)
                .map(Self::Guid)
                .map_err(|_| unparseable()),
            other => Err(Error::TypeMismatch {
                expected: other,
                found: ValueKind::String,
            }),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}L"),
            Self::Double(v) => write!(f, "{v}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Self::Guid(id) => write!(f, "{id}"),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

impl From<Uuid> for PropertyValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}
