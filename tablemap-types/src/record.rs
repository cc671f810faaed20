//! The generic table record and its distinguished key-role fields.
//!
//! A record carries four structural fields (partition key, row key,
//! timestamp, ETag) that live outside the column map, plus any number of
//! named columns holding [`PropertyValue`]s.

use crate::{ETag, PropertyValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four reserved structural fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyRole {
    PartitionKey,
    RowKey,
    Timestamp,
    ETag,
}

impl KeyRole {
    /// All roles in classification order.
    pub const ALL: [Self; 4] = [Self::PartitionKey, Self::RowKey, Self::Timestamp, Self::ETag];

    /// The column name the store reserves for this role.
    #[must_use]
    pub const fn reserved_name(self) -> &'static str {
        match self {
            Self::PartitionKey => "PartitionKey",
            Self::RowKey => "RowKey",
            Self::Timestamp => "Timestamp",
            Self::ETag => "ETag",
        }
    }

    /// Looks up the role owning a reserved column name.
    #[must_use]
    pub fn from_reserved_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.reserved_name() == name)
    }

    /// Returns true for the partition and row key.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::PartitionKey | Self::RowKey)
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reserved_name())
    }
}

/// A loosely-typed table record.
///
/// A fresh record has empty keys, no timestamp, no ETag and no columns.
/// The store assigns the timestamp and ETag; until then they are unset,
/// which is distinct from any value they can hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    partition_key: String,
    row_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    etag: Option<ETag>,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValue>,
}

impl TableRecord {
    /// Creates a record with the given keys and no columns.
    #[must_use]
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn set_partition_key(&mut self, key: impl Into<String>) {
        self.partition_key = key.into();
    }

    #[must_use]
    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    pub fn set_row_key(&mut self, key: impl Into<String>) {
        self.row_key = key.into();
    }

    /// The last-modified time, if the record carries one.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = Some(timestamp);
    }

    pub fn clear_timestamp(&mut self) {
        self.timestamp = None;
    }

    /// The concurrency tag, if the record carries one. An empty tag is still
    /// a tag.
    #[must_use]
    pub const fn etag(&self) -> Option<&ETag> {
        self.etag.as_ref()
    }

    pub fn set_etag(&mut self, etag: ETag) {
        self.etag = Some(etag);
    }

    pub fn clear_etag(&mut self) {
        self.etag = None;
    }

    /// Returns the column with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Sets a column, returning the previous value if there was one.
    pub fn insert_property(
        &mut self,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        self.properties.insert(name.into(), value)
    }

    /// Builder form of [`insert_property`](Self::insert_property).
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    /// Iterates the columns in name order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
