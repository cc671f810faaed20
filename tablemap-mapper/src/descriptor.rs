//! Entity type descriptors: classification and two-way conversion.
//!
//! A descriptor is built once per entity type. Construction walks the
//! type's members, binds at most one member to each [`KeyRole`], turns the
//! rest into [`PropertyHandle`]s and records every rename. After that the
//! descriptor is immutable and can convert any number of entities and
//! records, from any number of threads.

use crate::member::Member;
use crate::{
    DuplicateRolePolicy, MapperError, MapperOptions, MapperResult, ReadOnlyPolicy, RenameTable,
    TableEntity, ValueAccessor,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tablemap_types::{ETag, KeyRole, PropertyValue, TableRecord, ValueKind};
use tracing::{debug, trace, warn};

/// A member stored as a regular column.
pub struct PropertyHandle<T> {
    storage_name: String,
    accessor: ValueAccessor<T>,
}

impl<T> PropertyHandle<T> {
    /// Column name in the record.
    #[must_use]
    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    /// Declared member name.
    #[must_use]
    pub const fn declared_name(&self) -> &'static str {
        self.accessor.name()
    }

    #[must_use]
    pub const fn accessor(&self) -> &ValueAccessor<T> {
        &self.accessor
    }
}

impl<T> fmt::Debug for PropertyHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyHandle")
            .field("storage_name", &self.storage_name)
            .field("accessor", &self.accessor)
            .finish()
    }
}

/// The compiled mapping between `T` and [`TableRecord`].
pub struct EntityTypeDescriptor<T> {
    entity_name: &'static str,
    roles: [Option<ValueAccessor<T>>; 4],
    properties: Vec<PropertyHandle<T>>,
    by_storage_name: HashMap<String, usize>,
    renames: RenameTable,
}

const fn slot(role: KeyRole) -> usize {
    match role {
        KeyRole::PartitionKey => 0,
        KeyRole::RowKey => 1,
        KeyRole::Timestamp => 2,
        KeyRole::ETag => 3,
    }
}

/// Whether a member of `kind` can hold `role`.
const fn role_accepts(role: KeyRole, kind: ValueKind) -> bool {
    match role {
        KeyRole::PartitionKey | KeyRole::RowKey => kind.is_key_compatible(),
        KeyRole::Timestamp => matches!(kind, ValueKind::DateTime),
        KeyRole::ETag => matches!(kind, ValueKind::String),
    }
}

/// Runs the role matchers in classification order against one member.
fn match_role<T>(member: &Member<T>, conventions: bool) -> Result<Option<KeyRole>, String> {
    let mut matched = KeyRole::ALL
        .into_iter()
        .filter(|role| member.matches(*role, conventions));
    match (matched.next(), matched.next()) {
        (Some(first), Some(second)) => Err(format!(
            "member {} is marked as both {first} and {second}",
            member.name
        )),
        (first, _) => Ok(first),
    }
}

impl<T: TableEntity> EntityTypeDescriptor<T> {
    /// Builds the descriptor for `T` with default options.
    pub fn build() -> MapperResult<Self> {
        Self::build_with(&MapperOptions::default())
    }

    /// Builds the descriptor for `T`.
    ///
    /// Fails if a member has an unsupported type, a member is declared
    /// twice, storage names collide, neither partition key nor row key is
    /// bound, a key is bound to a nullable member, or a role is claimed twice
    /// under [`DuplicateRolePolicy::Reject`].
    pub fn build_with(options: &MapperOptions) -> MapperResult<Self> {
        let entity = T::entity_name();
        let invalid = |reason: String| MapperError::Argument { entity, reason };

        let mut declared = HashSet::new();
        let mut roles: [Option<ValueAccessor<T>>; 4] = [None, None, None, None];
        let mut role_renames = Vec::new();
        let mut properties = Vec::new();

        for member in T::members() {
            if !declared.insert(member.name) {
                return Err(invalid(format!(
                    "member {} is declared more than once",
                    member.name
                )));
            }
            if member.ignored {
                trace!("Ignoring member {} of {}", member.name, entity);
                continue;
            }

            let role = match_role(&member, options.conventions).map_err(&invalid)?;
            let Member {
                name,
                type_name,
                accessor,
                rename,
                ..
            } = member;
            let Some(accessor) = accessor else {
                return Err(MapperError::UnsupportedType {
                    entity,
                    member: name,
                    type_name,
                });
            };
            if !accessor.is_writable() && options.read_only == ReadOnlyPolicy::Reject {
                return Err(invalid(format!("member {name} has no setter")));
            }

            let Some(role) = role else {
                let storage_name = rename.unwrap_or_else(|| name.to_string());
                if let Some(reserved) = KeyRole::from_reserved_name(&storage_name) {
                    return Err(invalid(format!(
                        "member {name} uses the reserved column name {reserved}"
                    )));
                }
                properties.push(PropertyHandle {
                    storage_name,
                    accessor,
                });
                continue;
            };

            if rename.is_some() {
                return Err(invalid(format!(
                    "member {name} is bound to {role} and cannot be renamed"
                )));
            }
            if role.is_key() && accessor.is_nullable() {
                return Err(invalid(format!(
                    "member {name} is nullable and cannot hold {role}"
                )));
            }
            if !role_accepts(role, accessor.kind()) {
                return Err(invalid(format!(
                    "member {name} of kind {} cannot hold {role}",
                    accessor.kind()
                )));
            }
            if let Some(bound) = &roles[slot(role)] {
                match options.duplicate_roles {
                    DuplicateRolePolicy::Reject => {
                        return Err(invalid(format!(
                            "{role} is claimed by both {} and {name}",
                            bound.name()
                        )));
                    }
                    DuplicateRolePolicy::KeepFirst => {
                        warn!(
                            "{} already binds {} to {}, leaving {} unmapped",
                            entity,
                            role,
                            bound.name(),
                            name
                        );
                        continue;
                    }
                }
            }
            if name != role.reserved_name() {
                role_renames.push((role.reserved_name().to_string(), name));
            }
            roles[slot(role)] = Some(accessor);
        }

        if roles[slot(KeyRole::PartitionKey)].is_none() && roles[slot(KeyRole::RowKey)].is_none()
        {
            return Err(invalid(
                "no key role defined: bind a partition key or a row key".to_string(),
            ));
        }

        let mut by_storage_name = HashMap::with_capacity(properties.len());
        for (index, handle) in properties.iter().enumerate() {
            if by_storage_name
                .insert(handle.storage_name.clone(), index)
                .is_some()
            {
                return Err(invalid(format!(
                    "column {} is used by more than one member",
                    handle.storage_name
                )));
            }
        }

        let mut renames = RenameTable::default();
        let property_renames = properties
            .iter()
            .filter(|handle| handle.storage_name != handle.declared_name())
            .map(|handle| (handle.storage_name.clone(), handle.declared_name()));
        for (storage, declared) in role_renames.into_iter().chain(property_renames) {
            if !renames.insert(storage.clone(), declared) {
                return Err(invalid(format!("column {storage} is renamed twice")));
            }
        }

        let descriptor = Self {
            entity_name: entity,
            roles,
            properties,
            by_storage_name,
            renames,
        };
        debug!(
            "Built table descriptor for {} (roles: {:?}, {} properties, {} renames)",
            entity,
            descriptor.bound_roles().collect::<Vec<_>>(),
            descriptor.properties.len(),
            descriptor.renames.len()
        );
        Ok(descriptor)
    }

    /// Converts an entity into a fresh record.
    ///
    /// Fails with [`MapperError::NullArgument`] when `entity` is `None`.
    pub fn to_record(&self, entity: Option<&T>) -> MapperResult<TableRecord> {
        let entity = entity.ok_or(MapperError::NullArgument("entity"))?;
        self.record_for(entity)
    }

    /// Converts a record into a freshly constructed entity.
    ///
    /// Fails with [`MapperError::NullArgument`] when `record` is `None`.
    pub fn to_entity(&self, record: Option<&TableRecord>) -> MapperResult<T> {
        let record = record.ok_or(MapperError::NullArgument("record"))?;
        self.entity_from(record)
    }

    /// Converts an entity into a fresh record.
    ///
    /// Keys are rendered as strings; the timestamp and ETag are copied when
    /// bound and set, and stay unset otherwise. Empty nullable members produce no column. The first
    /// failing member aborts the conversion.
    pub fn record_for(&self, entity: &T) -> MapperResult<TableRecord> {
        let mut record = TableRecord::default();

        if let Some(accessor) = self.role(KeyRole::PartitionKey) {
            record.set_partition_key(accessor.read_key(entity)?);
        }
        if let Some(accessor) = self.role(KeyRole::RowKey) {
            record.set_row_key(accessor.read_key(entity)?);
        }
        if let Some(accessor) = self.role(KeyRole::Timestamp) {
            if let Some(value) = accessor.read(entity)? {
                let timestamp = value
                    .as_datetime()
                    .ok_or_else(|| role_mismatch(accessor, ValueKind::DateTime, &value))?;
                record.set_timestamp(timestamp);
            }
        }
        if let Some(accessor) = self.role(KeyRole::ETag) {
            if let Some(value) = accessor.read(entity)? {
                let tag = value
                    .as_str()
                    .ok_or_else(|| role_mismatch(accessor, ValueKind::String, &value))?;
                record.set_etag(ETag::new(tag));
            }
        }

        for handle in &self.properties {
            if let Some(value) = handle.accessor.read(entity)? {
                record.insert_property(handle.storage_name.clone(), value);
            }
        }
        Ok(record)
    }

    /// Converts a record into a freshly constructed entity.
    ///
    /// Columns without a matching property are ignored; properties without a
    /// column keep their default. A record without a timestamp or ETag leaves
    /// the bound member at its default. The first failing member aborts the
    /// conversion.
    pub fn entity_from(&self, record: &TableRecord) -> MapperResult<T> {
        let mut entity = T::default();

        if let Some(accessor) = self.role(KeyRole::PartitionKey) {
            accessor.write_key(&mut entity, record.partition_key())?;
        }
        if let Some(accessor) = self.role(KeyRole::RowKey) {
            accessor.write_key(&mut entity, record.row_key())?;
        }
        if let (Some(accessor), Some(at)) = (self.role(KeyRole::Timestamp), record.timestamp()) {
            accessor.write(&mut entity, &PropertyValue::DateTime(at))?;
        }
        if let (Some(accessor), Some(tag)) = (self.role(KeyRole::ETag), record.etag()) {
            accessor.write(&mut entity, &PropertyValue::String(tag.as_str().to_string()))?;
        }

        for (name, value) in record.properties() {
            match self.property(name) {
                Some(handle) => {
                    handle.accessor.write(&mut entity, value)?;
                }
                None => {
                    trace!("Ignoring column {} not mapped by {}", name, self.entity_name);
                }
            }
        }
        Ok(entity)
    }
}

fn role_mismatch<T>(
    accessor: &ValueAccessor<T>,
    expected: ValueKind,
    value: &PropertyValue,
) -> MapperError {
    MapperError::TypeMismatch {
        member: accessor.name(),
        source: tablemap_types::Error::TypeMismatch {
            expected,
            found: value.kind(),
        },
    }
}

impl<T> EntityTypeDescriptor<T> {
    #[must_use]
    pub const fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    /// The member bound to `role`, if any.
    #[must_use]
    pub const fn role(&self, role: KeyRole) -> Option<&ValueAccessor<T>> {
        self.roles[slot(role)].as_ref()
    }

    /// Roles with a bound member, in classification order.
    pub fn bound_roles(&self) -> impl Iterator<Item = KeyRole> + '_ {
        KeyRole::ALL
            .into_iter()
            .filter(|role| self.roles[slot(*role)].is_some())
    }

    /// Regular properties in discovery order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyHandle<T>] {
        &self.properties
    }

    /// The regular property stored under `storage_name`.
    #[must_use]
    pub fn property(&self, storage_name: &str) -> Option<&PropertyHandle<T>> {
        self.by_storage_name
            .get(storage_name)
            .map(|index| &self.properties[*index])
    }

    #[must_use]
    pub const fn rename_table(&self) -> &RenameTable {
        &self.renames
    }

    /// Resolves a declared member name to the name the store uses for it:
    /// the reserved name for key-role members, the column name otherwise.
    #[must_use]
    pub fn storage_name(&self, declared: &str) -> Option<&str> {
        let role = KeyRole::ALL.into_iter().find(|role| {
            self.role(*role)
                .is_some_and(|accessor| accessor.name() == declared)
        });
        if let Some(role) = role {
            return Some(role.reserved_name());
        }
        self.properties
            .iter()
            .find(|handle| handle.declared_name() == declared)
            .map(PropertyHandle::storage_name)
    }

    /// Translates declared member names into storage names, e.g. for a
    /// query projection.
    pub fn projection(&self, declared: &[&str]) -> MapperResult<Vec<String>> {
        declared
            .iter()
            .map(|name| {
                self.storage_name(name)
                    .map(str::to_string)
                    .ok_or_else(|| MapperError::Argument {
                        entity: self.entity_name,
                        reason: format!("member {name} is not mapped"),
                    })
            })
            .collect()
    }
}

impl<T> fmt::Debug for EntityTypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityTypeDescriptor")
            .field("entity_name", &self.entity_name)
            .field("roles", &self.roles)
            .field("properties", &self.properties)
            .field("renames", &self.renames)
            .finish()
    }
}
