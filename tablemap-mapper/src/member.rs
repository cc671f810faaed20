//! Member declarations: what an entity type exposes to the mapper.
//!
//! Rust has no runtime reflection, so a type lists its members explicitly
//! through [`TableEntity::members`]. Each [`Member`] carries an accessor plus
//! the markers the classifier looks at: key-role markers, a storage rename,
//! or an ignore flag.

use crate::ValueAccessor;
use tablemap_types::{KeyRole, TableEnum, TableValue};

/// An entity type that can be mapped to and from table records.
///
/// `Default` supplies the fresh instance that record-to-entity conversion
/// writes into; members missing from a record keep their default value.
///
/// # Example
///
/// ```
/// use tablemap_mapper::{Member, TableEntity};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     category: String,
///     id: String,
///     name: String,
///     age: i32,
/// }
///
/// impl TableEntity for Person {
///     fn members() -> Vec<Member<Self>> {
///         vec![
///             Member::field("Category", |p: &Person| &p.category, |p: &mut Person| &mut p.category)
///                 .partition_key(),
///             Member::field("Id", |p: &Person| &p.id, |p: &mut Person| &mut p.id).row_key(),
///             Member::field("Name", |p: &Person| &p.name, |p: &mut Person| &mut p.name),
///             Member::field("Age", |p: &Person| &p.age, |p: &mut Person| &mut p.age),
///         ]
///     }
/// }
/// ```
pub trait TableEntity: Default + Sized + 'static {
    /// All public members in declaration order.
    fn members() -> Vec<Member<Self>>;

    /// Name used in errors and logs.
    fn entity_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// One discovered member of an entity type and its markers.
pub struct Member<T> {
    pub(crate) name: &'static str,
    pub(crate) type_name: &'static str,
    pub(crate) accessor: Option<ValueAccessor<T>>,
    pub(crate) roles: Vec<KeyRole>,
    pub(crate) rename: Option<String>,
    pub(crate) ignored: bool,
}

impl<T: 'static> Member<T> {
    fn with_accessor(name: &'static str, accessor: ValueAccessor<T>) -> Self {
        Self {
            name,
            type_name: accessor.type_name(),
            accessor: Some(accessor),
            roles: Vec::new(),
            rename: None,
            ignored: false,
        }
    }

    /// A read/write field of a supported scalar type.
    pub fn field<V, G, M>(name: &'static str, get: G, get_mut: M) -> Self
    where
        V: TableValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        Self::with_accessor(name, ValueAccessor::field(name, get, get_mut))
    }

    /// A computed member with a getter only.
    pub fn read_only<V, G>(name: &'static str, get: G) -> Self
    where
        V: TableValue + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self::with_accessor(name, ValueAccessor::read_only(name, get))
    }

    /// A fieldless enum stored by name or number.
    pub fn enumeration<E, G, M>(name: &'static str, get: G, get_mut: M) -> Self
    where
        E: TableEnum + 'static,
        G: Fn(&T) -> &E + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut E + Send + Sync + 'static,
    {
        Self::with_accessor(name, ValueAccessor::enumeration(name, get, get_mut))
    }

    /// A member whose type has no column mapping.
    ///
    /// Building a descriptor fails on it unless it is also [`ignore`]d.
    ///
    /// [`ignore`]: Member::ignore
    #[must_use]
    pub fn unsupported(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            type_name,
            accessor: None,
            roles: Vec::new(),
            rename: None,
            ignored: false,
        }
    }
}

impl<T> Member<T> {
    fn marked(mut self, role: KeyRole) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Marks the member as the partition key.
    #[must_use]
    pub fn partition_key(self) -> Self {
        self.marked(KeyRole::PartitionKey)
    }

    /// Marks the member as the row key.
    #[must_use]
    pub fn row_key(self) -> Self {
        self.marked(KeyRole::RowKey)
    }

    /// Marks the member as the record timestamp.
    #[must_use]
    pub fn timestamp(self) -> Self {
        self.marked(KeyRole::Timestamp)
    }

    /// Marks the member as the concurrency tag.
    #[must_use]
    pub fn etag(self) -> Self {
        self.marked(KeyRole::ETag)
    }

    /// Stores the member under a different column name.
    #[must_use]
    pub fn rename(mut self, storage_name: impl Into<String>) -> Self {
        self.rename = Some(storage_name.into());
        self
    }

    /// Excludes the member from mapping.
    #[must_use]
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Explicit role markers, in the order they were added.
    #[must_use]
    pub fn roles(&self) -> &[KeyRole] {
        &self.roles
    }

    #[must_use]
    pub fn storage_override(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.accessor.is_some()
    }

    /// Whether this member is recognised as `role`.
    ///
    /// With `conventions` on, an unmarked member whose name is the role's
    /// reserved name also matches.
    #[must_use]
    pub fn matches(&self, role: KeyRole, conventions: bool) -> bool {
        if self.roles.contains(&role) {
            return true;
        }
        conventions && self.roles.is_empty() && self.name == role.reserved_name()
    }
}
