//! Typed entity to table record mapping.
//!
//! Bridges application structs and the loosely-typed records a table store
//! speaks:
//! - [`TableEntity`] / [`Member`] — how a type lists its members and marks
//!   key roles, renames and ignored members
//! - [`ValueAccessor`] — get/set access to one member as a [`PropertyValue`]
//! - [`EntityTypeDescriptor`] — the per-type classification, built once,
//!   with [`to_record`](EntityTypeDescriptor::to_record) and
//!   [`to_entity`](EntityTypeDescriptor::to_entity)
//! - [`RenameTable`] — storage name to declared name, for collaborators
//!   translating filters or projections
//! - [`MapperOptions`] — duplicate-role and read-only policies
//!
//! Descriptors are not cached here. A caller that maps the same type
//! repeatedly should build the descriptor once and keep it.

mod accessor;
mod descriptor;
mod error;
mod member;
mod options;
mod rename;

pub use accessor::ValueAccessor;
pub use descriptor::{EntityTypeDescriptor, PropertyHandle};
pub use error::{MapperError, MapperResult};
pub use member::{Member, TableEntity};
pub use options::{DuplicateRolePolicy, MapperOptions, ReadOnlyPolicy};
pub use rename::RenameTable;

pub use tablemap_types::{
    ETag, EnumRepr, KeyRole, PropertyValue, TableEnum, TableRecord, TableValue, ValueKind,
};
