//! Uniform get/set access to one member of an entity type.

use crate::{MapperError, MapperResult};
use std::fmt;
use std::sync::Arc;
use tablemap_types::{PropertyValue, TableEnum, TableValue, ValueKind};

type Getter<T> = Box<dyn Fn(&T) -> tablemap_types::Result<Option<PropertyValue>> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &PropertyValue) -> tablemap_types::Result<()> + Send + Sync>;
type KeySetter<T> = Box<dyn Fn(&mut T, &str) -> tablemap_types::Result<()> + Send + Sync>;
type ConvertResult<V> = tablemap_types::Result<V>;

/// Reads and writes one member of `T` as [`PropertyValue`]s.
///
/// The accessor knows the member's declared name and kind but nothing about
/// key roles or column names; the descriptor decides where a value goes.
pub struct ValueAccessor<T> {
    name: &'static str,
    kind: ValueKind,
    nullable: bool,
    type_name: &'static str,
    getter: Getter<T>,
    setter: Option<Setter<T>>,
    key_setter: Option<KeySetter<T>>,
}

impl<T: 'static> ValueAccessor<T> {
    pub(crate) fn field<V, G, M>(name: &'static str, get: G, get_mut: M) -> Self
    where
        V: TableValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let get_mut = Arc::new(get_mut);
        let key_mut = Arc::clone(&get_mut);
        Self {
            name,
            kind: V::KIND,
            nullable: V::NULLABLE,
            type_name: std::any::type_name::<V>(),
            getter: Box::new(move |entity: &T| -> ConvertResult<Option<PropertyValue>> {
                Ok(get(entity).to_value())
            }),
            setter: Some(Box::new(move |entity: &mut T, value: &PropertyValue| -> ConvertResult<()> {
                *(*get_mut)(entity) = V::from_value(value)?;
                Ok(())
            })),
            key_setter: Some(Box::new(move |entity: &mut T, key: &str| -> ConvertResult<()> {
                *(*key_mut)(entity) = V::from_key(key)?;
                Ok(())
            })),
        }
    }

    pub(crate) fn read_only<V, G>(name: &'static str, get: G) -> Self
    where
        V: TableValue + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name,
            kind: V::KIND,
            nullable: V::NULLABLE,
            type_name: std::any::type_name::<V>(),
            getter: Box::new(move |entity: &T| -> ConvertResult<Option<PropertyValue>> {
                Ok(get(entity).to_value())
            }),
            setter: None,
            key_setter: None,
        }
    }

    pub(crate) fn enumeration<E, G, M>(name: &'static str, get: G, get_mut: M) -> Self
    where
        E: TableEnum + 'static,
        G: Fn(&T) -> &E + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut E + Send + Sync + 'static,
    {
        let get_mut = Arc::new(get_mut);
        let key_mut = Arc::clone(&get_mut);
        Self {
            name,
            kind: ValueKind::Enum,
            nullable: false,
            type_name: E::enum_name(),
            getter: Box::new(move |entity: &T| -> ConvertResult<Option<PropertyValue>> {
                get(entity).to_enum_value().map(Some)
            }),
            setter: Some(Box::new(move |entity: &mut T, value: &PropertyValue| -> ConvertResult<()> {
                *(*get_mut)(entity) = E::from_enum_value(value)?;
                Ok(())
            })),
            key_setter: Some(Box::new(move |entity: &mut T, key: &str| -> ConvertResult<()> {
                *(*key_mut)(entity) = E::from_enum_key(key)?;
                Ok(())
            })),
        }
    }
}

impl<T> ValueAccessor<T> {
    /// Declared member name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind of the member.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the member can hold no value.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Rust type name of the member.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// False for computed members that only have a getter.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the member's current value. `None` for an empty nullable member.
    pub fn read(&self, entity: &T) -> MapperResult<Option<PropertyValue>> {
        (self.getter)(entity).map_err(|source| self.mismatch(source))
    }

    /// Converts `value` and assigns it to the member.
    ///
    /// Returns `Ok(false)` without touching the entity when the member is
    /// read-only.
    pub fn write(&self, entity: &mut T, value: &PropertyValue) -> MapperResult<bool> {
        let Some(setter) = &self.setter else {
            return Ok(false);
        };
        setter(entity, value).map_err(|source| self.mismatch(source))?;
        Ok(true)
    }

    /// Reads the member rendered as a partition or row key.
    ///
    /// An empty nullable member yields an empty key.
    pub fn read_key(&self, entity: &T) -> MapperResult<String> {
        match self.read(entity)? {
            Some(value) => value.to_key_string().map_err(|source| self.mismatch(source)),
            None => Ok(String::new()),
        }
    }

    /// Parses a partition or row key and assigns it to the member.
    pub fn write_key(&self, entity: &mut T, key: &str) -> MapperResult<bool> {
        let Some(setter) = &self.key_setter else {
            return Ok(false);
        };
        setter(entity, key).map_err(|source| self.mismatch(source))?;
        Ok(true)
    }

    fn mismatch(&self, source: tablemap_types::Error) -> MapperError {
        MapperError::TypeMismatch {
            member: self.name,
            source,
        }
    }
}

impl<T> fmt::Debug for ValueAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("type_name", &self.type_name)
            .field("writable", &self.is_writable())
            .finish()
    }
}
