//! Core type definitions for tablemap.
//!
//! This crate defines the storage-side vocabulary the mapper translates into:
//! - [`TableRecord`] with its four distinguished [`KeyRole`] fields
//! - [`PropertyValue`], the closed union of column scalar kinds
//! - [`TableValue`] and [`TableEnum`], conversions between Rust member types
//!   and column values
//!
//! Nothing here knows about entity types; classification lives in
//! `tablemap-mapper`.

mod convert;
mod etag;
mod record;
mod value;

pub use convert::{EnumRepr, TableEnum, TableValue};
pub use etag::ETag;
pub use record::{KeyRole, TableRecord};
pub use value::{PropertyValue, ValueKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors converting between column values and Rust types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cannot convert {found} value into {expected}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: i64 },

    #[error("value {value} is out of range for {target}")]
    FloatOutOfRange { target: &'static str, value: f64 },

    #[error("cannot parse {text:?} as {expected}")]
    Unparseable { expected: ValueKind, text: String },

    #[error("{value} is not a variant of {enum_name}")]
    UnknownVariant { enum_name: &'static str, value: String },
}
