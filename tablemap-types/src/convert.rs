//! Conversions between Rust member types and [`PropertyValue`].
//!
//! Write-back is lenient only where no information is lost: `Int32` widens
//! into 64-bit and floating members, narrower integers accept any value that
//! fits, and GUID members accept their string form. Everything else is a
//! [`Error::TypeMismatch`].

use crate::{Error, PropertyValue, Result, ValueKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Rust type that can live in a table column.
pub trait TableValue: Sized {
    /// Declared kind reported for members of this type.
    const KIND: ValueKind;

    /// Whether the member may hold no value (an omitted column).
    const NULLABLE: bool = false;

    /// Boxes the current value. `None` means the column is omitted.
    fn to_value(&self) -> Option<PropertyValue>;

    /// Converts a stored value into this type.
    fn from_value(value: &PropertyValue) -> Result<Self>;

    /// Parses a partition or row key into this type.
    fn from_key(key: &str) -> Result<Self> {
        let value = PropertyValue::parse_key(Self::KIND, key)?;
        Self::from_value(&value)
    }
}

fn mismatch<T>(expected: ValueKind, value: &PropertyValue) -> Result<T> {
    Err(Error::TypeMismatch {
        expected,
        found: value.kind(),
    })
}

impl TableValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::String(self.clone()))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::String(s) => Ok(s.clone()),
            other => mismatch(Self::KIND, other),
        }
    }
}

impl TableValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Boolean(*self))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::Boolean(b) => Ok(*b),
            other => mismatch(Self::KIND, other),
        }
    }
}

impl TableValue for i64 {
    const KIND: ValueKind = ValueKind::Int64;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Int64(*self))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        value
            .as_i64()
            .map_or_else(|| mismatch(Self::KIND, value), Ok)
    }
}

/// Integer members narrower than `i64`: stored as `kind`, read back from any
/// integer value that fits.
macro_rules! narrow_int {
    ($($ty:ty => $kind:ident($stored:ty)),* $(,)?) => {
        $(
            impl TableValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn to_value(&self) -> Option<PropertyValue> {
                    Some(PropertyValue::$kind(<$stored>::from(*self)))
                }

                fn from_value(value: &PropertyValue) -> Result<Self> {
                    let Some(wide) = value.as_i64() else {
                        return mismatch(Self::KIND, value);
                    };
                    <$ty>::try_from(wide).map_err(|_| Error::OutOfRange {
                        target: stringify!($ty),
                        value: wide,
                    })
                }
            }
        )*
    };
}

narrow_int! {
    i8 => Int32(i32),
    i16 => Int32(i32),
    u8 => Int32(i32),
    u16 => Int32(i32),
    i32 => Int32(i32),
    u32 => Int64(i64),
}

impl TableValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Double(*self))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        value
            .as_f64()
            .map_or_else(|| mismatch(Self::KIND, value), Ok)
    }
}

impl TableValue for f32 {
    const KIND: ValueKind = ValueKind::Double;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Double(f64::from(*self)))
    }

    /// Rounds to the nearest `f32`. Finite doubles beyond the `f32` range are
    /// rejected rather than saturated to infinity.
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &PropertyValue) -> Result<Self> {
        let Some(wide) = value.as_f64() else {
            return mismatch(Self::KIND, value);
        };
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(Error::FloatOutOfRange {
                target: "f32",
                value: wide,
            });
        }
        Ok(narrow)
    }
}

impl TableValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::DateTime(*self))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        value
            .as_datetime()
            .map_or_else(|| mismatch(Self::KIND, value), Ok)
    }
}

impl TableValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Binary;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Binary(self.clone()))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::Binary(bytes) => Ok(bytes.clone()),
            other => mismatch(Self::KIND, other),
        }
    }
}

impl TableValue for Uuid {
    const KIND: ValueKind = ValueKind::Guid;

    fn to_value(&self) -> Option<PropertyValue> {
        Some(PropertyValue::Guid(*self))
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::Guid(id) => Ok(*id),
            PropertyValue::String(s) => Self::parse_str(s).map_err(|_| Error::Unparseable {
                expected: Self::KIND,
                text: s.clone(),
            }),
            other => mismatch(Self::KIND, other),
        }
    }
}

impl<T: TableValue> TableValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Option<PropertyValue> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: &PropertyValue) -> Result<Self> {
        T::from_value(value).map(Some)
    }

    fn from_key(key: &str) -> Result<Self> {
        T::from_key(key).map(Some)
    }
}

/// How an enum member is written into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumRepr {
    /// The variant name, as a `String` value.
    #[default]
    Name,
    /// The variant number, as an `Int32` value.
    Number,
}

/// A fieldless enum that can be stored as its variant name or number.
///
/// Reading back accepts either form regardless of [`TableEnum::REPR`].
pub trait TableEnum: Sized + Copy + PartialEq + 'static {
    /// Every variant with its stored name and number.
    const VARIANTS: &'static [(Self, &'static str, i32)];

    /// Form used when writing to a record.
    const REPR: EnumRepr = EnumRepr::Name;

    /// Name used in error messages.
    fn enum_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Boxes the variant in its stored form.
    fn to_enum_value(self) -> Result<PropertyValue> {
        let (_, name, number) = Self::VARIANTS
            .iter()
            .find(|(variant, ..)| *variant == self)
            .ok_or_else(|| Error::UnknownVariant {
                enum_name: Self::enum_name(),
                value: "<undeclared variant>".to_string(),
            })?;
        Ok(match Self::REPR {
            EnumRepr::Name => PropertyValue::String((*name).to_string()),
            EnumRepr::Number => PropertyValue::Int32(*number),
        })
    }

    /// Resolves a stored name or number to a variant.
    fn from_enum_value(value: &PropertyValue) -> Result<Self> {
        let found = match value {
            PropertyValue::String(s) => Self::VARIANTS.iter().find(|(_, name, _)| *name == s.as_str()),
            PropertyValue::Int32(_) | PropertyValue::Int64(_) => {
                let wanted = value.as_i64();
                Self::VARIANTS
                    .iter()
                    .find(|(.., number)| Some(i64::from(*number)) == wanted)
            }
            other => return mismatch(ValueKind::Enum, other),
        };
        found
            .map(|(variant, ..)| *variant)
            .ok_or_else(|| Error::UnknownVariant {
                enum_name: Self::enum_name(),
                value: value.to_string(),
            })
    }

    /// Parses a partition or row key holding a name or a number.
    fn from_enum_key(key: &str) -> Result<Self> {
        match key.parse::<i64>() {
            Ok(number) => Self::from_enum_value(&PropertyValue::Int64(number)),
            Err(_) => Self::from_enum_value(&PropertyValue::String(key.to_string())),
        }
    }
}
