//! Static value-type tags.
//!
//! Every column and expression carries the Rust type of the value it
//! produces. [`SqlType`] maps that type to a [`ValueType`] tag and a
//! nullability flag so that schemas can be inspected at runtime while
//! composition is still checked by the compiler.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// The value type of a column or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 32-bit integer (`INT`).
    Integer,
    /// 16-bit integer (`SMALLINT`).
    Short,
    /// Single character (`CHAR(1)`).
    Char,
    /// Single precision float (`FLOAT`).
    Float,
    /// Double precision float (`DOUBLE`).
    Double,
    /// 64-bit integer (`BIGINT`).
    Long,
    /// Calendar timestamp (`DATETIME`).
    DateTime,
    /// Boolean (`BOOLEAN`).
    Boolean,
    /// Opaque byte blob (`BLOB`).
    Blob,
    /// Text (`TEXT`).
    Text,
    /// Raw binary buffer (`VARBINARY`).
    Binary,
    /// Enumerated type, tagged with the Rust enum name.
    Enum(&'static str),
}

impl ValueType {
    /// Returns the MySQL type name for this tag.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            Self::Integer => "INT",
            Self::Short => "SMALLINT",
            Self::Char => "CHAR(1)",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Long => "BIGINT",
            Self::DateTime => "DATETIME",
            Self::Boolean => "BOOLEAN",
            Self::Blob => "BLOB",
            Self::Text => "TEXT",
            Self::Binary => "VARBINARY",
            Self::Enum(_) => "ENUM",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(name) => write!(f, "ENUM<{name}>"),
            other => f.write_str(other.sql_name()),
        }
    }
}

/// A Rust type that can be stored in a column.
pub trait SqlType: 'static {
    /// The type tag.
    const VALUE_TYPE: ValueType;

    /// Whether values of this type may be NULL.
    const NULLABLE: bool = false;
}

/// Marker for types that support arithmetic operators.
pub trait Numeric: SqlType {}

macro_rules! impl_sql_type {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl SqlType for $ty {
                const VALUE_TYPE: ValueType = ValueType::$tag;
            }
        )+
    };
}

impl_sql_type!(
    i32 => Integer,
    i16 => Short,
    char => Char,
    f32 => Float,
    f64 => Double,
    i64 => Long,
    DateTime<Utc> => DateTime,
    bool => Boolean,
    Vec<u8> => Blob,
    String => Text,
    Bytes => Binary,
);

impl<T: SqlType> SqlType for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
    const NULLABLE: bool = true;
}

impl Numeric for i16 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for f32 {}
impl Numeric for f64 {}
impl<T: Numeric> Numeric for Option<T> {}

/// A Rust enum stored in a MySQL `ENUM` column.
///
/// Implement it with [`sql_enum!`](crate::sql_enum), which also provides
/// the [`SqlType`] and [`ToSqlValue`](crate::ToSqlValue) impls.
pub trait SqlEnum: SqlType + Copy {
    /// The enum's type name.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Returns the label stored in the database.
    fn as_str(&self) -> &'static str;

    /// Looks up a variant by its database label.
    fn from_label(label: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == label)
    }
}

/// Declares an enum usable as a column type.
///
/// ```rust
/// use sqlform_core::{sql_enum, SqlEnum, SqlType, ValueType};
///
/// sql_enum! {
///     pub enum Role {
///         Admin = "admin",
///         Member = "member",
///     }
/// }
///
/// assert_eq!(Role::Admin.as_str(), "admin");
/// assert_eq!(Role::from_label("member"), Some(Role::Member));
/// assert_eq!(Role::VALUE_TYPE, ValueType::Enum("Role"));
/// ```
#[macro_export]
macro_rules! sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::SqlType for $name {
            const VALUE_TYPE: $crate::ValueType = $crate::ValueType::Enum(stringify!($name));
        }

        impl $crate::SqlEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl $crate::ToSqlValue for $name {
            fn to_sql_value(self) -> $crate::SqlValue {
                $crate::SqlValue::Text(String::from($crate::SqlEnum::as_str(&self)))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SqlValue, ToSqlValue};

    sql_enum! {
        enum Status {
            Active = "active",
            Banned = "banned",
        }
    }

    #[test]
    fn test_primitive_tags() {
        assert_eq!(i32::VALUE_TYPE, ValueType::Integer);
        assert_eq!(i64::VALUE_TYPE, ValueType::Long);
        assert_eq!(Bytes::VALUE_TYPE, ValueType::Binary);
        assert_eq!(<Vec<u8>>::VALUE_TYPE, ValueType::Blob);
        const { assert!(!String::NULLABLE) };
    }

    #[test]
    fn test_option_keeps_tag_and_is_nullable() {
        assert_eq!(<Option<String>>::VALUE_TYPE, ValueType::Text);
        const { assert!(<Option<String>>::NULLABLE) };
    }

    #[test]
    fn test_sql_enum_macro() {
        assert_eq!(Status::VALUE_TYPE, ValueType::Enum("Status"));
        assert_eq!(Status::VARIANTS, &[Status::Active, Status::Banned]);
        assert_eq!(Status::from_label("banned"), Some(Status::Banned));
        assert_eq!(Status::from_label("gone"), None);
        assert_eq!(
            Status::Active.to_sql_value(),
            SqlValue::Text(String::from("active"))
        );
    }

    #[test]
    fn test_value_type_display() {
        assert_eq!(ValueType::Long.to_string(), "BIGINT");
        assert_eq!(ValueType::Enum("Status").to_string(), "ENUM<Status>");
    }
}
