//! Target type descriptors used by runtime conversions and member registries.

use std::fmt::Display;

/// Identifies a conversion target or the declared type of a registered member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    String,
    Bytes,
    Guid,
    DateTime,
    TimeSpan,
    /// Accepts any value; used for members declared as dynamic values.
    Any,
    /// Nullable wrapper: "a value of the inner type, or absent".
    Optional(Box<TypeTag>),
}

impl TypeTag {
    pub fn optional(inner: TypeTag) -> Self {
        TypeTag::Optional(Box::new(inner))
    }

    /// Returns true if the tag is an optional wrapper around a value type.
    ///
    /// `Optional(String)` is not nullable in this sense: strings already admit
    /// absence, so the wrapper adds nothing.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeTag::Optional(inner) => inner.is_value_type(),
            _ => false,
        }
    }

    /// Whether an absent value is a legal instance of this type.
    pub fn permits_null(&self) -> bool {
        matches!(self, TypeTag::Optional(_) | TypeTag::String | TypeTag::Bytes | TypeTag::Any)
    }

    pub fn is_value_type(&self) -> bool {
        !matches!(
            self,
            TypeTag::String | TypeTag::Bytes | TypeTag::Any | TypeTag::Optional(_)
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeTag::I8
                | TypeTag::I16
                | TypeTag::I32
                | TypeTag::I64
                | TypeTag::U8
                | TypeTag::U16
                | TypeTag::U32
                | TypeTag::U64
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, TypeTag::F32 | TypeTag::F64 | TypeTag::Decimal)
    }

    /// The underlying type of an optional wrapper, or the tag itself.
    pub fn underlying(&self) -> &TypeTag {
        match self {
            TypeTag::Optional(inner) => inner.underlying(),
            other => other,
        }
    }

    /// Parses the short names accepted on the command line (`i32`, `guid`, `i32?`).
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(inner) = name.strip_suffix('?') {
            return Self::from_name(inner).map(TypeTag::optional);
        }
        let tag = match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => TypeTag::Bool,
            "i8" | "sbyte" => TypeTag::I8,
            "i16" | "short" | "int16" => TypeTag::I16,
            "i32" | "int" | "int32" => TypeTag::I32,
            "i64" | "long" | "int64" => TypeTag::I64,
            "u8" | "byte" => TypeTag::U8,
            "u16" | "ushort" => TypeTag::U16,
            "u32" | "uint" => TypeTag::U32,
            "u64" | "ulong" => TypeTag::U64,
            "f32" | "float" | "single" => TypeTag::F32,
            "f64" | "double" => TypeTag::F64,
            "decimal" => TypeTag::Decimal,
            "string" | "str" => TypeTag::String,
            "bytes" => TypeTag::Bytes,
            "guid" | "uuid" => TypeTag::Guid,
            "datetime" => TypeTag::DateTime,
            "timespan" | "duration" => TypeTag::TimeSpan,
            "any" => TypeTag::Any,
            _ => return None,
        };
        Some(tag)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TypeTag::Bool => "bool",
            TypeTag::I8 => "i8",
            TypeTag::I16 => "i16",
            TypeTag::I32 => "i32",
            TypeTag::I64 => "i64",
            TypeTag::U8 => "u8",
            TypeTag::U16 => "u16",
            TypeTag::U32 => "u32",
            TypeTag::U64 => "u64",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Decimal => "decimal",
            TypeTag::String => "string",
            TypeTag::Bytes => "bytes",
            TypeTag::Guid => "guid",
            TypeTag::DateTime => "datetime",
            TypeTag::TimeSpan => "timespan",
            TypeTag::Any => "any",
            TypeTag::Optional(inner) => return write!(f, "{inner}?"),
        };
        write!(f, "{s}")
    }
}
