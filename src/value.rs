//! Dynamic values handed to the conversion and accessor helpers.
//!
//! [`Value`] is the boxed "object" the helpers operate on. Its `Display`
//! output is the textual form that strict and defaulting parsers read, so
//! typed values always render culture-neutrally.

use std::borrow::Cow;
use std::fmt::Display;

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::TypeTag;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Null,
    /// Database-null sentinel returned by record readers for empty columns.
    DbNull,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Guid(Uuid),
    DateTime(NaiveDateTime),
    TimeSpan(TimeDelta),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_db_null(&self) -> bool {
        matches!(self, Value::DbNull)
    }

    /// The natural type of the value, or `None` for the two null flavours.
    pub fn type_tag(&self) -> Option<TypeTag> {
        let tag = match self {
            Value::Null | Value::DbNull => return None,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::I64,
            Value::UInt(_) => TypeTag::U64,
            Value::Float(_) => TypeTag::F64,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::Text(_) => TypeTag::String,
            Value::Bytes(_) => TypeTag::Bytes,
            Value::Guid(_) => TypeTag::Guid,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::TimeSpan(_) => TypeTag::TimeSpan,
        };
        Some(tag)
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::DbNull => "dbnull".to_string(),
            other => other.type_tag().map(|tag| tag.to_string()).unwrap_or_default(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null | Value::DbNull => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&hex::encode(b)),
            Value::Guid(g) => write!(f, "{g}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::TimeSpan(span) => f.write_str(&format_time_span(span)),
        }
    }
}

/// Renders a span as `[-][d.]hh:mm:ss[.fffffff]`.
pub(crate) fn format_time_span(span: &TimeDelta) -> String {
    let negative = *span < TimeDelta::zero();
    let abs = span.abs();
    let total_seconds = abs.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    let ticks = abs.subsec_nanos() / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

value_from!(Bool: bool);
value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Decimal: Decimal);
value_from!(Text: String, &str);
value_from!(Bytes: Vec<u8>);
value_from!(Guid: Uuid);
value_from!(DateTime: NaiveDateTime);
value_from!(TimeSpan: TimeDelta);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Anything with a textual form the parsers can read.
///
/// `None` means the input is absent, which strict conversions report as a
/// null-input error.
pub trait TextForm {
    fn text_form(&self) -> Option<Cow<'_, str>>;

    fn is_db_null(&self) -> bool {
        false
    }

    /// True when the text was produced by `Display` on a typed value, which
    /// never uses locale-specific separators.
    fn culture_neutral(&self) -> bool {
        false
    }
}

impl TextForm for str {
    fn text_form(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl TextForm for String {
    fn text_form(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl TextForm for Value {
    fn text_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn is_db_null(&self) -> bool {
        Value::is_db_null(self)
    }

    fn culture_neutral(&self) -> bool {
        !matches!(self, Value::Text(_) | Value::Null | Value::DbNull)
    }
}

impl<T: TextForm + ?Sized> TextForm for &T {
    fn text_form(&self) -> Option<Cow<'_, str>> {
        (**self).text_form()
    }

    fn is_db_null(&self) -> bool {
        (**self).is_db_null()
    }

    fn culture_neutral(&self) -> bool {
        (**self).culture_neutral()
    }
}

impl<T: TextForm> TextForm for Option<T> {
    fn text_form(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|v| v.text_form())
    }

    fn is_db_null(&self) -> bool {
        self.as_ref().is_some_and(|v| v.is_db_null())
    }

    fn culture_neutral(&self) -> bool {
        self.as_ref().is_some_and(|v| v.culture_neutral())
    }
}

/// Exact, non-parsing extraction of a Rust value from a [`Value`].
///
/// Integers accept any integer variant whose value fits; nothing else is
/// coerced. Use the conversion helpers when text must be parsed.
pub trait FromValue: Sized {
    fn type_tag() -> TypeTag;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value_int {
    ($($t:ty => $tag:ident),+) => {
        $(
            impl FromValue for $t {
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(i) => <$t>::try_from(*i).ok(),
                        Value::UInt(u) => <$t>::try_from(*u).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

from_value_int!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64
);

macro_rules! from_value_exact {
    ($($t:ty => $tag:ident, $variant:ident, $conv:expr),+ $(,)?) => {
        $(
            impl FromValue for $t {
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some($conv(v)),
                        _ => None,
                    }
                }
            }
        )+
    };
}

from_value_exact!(
    bool => Bool, Bool, |v: &bool| *v,
    f32 => F32, Float, |v: &f64| *v as f32,
    f64 => F64, Float, |v: &f64| *v,
    Decimal => Decimal, Decimal, |v: &Decimal| *v,
    String => String, Text, |v: &String| v.clone(),
    Vec<u8> => Bytes, Bytes, |v: &Vec<u8>| v.clone(),
    Uuid => Guid, Guid, |v: &Uuid| *v,
    NaiveDateTime => DateTime, DateTime, |v: &NaiveDateTime| *v,
    TimeDelta => TimeSpan, TimeSpan, |v: &TimeDelta| *v,
);

impl FromValue for Value {
    fn type_tag() -> TypeTag {
        TypeTag::Any
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn type_tag() -> TypeTag {
        TypeTag::optional(T::type_tag())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl TypeTag {
    /// Whether `value` may be stored in a member declared with this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeTag::Any => true,
            TypeTag::Optional(inner) => value.is_null() || inner.accepts(value),
            TypeTag::I8 => i8::from_value(value).is_some(),
            TypeTag::I16 => i16::from_value(value).is_some(),
            TypeTag::I32 => i32::from_value(value).is_some(),
            TypeTag::I64 => i64::from_value(value).is_some(),
            TypeTag::U8 => u8::from_value(value).is_some(),
            TypeTag::U16 => u16::from_value(value).is_some(),
            TypeTag::U32 => u32::from_value(value).is_some(),
            TypeTag::U64 => u64::from_value(value).is_some(),
            TypeTag::F32 | TypeTag::F64 => matches!(value, Value::Float(_)),
            TypeTag::Bool => matches!(value, Value::Bool(_)),
            TypeTag::Decimal => matches!(value, Value::Decimal(_)),
            TypeTag::String => matches!(value, Value::Text(_)),
            TypeTag::Bytes => matches!(value, Value::Bytes(_)),
            TypeTag::Guid => matches!(value, Value::Guid(_)),
            TypeTag::DateTime => matches!(value, Value::DateTime(_)),
            TypeTag::TimeSpan => matches!(value, Value::TimeSpan(_)),
        }
    }
}
