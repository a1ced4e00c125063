//! Strict and defaulting conversions, boolean coercion and runtime-type
//! conversion.
//!
//! Every strict helper returns a [`Result`]; its `_or` twin swallows the
//! error and hands back the caller's fallback instead.

use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, trace};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::constants::TRUE_DIGIT;
use crate::culture::{Culture, NumberStyles};
use crate::error::{Error, Result};
use crate::parse::Parse;
use crate::types::TypeTag;
use crate::value::{FromValue, TextForm, Value};

fn or_fallback<T>(result: Result<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            debug!("Conversion failed ({err}), using fallback");
            fallback
        }
    }
}

macro_rules! strict_and_defaulting {
    ($($t:ty: $strict:ident, $defaulting:ident);+ $(;)?) => {
        $(
            fn $strict(&self) -> Result<$t> {
                self.parse_as::<$t>()
            }

            fn $defaulting(&self, fallback: $t) -> $t {
                self.parse_or(fallback)
            }
        )+
    };
}

macro_rules! styled {
    ($($t:ty: $strict:ident, $defaulting:ident);+ $(;)?) => {
        $(
            fn $strict(&self, styles: NumberStyles, culture: &Culture) -> Result<$t> {
                self.parse_with::<$t>(styles, culture)
            }

            fn $defaulting(&self, styles: NumberStyles, culture: &Culture, fallback: $t) -> $t {
                self.parse_with_or(styles, culture, fallback)
            }
        )+
    };
}

/// Conversion helpers available on anything with a textual form.
///
/// # Examples
/// ```
/// use convext::convert::ConvertExt;
///
/// assert_eq!("42".to_i32_or(0), 42);
/// assert_eq!("abc".to_i32_or(0), 0);
/// assert!("abc".to_i32().is_err());
/// ```
pub trait ConvertExt: TextForm {
    /// Parses with the current culture and the default styles of `T`.
    fn parse_as<T: Parse>(&self) -> Result<T> {
        self.parse_with(T::DEFAULT_STYLES, &Culture::current())
    }

    fn parse_or<T: Parse>(&self, fallback: T) -> T {
        or_fallback(self.parse_as(), fallback)
    }

    /// Parses with explicit styles and culture.
    ///
    /// Text rendered from a typed [`Value`] is always read with the invariant
    /// culture, since `Display` never emits locale separators.
    fn parse_with<T: Parse>(&self, styles: NumberStyles, culture: &Culture) -> Result<T> {
        let text = self
            .text_form()
            .ok_or_else(|| Error::NullInput { target: T::type_tag().to_string() })?;
        if self.culture_neutral() {
            T::parse_text(&text, styles, &Culture::invariant())
        } else {
            T::parse_text(&text, styles, culture)
        }
    }

    fn parse_with_or<T: Parse>(&self, styles: NumberStyles, culture: &Culture, fallback: T) -> T {
        or_fallback(self.parse_with(styles, culture), fallback)
    }

    /// Loose boolean coercion: only `"1"` and `"true"` (any case, trimmed)
    /// are true. Absent, database-null and everything else is false.
    fn to_bool(&self) -> bool {
        if self.is_db_null() {
            return false;
        }
        match self.text_form() {
            Some(text) => {
                let trimmed = text.trim();
                trimmed == TRUE_DIGIT || trimmed.eq_ignore_ascii_case("true")
            }
            None => false,
        }
    }

    strict_and_defaulting! {
        i16: to_i16, to_i16_or;
        i32: to_i32, to_i32_or;
        i64: to_i64, to_i64_or;
        u8: to_u8, to_u8_or;
        f32: to_f32, to_f32_or;
        f64: to_f64, to_f64_or;
        Decimal: to_decimal, to_decimal_or;
    }

    styled! {
        i32: to_i32_with, to_i32_with_or;
        u8: to_u8_with, to_u8_with_or;
        f32: to_f32_with, to_f32_with_or;
    }

    fn to_guid(&self) -> Result<Uuid> {
        self.parse_as()
    }

    fn to_date_time(&self) -> Result<NaiveDateTime> {
        self.parse_as()
    }

    fn to_time_span(&self) -> Result<TimeDelta> {
        self.parse_as()
    }
}

impl<T: TextForm + ?Sized> ConvertExt for T {}

/// Converts `value` to the runtime type `target` using the current culture.
pub fn change_type(value: &Value, target: &TypeTag) -> Result<Value> {
    change_type_with(value, target, &Culture::current())
}

/// Converts `value` to `T`, going through [`change_type`].
pub fn change_type_to<T: FromValue>(value: &Value) -> Result<T> {
    let tag = T::type_tag();
    let converted = change_type(value, &tag)?;
    T::from_value(&converted).ok_or_else(|| match converted {
        Value::Null => Error::NullInput { target: tag.to_string() },
        other => Error::InvalidCast { from: other.describe(), to: tag.to_string() },
    })
}

/// Converts `value` to the runtime type `target`.
///
/// Optional targets are unwrapped first, and an absent value converted to an
/// optional target stays absent. Absent values only convert to targets that
/// admit null. Everything else goes through the conversion table.
pub fn change_type_with(value: &Value, target: &TypeTag, culture: &Culture) -> Result<Value> {
    let target = match target {
        TypeTag::Optional(_) if value.is_null() => return Ok(Value::Null),
        other => other.underlying(),
    };
    trace!("change_type {} -> {target}", value.describe());

    let invalid = || Error::InvalidCast { from: value.describe(), to: target.to_string() };
    if value.is_null() {
        return if target.permits_null() { Ok(Value::Null) } else { Err(invalid()) };
    }

    match (value, target) {
        (_, TypeTag::Any) => Ok(value.clone()),
        (Value::DbNull, TypeTag::String) => Ok(Value::Text(String::new())),
        (Value::DbNull, _) => Err(invalid()),
        (_, TypeTag::String) => Ok(Value::Text(value.to_string())),
        (Value::Text(text), _) => parse_tagged(text, target, culture),
        (Value::Bool(b), TypeTag::Bool) => Ok(Value::Bool(*b)),
        (Value::Bool(b), t) if t.is_numeric() => from_integer(i128::from(*b), t, value),
        (Value::Int(i), t) if t.is_numeric() || *t == TypeTag::Bool => from_integer(i128::from(*i), t, value),
        (Value::UInt(u), t) if t.is_numeric() || *t == TypeTag::Bool => from_integer(i128::from(*u), t, value),
        (Value::Float(f), t) if t.is_numeric() || *t == TypeTag::Bool => from_float(*f, t, value),
        (Value::Decimal(d), t) if t.is_numeric() || *t == TypeTag::Bool => from_decimal(*d, t, value),
        (Value::Bytes(_), TypeTag::Bytes)
        | (Value::Guid(_), TypeTag::Guid)
        | (Value::DateTime(_), TypeTag::DateTime)
        | (Value::TimeSpan(_), TypeTag::TimeSpan) => Ok(value.clone()),
        _ => Err(invalid()),
    }
}

fn parse_tagged(text: &str, target: &TypeTag, culture: &Culture) -> Result<Value> {
    fn parse<T: Parse + Into<Value>>(text: &str, culture: &Culture) -> Result<Value> {
        T::parse_text(text, T::DEFAULT_STYLES, culture).map(Into::into)
    }

    match target {
        TypeTag::Bool => parse::<bool>(text, culture),
        TypeTag::I8 => parse::<i8>(text, culture),
        TypeTag::I16 => parse::<i16>(text, culture),
        TypeTag::I32 => parse::<i32>(text, culture),
        TypeTag::I64 => parse::<i64>(text, culture),
        TypeTag::U8 => parse::<u8>(text, culture),
        TypeTag::U16 => parse::<u16>(text, culture),
        TypeTag::U32 => parse::<u32>(text, culture),
        TypeTag::U64 => parse::<u64>(text, culture),
        TypeTag::F32 => parse::<f32>(text, culture),
        TypeTag::F64 => parse::<f64>(text, culture),
        TypeTag::Decimal => parse::<Decimal>(text, culture),
        TypeTag::Guid => parse::<Uuid>(text, culture),
        TypeTag::DateTime => parse::<NaiveDateTime>(text, culture),
        TypeTag::TimeSpan => parse::<TimeDelta>(text, culture),
        TypeTag::String => Ok(Value::Text(text.to_string())),
        TypeTag::Any | TypeTag::Optional(_) | TypeTag::Bytes => Err(Error::InvalidCast {
            from: TypeTag::String.to_string(),
            to: target.to_string(),
        }),
    }
}

fn from_integer(i: i128, target: &TypeTag, source: &Value) -> Result<Value> {
    let overflow = || Error::overflow(&source.to_string(), target);
    macro_rules! narrow {
        ($t:ty) => {
            <$t>::try_from(i).map(Value::from).map_err(|_| overflow())
        };
    }
    match target {
        TypeTag::I8 => narrow!(i8),
        TypeTag::I16 => narrow!(i16),
        TypeTag::I32 => narrow!(i32),
        TypeTag::I64 => narrow!(i64),
        TypeTag::U8 => narrow!(u8),
        TypeTag::U16 => narrow!(u16),
        TypeTag::U32 => narrow!(u32),
        TypeTag::U64 => narrow!(u64),
        TypeTag::F32 => Ok(Value::Float(f64::from(i as f32))),
        TypeTag::F64 => Ok(Value::Float(i as f64)),
        TypeTag::Decimal => Decimal::from_i128(i).map(Value::Decimal).ok_or_else(overflow),
        TypeTag::Bool => Ok(Value::Bool(i != 0)),
        _ => Err(Error::InvalidCast { from: source.describe(), to: target.to_string() }),
    }
}

/// Float to integer rounds half to even, like the integer conversions of
/// most numeric runtimes.
fn from_float(f: f64, target: &TypeTag, source: &Value) -> Result<Value> {
    let overflow = || Error::overflow(&source.to_string(), target);
    match target {
        TypeTag::F64 => Ok(Value::Float(f)),
        TypeTag::F32 => {
            let narrowed = f as f32;
            if narrowed.is_infinite() && f.is_finite() {
                return Err(overflow());
            }
            Ok(Value::Float(f64::from(narrowed)))
        }
        TypeTag::Decimal => Decimal::from_f64(f).map(Value::Decimal).ok_or_else(overflow),
        TypeTag::Bool => Ok(Value::Bool(f != 0.0)),
        t if t.is_integer() => {
            let rounded = f.round_ties_even();
            if !rounded.is_finite() || rounded.abs() >= 1e38 {
                return Err(overflow());
            }
            from_integer(rounded as i128, t, source)
        }
        _ => Err(Error::InvalidCast { from: source.describe(), to: target.to_string() }),
    }
}

fn from_decimal(d: Decimal, target: &TypeTag, source: &Value) -> Result<Value> {
    let overflow = || Error::overflow(&source.to_string(), target);
    match target {
        TypeTag::Decimal => Ok(Value::Decimal(d)),
        TypeTag::F64 => d.to_f64().map(Value::Float).ok_or_else(overflow),
        TypeTag::F32 => d.to_f32().map(|x| Value::Float(f64::from(x))).ok_or_else(overflow),
        TypeTag::Bool => Ok(Value::Bool(!d.is_zero())),
        t if t.is_integer() => {
            let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
            let i = rounded.to_i128().ok_or_else(overflow)?;
            from_integer(i, t, source)
        }
        _ => Err(Error::InvalidCast { from: source.describe(), to: target.to_string() }),
    }
}
