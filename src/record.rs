//! Typed field access over row-like records.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::convert::change_type_to;
use crate::error::{Error, Result};
use crate::value::{FromValue, Value};

/// A row reader exposing named fields.
///
/// Empty columns are reported as [`Value::DbNull`].
pub trait Record {
    /// Returns the raw value of `name`, or `MemberNotFound` for an unknown field.
    fn field(&self, name: &str) -> Result<&Value>;
}

fn missing(name: &str) -> Error {
    Error::MemberNotFound { type_name: "record".to_string(), member: name.to_string() }
}

impl Record for IndexMap<String, Value> {
    fn field(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| missing(name))
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| missing(name))
    }
}

pub trait RecordExt: Record {
    /// Converts the field to `T`. Null fields only convert to optional targets.
    fn get_value<T: FromValue>(&self, name: &str) -> Result<T> {
        change_type_to(self.field(name)?)
    }

    /// Like [`RecordExt::get_value`], but a null field yields `fallback`.
    ///
    /// Only nulls are substituted: unknown fields and failed conversions
    /// still surface as errors.
    fn get_value_or<T: FromValue>(&self, name: &str, fallback: T) -> Result<T> {
        let value = self.field(name)?;
        if value.is_db_null() || value.is_null() {
            return Ok(fallback);
        }
        change_type_to(value)
    }
}

impl<R: Record + ?Sized> RecordExt for R {}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> IndexMap<String, Value> {
        IndexMap::from([
            ("id".to_string(), Value::Int(7)),
            ("name".to_string(), Value::from("Ada")),
            ("score".to_string(), Value::from("12.5")),
            ("manager".to_string(), Value::DbNull),
        ])
    }

    #[test]
    fn get_value_converts_fields() {
        let row = row();
        assert_eq!(row.get_value::<i64>("id").unwrap(), 7);
        assert_eq!(row.get_value::<String>("name").unwrap(), "Ada");
        assert_eq!(row.get_value::<String>("id").unwrap(), "7");
    }

    #[test]
    fn get_value_or_substitutes_only_nulls() {
        let row = row();
        assert_eq!(row.get_value_or("manager", -1i32).unwrap(), -1);
        assert_eq!(row.get_value_or("id", -1i32).unwrap(), 7);
        assert!(matches!(row.get_value_or("name", 0i32), Err(Error::Format { .. })));
    }

    #[test]
    fn unknown_fields_are_reported() {
        let row: HashMap<String, Value> = HashMap::new();
        assert!(matches!(row.get_value::<i32>("nope"), Err(Error::MemberNotFound { .. })));
    }

    #[test]
    fn db_null_only_converts_to_strings() {
        let row = row();
        assert!(matches!(row.get_value::<i32>("manager"), Err(Error::InvalidCast { .. })));
        assert_eq!(row.get_value::<String>("manager").unwrap(), "");
    }
}
