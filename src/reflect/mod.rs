//! Name-based access to registered fields, properties and methods.
//!
//! Types opt in by implementing [`Reflect`], returning a [`TypeInfo`] that is
//! built once (usually inside a `OnceLock`) and never changes afterwards.
//! [`ReflectExt`] then offers the by-name accessors on every such type.
//!
//! ```
//! use std::sync::OnceLock;
//! use convext::reflect::{Reflect, ReflectExt, TypeInfo};
//! use convext::value::Value;
//!
//! struct Point { x: i32 }
//!
//! impl Reflect for Point {
//!     fn type_info() -> &'static TypeInfo<Self> {
//!         static INFO: OnceLock<TypeInfo<Point>> = OnceLock::new();
//!         INFO.get_or_init(|| {
//!             TypeInfo::<Point>::new("Point").with_property("X", |p: &Point| p.x, |p, v| p.x = v)
//!         })
//!     }
//! }
//!
//! let mut p = Point { x: 1 };
//! p.set_property_value("X", 5).unwrap();
//! assert_eq!(p.get_property_value("X").unwrap(), Value::Int(5));
//! ```

pub mod member;
pub mod method;
pub mod type_info;

pub use member::{MemberInfo, MemberKind};
pub use method::{arg, MethodInfo};
pub use type_info::TypeInfo;

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;

/// Capability trait for types with registered members.
pub trait Reflect: Sized + 'static {
    fn type_info() -> &'static TypeInfo<Self>;
}

pub trait ReflectExt: Reflect {
    fn get_field_value(&self, name: &str) -> Result<Value> {
        Self::type_info().field(name)?.get_value(self)
    }

    fn set_field_value(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        Self::type_info().field(name)?.set_value(self, value.into())
    }

    fn get_property_value(&self, name: &str) -> Result<Value> {
        Self::type_info().property(name)?.get_value(self)
    }

    fn set_property_value(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        Self::type_info().property(name)?.set_value(self, value.into())
    }

    /// Reads the property at `index` in registration order.
    ///
    /// Positions shift whenever the registration changes; prefer names.
    fn get_property_value_at(&self, index: usize) -> Result<Value> {
        Self::type_info().property_at(index)?.get_value(self)
    }

    fn set_property_value_at(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        Self::type_info().property_at(index)?.set_value(self, value.into())
    }

    fn property_info(&self, name: &str) -> Result<&'static MemberInfo<Self>> {
        Self::type_info().property(name)
    }

    /// Like [`ReflectExt::property_info`], but the property must also be
    /// declared with `type_tag`.
    fn property_info_typed(
        &self,
        name: &str,
        type_tag: &TypeTag,
    ) -> Result<&'static MemberInfo<Self>> {
        let info = Self::type_info();
        match info.property(name) {
            Ok(member) if member.type_tag() == type_tag => Ok(member),
            _ => Err(Error::MemberNotFound {
                type_name: info.name().to_string(),
                member: format!("{name}: {type_tag}"),
            }),
        }
    }

    fn property_type(&self, name: &str) -> Result<TypeTag> {
        Ok(self.property_info(name)?.type_tag().clone())
    }

    /// The parameterless overload of `name`.
    fn method_info(&self, name: &str) -> Result<&'static MethodInfo<Self>> {
        Self::type_info().method(name, &[])
    }

    fn method_info_typed(
        &self,
        name: &str,
        parameters: &[TypeTag],
    ) -> Result<&'static MethodInfo<Self>> {
        Self::type_info().method(name, parameters)
    }

    /// Invokes the parameterless overload of `name`.
    fn invoke_method(&mut self, name: &str) -> Result<Value> {
        Self::type_info().method(name, &[])?.invoke(self, &[])
    }

    /// Invokes the overload of `name` declared with exactly `parameters`.
    fn invoke_method_typed(
        &mut self,
        name: &str,
        parameters: &[TypeTag],
        args: &[Value],
    ) -> Result<Value> {
        Self::type_info().method(name, parameters)?.invoke(self, args)
    }

    /// Invokes `name` by name alone; fails with `AmbiguousMatch` when it is
    /// overloaded.
    fn invoke_method_with(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        Self::type_info().method_by_name(name)?.invoke(self, args)
    }
}

impl<T: Reflect> ReflectExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use test_log::test;

    #[derive(Debug, Default)]
    struct Counter {
        count: i64,
        label: String,
        secret: Option<String>,
    }

    impl Reflect for Counter {
        fn type_info() -> &'static TypeInfo<Self> {
            static INFO: OnceLock<TypeInfo<Counter>> = OnceLock::new();
            INFO.get_or_init(|| {
                TypeInfo::<Counter>::new("Counter")
                    .with_field("count", |c: &Counter| c.count, |c, v| c.count = v)
                    .with_property("Label", |c: &Counter| c.label.clone(), |c, v| c.label = v)
                    .with_readonly_property("IsZero", |c: &Counter| c.count == 0)
                    .with_writeonly_property("Secret", |c: &mut Counter, v| c.secret = v)
                    .with_method("Increment", &[], TypeTag::I64, |c, _| {
                        c.count += 1;
                        Ok(Value::from(c.count))
                    })
                    .with_method("Add", &[TypeTag::I64], TypeTag::I64, |c, args| {
                        c.count += arg::<i64>(args, 0)?;
                        Ok(Value::from(c.count))
                    })
                    .with_method("Add", &[TypeTag::String], TypeTag::I64, |c, args| {
                        let text: String = arg(args, 0)?;
                        c.count += text.parse::<i64>()?;
                        Ok(Value::from(c.count))
                    })
            })
        }
    }

    #[test]
    fn fields_and_properties_round_trip() {
        let mut counter = Counter::default();
        counter.set_field_value("count", 3).unwrap();
        counter.set_property_value("Label", "hits").unwrap();
        assert_eq!(counter.get_field_value("count").unwrap(), Value::Int(3));
        assert_eq!(counter.get_property_value("Label").unwrap(), Value::from("hits"));
        assert_eq!(counter.get_property_value("IsZero").unwrap(), Value::Bool(false));
    }

    #[test]
    fn properties_are_addressable_by_position() {
        let mut counter = Counter::default();
        counter.set_property_value_at(0, "first").unwrap();
        assert_eq!(counter.label, "first");
        assert_eq!(counter.get_property_value_at(1).unwrap(), Value::Bool(true));
        assert!(matches!(
            counter.get_property_value_at(9),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn access_rules_are_enforced() {
        let mut counter = Counter::default();
        assert!(matches!(
            counter.set_property_value("IsZero", true),
            Err(Error::Access { access: "writable", .. })
        ));
        assert!(matches!(
            counter.get_property_value("Secret"),
            Err(Error::Access { access: "readable", .. })
        ));
        counter.set_property_value("Secret", Value::Null).unwrap();
        counter.set_property_value("Secret", "s3cr3t").unwrap();
        assert_eq!(counter.secret.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn wrong_types_and_unknown_names_fail() {
        let mut counter = Counter::default();
        assert!(matches!(
            counter.set_field_value("count", "3"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            counter.get_field_value("missing"),
            Err(Error::MemberNotFound { .. })
        ));
        assert!(matches!(
            counter.get_property_value("count"),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn property_metadata() {
        let counter = Counter::default();
        assert_eq!(counter.property_type("Label").unwrap(), TypeTag::String);
        assert_eq!(
            counter.property_type("Secret").unwrap(),
            TypeTag::optional(TypeTag::String)
        );
        assert!(counter.property_info_typed("Label", &TypeTag::String).is_ok());
        assert!(counter.property_info_typed("Label", &TypeTag::I32).is_err());
        assert!(!counter.property_info("IsZero").unwrap().can_write());
    }

    #[test]
    fn methods_resolve_overloads() {
        let mut counter = Counter::default();
        assert_eq!(counter.invoke_method("Increment").unwrap(), Value::Int(1));
        assert_eq!(
            counter
                .invoke_method_typed("Add", &[TypeTag::I64], &[Value::from(4i64)])
                .unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            counter
                .invoke_method_typed("Add", &[TypeTag::String], &[Value::from("10")])
                .unwrap(),
            Value::Int(15)
        );
        assert!(counter.method_info("Add").is_err());
        assert_eq!(counter.method_info("Increment").unwrap().return_type(), &TypeTag::I64);
        assert!(matches!(
            counter.invoke_method_with("Add", &[Value::from(1i64)]),
            Err(Error::AmbiguousMatch { candidates: 2, .. })
        ));
        assert_eq!(
            counter.invoke_method_with("Increment", &[]).unwrap(),
            Value::Int(16)
        );
    }

    #[test]
    fn invocation_checks_arguments_and_wraps_failures() {
        let mut counter = Counter::default();
        let add = counter.method_info_typed("Add", &[TypeTag::String]).unwrap();
        assert!(matches!(
            add.invoke(&mut counter, &[]),
            Err(Error::ParameterCount { expected: 1, actual: 0, .. })
        ));
        assert!(matches!(
            add.invoke(&mut counter, &[Value::Int(1)]),
            Err(Error::TypeMismatch { .. })
        ));
        let err = add.invoke(&mut counter, &[Value::from("ten")]).unwrap_err();
        assert!(matches!(err, Error::Invocation { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
