use log::trace;

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;

pub type Getter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
pub type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
        }
    }
}

/// A named, typed accessor pair registered on a [`super::TypeInfo`].
///
/// Fields always carry both accessors. Properties may omit either one, which
/// makes them read-only or write-only.
pub struct MemberInfo<T> {
    pub(crate) name: String,
    pub(crate) owner: &'static str,
    pub(crate) kind: MemberKind,
    pub(crate) type_tag: TypeTag,
    pub(crate) getter: Option<Getter<T>>,
    pub(crate) setter: Option<Setter<T>>,
}

impl<T> MemberInfo<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    fn access_error(&self, access: &'static str) -> Error {
        Error::Access {
            type_name: self.owner.to_string(),
            member: self.name.clone(),
            access,
        }
    }

    pub fn get_value(&self, target: &T) -> Result<Value> {
        let getter = self.getter.as_ref().ok_or_else(|| self.access_error("readable"))?;
        trace!("Reading {} '{}.{}'", self.kind.as_str(), self.owner, self.name);
        Ok(getter(target))
    }

    /// Stores `value` after checking it against the declared type.
    ///
    /// No conversion happens here; convert first with
    /// [`crate::convert::change_type`] when the value's kind differs.
    pub fn set_value(&self, target: &mut T, value: Value) -> Result<()> {
        let setter = self.setter.as_ref().ok_or_else(|| self.access_error("writable"))?;
        if !self.type_tag.accepts(&value) {
            return Err(Error::TypeMismatch {
                member: self.name.clone(),
                expected: self.type_tag.to_string(),
                found: value.describe(),
            });
        }
        trace!("Writing {} '{}.{}'", self.kind.as_str(), self.owner, self.name);
        setter(target, value)
    }
}

impl<T> std::fmt::Debug for MemberInfo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("type_tag", &self.type_tag)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}
