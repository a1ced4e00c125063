use indexmap::IndexMap;
use log::trace;

use super::member::{Getter, MemberInfo, MemberKind, Setter};
use super::method::{Invoker, MethodInfo};
use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::{FromValue, Value};

/// The registered members of `T`, in registration order.
///
/// Built once with the `with_*` methods and read-only afterwards.
pub struct TypeInfo<T> {
    name: &'static str,
    fields: IndexMap<String, MemberInfo<T>>,
    properties: IndexMap<String, MemberInfo<T>>,
    methods: Vec<MethodInfo<T>>,
}

fn typed_getter<T, V, G>(get: G) -> Getter<T>
where
    V: Into<Value>,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    Box::new(move |target| get(target).into())
}

fn typed_setter<T, V, S>(member: &str, set: S) -> Setter<T>
where
    V: FromValue,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    let member = member.to_string();
    Box::new(move |target, value| {
        let typed = V::from_value(&value).ok_or_else(|| Error::TypeMismatch {
            member: member.clone(),
            expected: V::type_tag().to_string(),
            found: value.describe(),
        })?;
        set(target, typed);
        Ok(())
    })
}

impl<T: 'static> TypeInfo<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: IndexMap::new(),
            properties: IndexMap::new(),
            methods: Vec::new(),
        }
    }

    fn member(
        &self,
        name: &str,
        kind: MemberKind,
        type_tag: TypeTag,
        getter: Option<Getter<T>>,
        setter: Option<Setter<T>>,
    ) -> MemberInfo<T> {
        MemberInfo {
            name: name.to_string(),
            owner: self.name,
            kind,
            type_tag,
            getter,
            setter,
        }
    }

    pub fn with_field<V, G, S>(mut self, name: &str, get: G, set: S) -> Self
    where
        V: FromValue + Into<Value>,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let member = self.member(
            name,
            MemberKind::Field,
            V::type_tag(),
            Some(typed_getter(get)),
            Some(typed_setter(name, set)),
        );
        self.fields.insert(name.to_string(), member);
        self
    }

    pub fn with_property<V, G, S>(mut self, name: &str, get: G, set: S) -> Self
    where
        V: FromValue + Into<Value>,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let member = self.member(
            name,
            MemberKind::Property,
            V::type_tag(),
            Some(typed_getter(get)),
            Some(typed_setter(name, set)),
        );
        self.properties.insert(name.to_string(), member);
        self
    }

    pub fn with_readonly_property<V, G>(mut self, name: &str, get: G) -> Self
    where
        V: FromValue + Into<Value>,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        let member = self.member(
            name,
            MemberKind::Property,
            V::type_tag(),
            Some(typed_getter(get)),
            None,
        );
        self.properties.insert(name.to_string(), member);
        self
    }

    pub fn with_writeonly_property<V, S>(mut self, name: &str, set: S) -> Self
    where
        V: FromValue,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let member = self.member(
            name,
            MemberKind::Property,
            V::type_tag(),
            None,
            Some(typed_setter(name, set)),
        );
        self.properties.insert(name.to_string(), member);
        self
    }

    /// Registers a method overload. Overloads share a name and differ in
    /// their parameter types.
    pub fn with_method<F>(
        mut self,
        name: &str,
        parameters: &[TypeTag],
        returns: TypeTag,
        invoker: F,
    ) -> Self
    where
        F: Fn(&mut T, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let invoker: Invoker<T> = Box::new(invoker);
        self.methods.push(MethodInfo {
            name: name.to_string(),
            owner: self.name,
            parameters: parameters.to_vec(),
            returns,
            invoker,
        });
        self
    }
}

impl<T> TypeInfo<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn not_found(&self, member: impl Into<String>) -> Error {
        Error::MemberNotFound {
            type_name: self.name.to_string(),
            member: member.into(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &MemberInfo<T>> {
        self.fields.values()
    }

    pub fn properties(&self) -> impl Iterator<Item = &MemberInfo<T>> {
        self.properties.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodInfo<T>> {
        self.methods.iter()
    }

    pub fn field(&self, name: &str) -> Result<&MemberInfo<T>> {
        trace!("Looking up field '{}.{name}'", self.name);
        self.fields.get(name).ok_or_else(|| self.not_found(name))
    }

    pub fn property(&self, name: &str) -> Result<&MemberInfo<T>> {
        trace!("Looking up property '{}.{name}'", self.name);
        self.properties.get(name).ok_or_else(|| self.not_found(name))
    }

    /// Property by registration position.
    pub fn property_at(&self, index: usize) -> Result<&MemberInfo<T>> {
        self.properties
            .get_index(index)
            .map(|(_, member)| member)
            .ok_or_else(|| self.not_found(format!("#{index}")))
    }

    /// The overload of `name` whose parameter types are exactly `parameters`.
    pub fn method(&self, name: &str, parameters: &[TypeTag]) -> Result<&MethodInfo<T>> {
        trace!("Looking up method '{}.{name}' with {} parameter(s)", self.name, parameters.len());
        self.methods
            .iter()
            .find(|method| method.name == name && method.parameters == parameters)
            .ok_or_else(|| {
                let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                self.not_found(format!("{name}({})", params.join(", ")))
            })
    }

    /// The only overload called `name`.
    pub fn method_by_name(&self, name: &str) -> Result<&MethodInfo<T>> {
        let mut candidates = self.methods.iter().filter(|method| method.name == name);
        let first = candidates.next().ok_or_else(|| self.not_found(name))?;
        let others = candidates.count();
        if others > 0 {
            return Err(Error::AmbiguousMatch {
                type_name: self.name.to_string(),
                method: name.to_string(),
                candidates: others + 1,
            });
        }
        Ok(first)
    }
}

impl<T> std::fmt::Debug for TypeInfo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.iter().map(MethodInfo::signature).collect::<Vec<_>>())
            .finish()
    }
}
