use log::trace;

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::{FromValue, Value};

pub type Invoker<T> = Box<dyn Fn(&mut T, &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// One registered method overload.
pub struct MethodInfo<T> {
    pub(crate) name: String,
    pub(crate) owner: &'static str,
    pub(crate) parameters: Vec<TypeTag>,
    pub(crate) returns: TypeTag,
    pub(crate) invoker: Invoker<T>,
}

impl<T> MethodInfo<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[TypeTag] {
        &self.parameters
    }

    pub fn return_type(&self) -> &TypeTag {
        &self.returns
    }

    pub(crate) fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Calls the method on `target`.
    ///
    /// Arguments are checked for count and type before the call. A failure
    /// raised by the method body is returned as `Error::Invocation` with the
    /// original cause as its source.
    pub fn invoke(&self, target: &mut T, args: &[Value]) -> Result<Value> {
        if args.len() != self.parameters.len() {
            return Err(Error::ParameterCount {
                method: self.name.clone(),
                expected: self.parameters.len(),
                actual: args.len(),
            });
        }
        for (index, (param, arg)) in self.parameters.iter().zip(args).enumerate() {
            if !param.accepts(arg) {
                return Err(Error::TypeMismatch {
                    member: format!("{} argument {index}", self.name),
                    expected: param.to_string(),
                    found: arg.describe(),
                });
            }
        }

        trace!("Invoking '{}.{}'", self.owner, self.signature());
        (self.invoker)(target, args).map_err(|source| Error::Invocation {
            method: format!("{}.{}", self.owner, self.name),
            source,
        })
    }
}

impl<T> std::fmt::Debug for MethodInfo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodInfo")
            .field("owner", &self.owner)
            .field("signature", &self.signature())
            .field("returns", &self.returns)
            .finish()
    }
}

/// Extracts argument `index` as `V` inside an invoker body.
pub fn arg<V: FromValue>(args: &[Value], index: usize) -> anyhow::Result<V> {
    let value = args
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("missing argument {index}"))?;
    V::from_value(value).ok_or_else(|| {
        anyhow::anyhow!("argument {index} is {}, expected {}", value.describe(), V::type_tag())
    })
}
