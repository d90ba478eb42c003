//! Type identity

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identity of a constructible type, abstraction or provided type
///
/// Identity is by name. [`TypeKey::of`] uses the compiler-provided type name,
/// so `TypeKey::of::<dyn app::Store>()` and `TypeKey::named("dyn app::Store")`
/// are the same key. This is what lets configuration files name bindings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Key of a Rust type (sized or not, e.g. `dyn Trait`)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// Key from an explicit name
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Full name of the key
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
