//! Providers

use super::descriptor::panic_message;
use super::instance::Instance;
use super::type_key::TypeKey;
use crate::error::{BoxError, Error, Result};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Factory producing the provided instance from the owner instance
pub type ProviderFn = Arc<dyn Fn(&Instance) -> std::result::Result<Instance, BoxError> + Send + Sync>;

/// Derives a secondary instance from a constructed owner
///
/// Invoked once, right after the owner has been registered. The output is
/// registered under [`Provider::provides`].
#[derive(Clone)]
pub struct Provider {
    owner: TypeKey,
    provides: TypeKey,
    factory: ProviderFn,
}

impl Provider {
    /// Typed provider: `factory` receives the owner `O` and returns a `P`
    pub fn new<O, P, F>(factory: F) -> Self
    where
        O: Any + Send + Sync,
        P: Any + Send + Sync,
        F: Fn(&O) -> std::result::Result<P, BoxError> + Send + Sync + 'static,
    {
        let erased: ProviderFn = Arc::new(move |owner: &Instance| {
            let owner = owner.downcast::<O>().ok_or_else(|| {
                Error::internal(format!(
                    "provider expected an instance of {}, got {}",
                    TypeKey::of::<O>(),
                    owner.key()
                ))
            })?;
            Ok(Instance::from_value(factory(owner.as_ref())?))
        });
        Self::from_parts(TypeKey::of::<O>(), TypeKey::of::<P>(), erased)
    }

    /// Provider from raw parts
    pub fn from_parts(owner: TypeKey, provides: TypeKey, factory: ProviderFn) -> Self {
        Self {
            owner,
            provides,
            factory,
        }
    }

    /// Concrete type the provider is attached to
    pub fn owner(&self) -> &TypeKey {
        &self.owner
    }

    /// Key the output is registered under
    pub fn provides(&self) -> &TypeKey {
        &self.provides
    }

    /// Run the factory against the owner instance
    ///
    /// The output is re-keyed to [`Provider::provides`]; factory failures and
    /// panics are reported as construction failures of the provided type.
    pub fn invoke(&self, owner: &Instance) -> Result<Instance> {
        let produced = panic::catch_unwind(AssertUnwindSafe(|| (self.factory)(owner)))
            .map_err(panic_message)
            .and_then(|outcome| outcome)
            .map_err(|source| Error::construction(self.provides.clone(), source))?;
        if produced.key() == &self.provides {
            Ok(produced)
        } else {
            Ok(Instance::new(
                self.provides.clone(),
                produced.value().clone(),
                Default::default(),
            ))
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("owner", &self.owner)
            .field("provides", &self.provides)
            .finish()
    }
}
