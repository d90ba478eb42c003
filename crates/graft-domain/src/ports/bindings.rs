//! Binding registry port

use crate::error::{Error, Result};
use crate::value_objects::{Provider, TypeKey};

/// Abstraction bindings and provider factories
///
/// # Resolution precedence
///
/// 1. An explicit binding registered with [`bind`](Self::bind)
/// 2. The single implementation registered with
///    [`register_implementation`](Self::register_implementation)
///
/// Several implementations without an explicit binding is an
/// `AmbiguousBinding` error; none at all is an `UnresolvedDependency`.
pub trait BindingRegistry: Send + Sync {
    /// Explicit abstraction -> concrete binding; a later call replaces an earlier one
    fn bind(&self, abstraction: TypeKey, concrete: TypeKey);

    /// Record a discovered implementation of `abstraction`
    fn register_implementation(&self, abstraction: TypeKey, concrete: TypeKey);

    /// Explicit binding for `abstraction`, if any
    fn explicit_binding(&self, abstraction: &TypeKey) -> Option<TypeKey>;

    /// Discovered implementations of `abstraction`
    fn implementations(&self, abstraction: &TypeKey) -> Vec<TypeKey>;

    /// Concrete type to build for `abstraction`
    ///
    /// `requested_by` only names the requester in the unresolved error.
    fn resolve_abstraction(&self, abstraction: &TypeKey, requested_by: &TypeKey) -> Result<TypeKey> {
        if let Some(concrete) = self.explicit_binding(abstraction) {
            return Ok(concrete);
        }
        let mut candidates = self.implementations(abstraction);
        match candidates.len() {
            0 => Err(Error::unresolved(requested_by.clone(), abstraction.clone())),
            1 => Ok(candidates.remove(0)),
            _ => Err(Error::ambiguous(abstraction.clone(), candidates)),
        }
    }

    /// Whether `key` is known as an abstraction
    fn is_abstraction(&self, key: &TypeKey) -> bool {
        self.explicit_binding(key).is_some() || !self.implementations(key).is_empty()
    }

    /// Register a provider
    fn register_provider(&self, provider: Provider);

    /// Providers attached to `owner`
    fn providers_for(&self, owner: &TypeKey) -> Vec<Provider>;

    /// Provider registering `provided`, if any
    fn provider_of(&self, provided: &TypeKey) -> Option<Provider>;
}
