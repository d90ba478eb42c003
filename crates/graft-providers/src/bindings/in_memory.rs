//! In-memory binding registry

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use graft_domain::ports::BindingRegistry;
use graft_domain::value_objects::{Provider, TypeKey};
use tracing::{debug, warn};

/// In-memory binding registry backed by concurrent maps
#[derive(Default)]
pub struct InMemoryBindingRegistry {
    explicit: DashMap<TypeKey, TypeKey>,
    implementations: DashMap<TypeKey, Vec<TypeKey>>,
    providers: DashMap<TypeKey, Vec<Provider>>,
    provided: DashMap<TypeKey, Provider>,
}

impl InMemoryBindingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit bindings currently configured
    pub fn explicit_bindings(&self) -> Vec<(TypeKey, TypeKey)> {
        self.explicit
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl BindingRegistry for InMemoryBindingRegistry {
    fn bind(&self, abstraction: TypeKey, concrete: TypeKey) {
        debug!(abstraction = %abstraction, concrete = %concrete, "Explicit binding");
        if let Some(previous) = self.explicit.insert(abstraction.clone(), concrete) {
            warn!(abstraction = %abstraction, previous = %previous, "Explicit binding replaced");
        }
    }

    fn register_implementation(&self, abstraction: TypeKey, concrete: TypeKey) {
        let mut known = self.implementations.entry(abstraction).or_default();
        if !known.contains(&concrete) {
            known.push(concrete);
        }
    }

    fn explicit_binding(&self, abstraction: &TypeKey) -> Option<TypeKey> {
        self.explicit.get(abstraction).map(|entry| entry.value().clone())
    }

    fn implementations(&self, abstraction: &TypeKey) -> Vec<TypeKey> {
        self.implementations
            .get(abstraction)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn register_provider(&self, provider: Provider) {
        debug!(owner = %provider.owner(), provides = %provider.provides(), "Registered provider");
        match self.provided.entry(provider.provides().clone()) {
            Entry::Occupied(existing) => warn!(
                provides = %provider.provides(),
                owner = %existing.get().owner(),
                ignored = %provider.owner(),
                "Provided type already has a provider"
            ),
            Entry::Vacant(slot) => {
                slot.insert(provider.clone());
            }
        }
        self.providers
            .entry(provider.owner().clone())
            .or_default()
            .push(provider);
    }

    fn providers_for(&self, owner: &TypeKey) -> Vec<Provider> {
        self.providers
            .get(owner)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn provider_of(&self, provided: &TypeKey) -> Option<Provider> {
        self.provided.get(provided).map(|entry| entry.value().clone())
    }
}
