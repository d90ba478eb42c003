//! In-memory instance repository
//!
//! Stores singletons in concurrent hash maps. Lives as long as the container
//! that owns it; nothing is persisted.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use graft_domain::ports::InstanceRepository;
use graft_domain::value_objects::{Instance, Marker, TypeKey};
use tracing::debug;

/// In-memory instance repository
///
/// `put` goes through the `DashMap` entry API, which holds the shard lock
/// for the key while deciding, so only one writer can move a key from absent
/// to present.
#[derive(Default)]
pub struct InMemoryInstanceRepository {
    instances: DashMap<TypeKey, Instance>,
    by_marker: DashMap<Marker, Vec<Instance>>,
    by_abstraction: DashMap<TypeKey, Vec<Instance>>,
}

impl InMemoryInstanceRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, instance: &Instance) {
        for marker in instance.markers() {
            self.by_marker
                .entry(marker.clone())
                .or_default()
                .push(instance.clone());
        }
        for abstraction in instance.abstractions() {
            self.by_abstraction
                .entry(abstraction.clone())
                .or_default()
                .push(instance.clone());
        }
    }
}

impl InstanceRepository for InMemoryInstanceRepository {
    fn put(&self, key: &TypeKey, instance: Instance) -> Instance {
        let canonical = match self.instances.entry(key.clone()) {
            Entry::Occupied(existing) => return existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(instance).value().clone(),
        };

        if canonical.key() == key {
            self.index(&canonical);
            debug!(type_key = %key, "Registered instance");
        } else {
            debug!(alias = %key, target = %canonical.key(), "Registered alias");
        }
        canonical
    }

    fn get(&self, key: &TypeKey) -> Option<Instance> {
        self.instances.get(key).map(|entry| entry.value().clone())
    }

    fn contains(&self, key: &TypeKey) -> bool {
        self.instances.contains_key(key)
    }

    fn query_by_marker(&self, marker: &Marker) -> Vec<Instance> {
        self.by_marker
            .get(marker)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn query_by_abstraction(&self, abstraction: &TypeKey) -> Vec<Instance> {
        self.by_abstraction
            .get(abstraction)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn keys(&self) -> Vec<TypeKey> {
        self.instances.iter().map(|entry| entry.key().clone()).collect()
    }

    fn len(&self) -> usize {
        self.instances.len()
    }
}
