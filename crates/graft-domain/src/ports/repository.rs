//! Instance repository port

use crate::value_objects::{Instance, Marker, TypeKey};

/// Store of constructed singletons
///
/// # Contract
///
/// - [`put`](Self::put) is first-writer-wins and atomic per key: when two
///   callers race on the same key exactly one instance becomes canonical and
///   both receive it.
/// - When `key` is the instance's own key, the marker and abstraction indexes
///   are updated for everything the instance declares. Alias registrations
///   (an abstraction key pointing at an implementation) never touch the
///   indexes, so query results contain no duplicates.
/// - Every method is safe to call concurrently.
pub trait InstanceRepository: Send + Sync {
    /// Register `instance` under `key` unless an entry exists; returns the canonical entry
    fn put(&self, key: &TypeKey, instance: Instance) -> Instance;

    /// Canonical instance for `key`
    fn get(&self, key: &TypeKey) -> Option<Instance>;

    /// Whether `key` has an entry
    fn contains(&self, key: &TypeKey) -> bool;

    /// Instances whose type declares `marker`
    fn query_by_marker(&self, marker: &Marker) -> Vec<Instance>;

    /// Instances whose type implements `abstraction`
    fn query_by_abstraction(&self, abstraction: &TypeKey) -> Vec<Instance>;

    /// Instances satisfying both queries
    fn query_by_marker_and_abstraction(
        &self,
        marker: &Marker,
        abstraction: &TypeKey,
    ) -> Vec<Instance> {
        self.query_by_marker(marker)
            .into_iter()
            .filter(|instance| instance.implements(abstraction))
            .collect()
    }

    /// Registered keys, aliases included
    fn keys(&self) -> Vec<TypeKey>;

    /// Number of registered keys, aliases included
    fn len(&self) -> usize;

    /// Whether nothing is registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
