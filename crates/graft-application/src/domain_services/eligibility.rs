//! Eligible catalog
//!
//! The condition-filtered view of the type catalog the engine works from.

use crate::domain_services::ConditionEvaluator;
use graft_domain::ports::{InstanceRepository, TypeCatalog};
use graft_domain::value_objects::{Marker, TypeDescriptor, TypeKey};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Types that passed condition evaluation, with the marker-tagged roots singled out
#[derive(Debug, Default)]
pub struct EligibleCatalog {
    types: HashMap<TypeKey, Arc<TypeDescriptor>>,
    order: Vec<TypeKey>,
    roots: Vec<TypeKey>,
    root_set: HashSet<TypeKey>,
    excluded: Vec<TypeKey>,
}

impl EligibleCatalog {
    /// Filter `catalog` through `evaluator`
    ///
    /// Roots are the eligible types declaring at least one of `markers`, in
    /// marker order and then catalog order, each listed once.
    pub fn build(
        catalog: &dyn TypeCatalog,
        evaluator: &ConditionEvaluator,
        repository: &dyn InstanceRepository,
        markers: &BTreeSet<Marker>,
    ) -> Self {
        let mut eligible = Self::default();

        for descriptor in catalog.candidate_types() {
            let key = descriptor.key().clone();
            if evaluator.evaluate(&descriptor, repository, catalog) {
                if !eligible.types.contains_key(&key) {
                    eligible.order.push(key.clone());
                    eligible.types.insert(key, descriptor);
                }
            } else {
                debug!(type_key = %key, "Type excluded by its conditions");
                eligible.excluded.push(key);
            }
        }

        for marker in markers {
            for descriptor in catalog.types_declaring_marker(marker) {
                let key = descriptor.key();
                if eligible.types.contains_key(key) && eligible.root_set.insert(key.clone()) {
                    eligible.roots.push(key.clone());
                }
            }
        }

        info!(
            eligible = eligible.types.len(),
            roots = eligible.roots.len(),
            excluded = eligible.excluded.len(),
            "Catalog filtered"
        );
        eligible
    }

    /// Eligible descriptor for `key`, marker-tagged or not
    pub fn get(&self, key: &TypeKey) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(key)
    }

    /// Eligible marker-tagged descriptor for `key`
    pub fn root(&self, key: &TypeKey) -> Option<&Arc<TypeDescriptor>> {
        if self.root_set.contains(key) {
            self.types.get(key)
        } else {
            None
        }
    }

    /// Whether `key` is an eligible marker-tagged type
    pub fn is_root(&self, key: &TypeKey) -> bool {
        self.root_set.contains(key)
    }

    /// Root keys in scheduling order
    pub fn roots(&self) -> &[TypeKey] {
        &self.roots
    }

    /// Keys whose conditions failed
    pub fn excluded(&self) -> &[TypeKey] {
        &self.excluded
    }

    /// Every eligible descriptor, in catalog order
    pub fn descriptors(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.order.iter().filter_map(|key| self.types.get(key))
    }

    /// Number of eligible types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is eligible
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
