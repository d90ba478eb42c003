//! Catalog built in code

use graft_domain::ports::TypeCatalog;
use graft_domain::value_objects::{TypeDescriptor, TypeKey};
use std::collections::HashSet;
use std::sync::Arc;

/// Type catalog holding an explicit list of descriptors
///
/// Later registrations of an already present key are ignored, so the catalog
/// never lists a type twice.
#[derive(Default, Clone)]
pub struct StaticTypeCatalog {
    descriptors: Vec<Arc<TypeDescriptor>>,
    keys: HashSet<TypeKey>,
}

impl StaticTypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor (builder style)
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Add a descriptor; returns `false` when the key was already present
    pub fn register(&mut self, descriptor: TypeDescriptor) -> bool {
        if !self.keys.insert(descriptor.key().clone()) {
            return false;
        }
        self.descriptors.push(Arc::new(descriptor));
        true
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<TypeDescriptor> for StaticTypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}

impl TypeCatalog for StaticTypeCatalog {
    fn candidate_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.descriptors.clone()
    }

    fn declares(&self, key: &TypeKey) -> bool {
        self.keys.contains(key)
    }
}
