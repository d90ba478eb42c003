//! Linked type catalog

use graft_domain::ports::TypeCatalog;
use graft_domain::value_objects::{TypeDescriptor, TypeKey};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry entry for an injectable type
pub struct InjectableEntry {
    /// Unique entry name, used in logs and listings
    pub name: &'static str,
    /// Builds the type's descriptor
    pub describe: fn() -> TypeDescriptor,
}

#[linkme::distributed_slice]
pub static INJECTABLES: [InjectableEntry] = [..];

/// Catalog of every type registered in [`INJECTABLES`]
///
/// Descriptors are built once, when the catalog is discovered. Entries whose
/// descriptor key was already seen are skipped with a warning.
#[derive(Clone, Default)]
pub struct LinkedTypeCatalog {
    descriptors: Vec<Arc<TypeDescriptor>>,
    keys: HashSet<TypeKey>,
}

impl LinkedTypeCatalog {
    /// Build the catalog from the linked registry
    pub fn discover() -> Self {
        Self::from_entries(&INJECTABLES)
    }

    /// Build the catalog from an explicit entry list
    pub fn from_entries(entries: &[InjectableEntry]) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            let descriptor = (entry.describe)();
            if !catalog.keys.insert(descriptor.key().clone()) {
                warn!(entry = entry.name, type_key = %descriptor.key(), "Duplicate injectable skipped");
                continue;
            }
            debug!(entry = entry.name, type_key = %descriptor.key(), "Discovered injectable");
            catalog.descriptors.push(Arc::new(descriptor));
        }
        catalog
    }

    /// Number of discovered types
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl TypeCatalog for LinkedTypeCatalog {
    fn candidate_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.descriptors.clone()
    }

    fn declares(&self, key: &TypeKey) -> bool {
        self.keys.contains(key)
    }
}

/// Names of every registered injectable
///
/// Useful for diagnostics and CLI listings.
pub fn list_injectables() -> Vec<&'static str> {
    INJECTABLES.iter().map(|entry| entry.name).collect()
}
