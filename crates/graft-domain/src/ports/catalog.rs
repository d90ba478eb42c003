//! Type catalog port

use crate::value_objects::{Marker, TypeDescriptor, TypeKey};
use std::sync::Arc;

/// Source of discoverable types
///
/// Discovery happens once before a resolution pass; the result is treated as
/// immutable input.
pub trait TypeCatalog: Send + Sync {
    /// Every candidate type
    fn candidate_types(&self) -> Vec<Arc<TypeDescriptor>>;

    /// Candidates declaring `marker`
    fn types_declaring_marker(&self, marker: &Marker) -> Vec<Arc<TypeDescriptor>> {
        self.candidate_types()
            .into_iter()
            .filter(|descriptor| descriptor.has_marker(marker))
            .collect()
    }

    /// Whether `key` is one of the candidates
    fn declares(&self, key: &TypeKey) -> bool {
        self.candidate_types()
            .iter()
            .any(|descriptor| descriptor.key() == key)
    }
}
