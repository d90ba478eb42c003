//! Constructed singletons

use super::descriptor::Capabilities;
use super::marker::Marker;
use super::type_key::TypeKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased shared object
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// A constructed singleton together with what it was declared to be
///
/// Cloning an `Instance` clones the handle, never the object. Aliases
/// registered under abstractions are clones of the same handle, so
/// [`Instance::ptr_eq`] holds between them.
#[derive(Clone)]
pub struct Instance {
    key: TypeKey,
    value: AnyArc,
    capabilities: Arc<Capabilities>,
}

impl Instance {
    /// Wrap an already shared object with the capabilities of its descriptor
    pub fn new(key: TypeKey, value: AnyArc, capabilities: Arc<Capabilities>) -> Self {
        Self {
            key,
            value,
            capabilities,
        }
    }

    /// Wrap a plain value with no markers and no abstractions
    pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap a shared value with no markers and no abstractions
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            value,
            capabilities: Arc::new(Capabilities::default()),
        }
    }

    /// Key the instance is canonical for
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// The erased object
    pub fn value(&self) -> &AnyArc {
        &self.value
    }

    /// Markers declared by the owning type
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.capabilities.markers()
    }

    /// Abstractions implemented by the owning type
    pub fn abstractions(&self) -> impl Iterator<Item = &TypeKey> {
        self.capabilities.abstractions()
    }

    /// Whether the owning type declares `marker`
    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.capabilities.has_marker(marker)
    }

    /// Whether the owning type implements `abstraction`
    pub fn implements(&self, abstraction: &TypeKey) -> bool {
        self.capabilities.implements(abstraction)
    }

    /// Concrete view of the object
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    /// Abstraction view of the object (e.g. `cast::<dyn Store>()`)
    ///
    /// Returns `None` when the owning type did not declare the abstraction.
    /// The returned pointer shares the allocation of the concrete object.
    pub fn cast<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        let upcast = self.capabilities.upcast_for(&TypeKey::of::<I>())?;
        upcast(self.value.clone())?
            .downcast::<Arc<I>>()
            .ok()
            .map(|boxed| *boxed)
    }

    /// Identity comparison of the underlying objects
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("key", &self.key)
            .field("markers", &self.markers().collect::<Vec<_>>())
            .field("abstractions", &self.abstractions().collect::<Vec<_>>())
            .finish()
    }
}
