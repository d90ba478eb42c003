//! Type descriptors
//!
//! A [`TypeDescriptor`] is everything the engine needs to know about a type:
//! what it is tagged with, which abstractions it can be viewed as, what its
//! constructor takes, when it is eligible and what it provides once built.
//!
//! ```ignore
//! let descriptor = TypeDescriptor::builder::<UserService>()
//!     .marker(MARKER_SERVICE)
//!     .implements::<dyn UserLookup>(|svc| svc)
//!     .depends_on::<dyn UserStore>()
//!     .construct_with(|deps| {
//!         Ok(UserService::new(deps.cast::<dyn UserStore>(0)?))
//!     });
//! ```

use super::condition::Condition;
use super::instance::{AnyArc, Instance};
use super::marker::Marker;
use super::provider::Provider;
use super::type_key::TypeKey;
use crate::error::{BoxError, Error, Result};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Converts the erased concrete object into a boxed `Arc<dyn Abstraction>`
pub type UpcastFn = Arc<dyn Fn(AnyArc) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Constructor invoked with the resolved parameters, in declaration order
pub type ConstructorFn =
    Arc<dyn Fn(&Dependencies) -> std::result::Result<AnyArc, BoxError> + Send + Sync>;

/// Turn a caught panic payload into the error reported for the type
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> BoxError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    format!("panicked: {message}").into()
}

/// Markers and abstraction views shared by a descriptor and its instance
#[derive(Clone, Default)]
pub struct Capabilities {
    markers: BTreeSet<Marker>,
    abstractions: BTreeMap<TypeKey, UpcastFn>,
}

impl Capabilities {
    /// Declared markers
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Declared abstractions
    pub fn abstractions(&self) -> impl Iterator<Item = &TypeKey> {
        self.abstractions.keys()
    }

    /// Whether `marker` is declared
    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.markers.contains(marker)
    }

    /// Whether `abstraction` is declared
    pub fn implements(&self, abstraction: &TypeKey) -> bool {
        self.abstractions.contains_key(abstraction)
    }

    pub(crate) fn upcast_for(&self, abstraction: &TypeKey) -> Option<&UpcastFn> {
        self.abstractions.get(abstraction)
    }
}

/// Resolved constructor arguments
pub struct Dependencies {
    owner: TypeKey,
    instances: Vec<Instance>,
}

impl Dependencies {
    /// Arguments for `owner`, in parameter order
    pub fn new(owner: TypeKey, instances: Vec<Instance>) -> Self {
        Self { owner, instances }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the constructor takes no arguments
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw argument at `index`
    pub fn instance(&self, index: usize) -> Result<&Instance> {
        self.instances.get(index).ok_or_else(|| {
            Error::internal(format!(
                "{} has no constructor argument at position {index}",
                self.owner
            ))
        })
    }

    /// Concrete argument at `index`
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let instance = self.instance(index)?;
        instance.downcast::<T>().ok_or_else(|| {
            Error::internal(format!(
                "argument {index} of {} is {}, not {}",
                self.owner,
                instance.key(),
                TypeKey::of::<T>()
            ))
        })
    }

    /// Abstraction argument at `index`
    pub fn cast<I: ?Sized + Send + Sync + 'static>(&self, index: usize) -> Result<Arc<I>> {
        let instance = self.instance(index)?;
        instance.cast::<I>().ok_or_else(|| {
            Error::internal(format!(
                "argument {index} of {} ({}) cannot be viewed as {}",
                self.owner,
                instance.key(),
                TypeKey::of::<I>()
            ))
        })
    }

    /// First argument whose concrete type is `T`
    pub fn find<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.instances
            .iter()
            .find_map(Instance::downcast::<T>)
            .ok_or_else(|| {
                Error::internal(format!(
                    "{} declares no constructor argument of type {}",
                    self.owner,
                    TypeKey::of::<T>()
                ))
            })
    }
}

/// Immutable description of a constructible type
#[derive(Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    capabilities: Arc<Capabilities>,
    parameters: Vec<TypeKey>,
    conditions: Vec<Condition>,
    providers: Vec<Provider>,
    constructor: ConstructorFn,
}

impl TypeDescriptor {
    /// Start describing `T`
    pub fn builder<T: Any + Send + Sync>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    /// Identity of the described type
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Markers and abstractions
    pub fn capabilities(&self) -> &Arc<Capabilities> {
        &self.capabilities
    }

    /// Declared markers
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.capabilities.markers()
    }

    /// Declared abstractions
    pub fn abstractions(&self) -> impl Iterator<Item = &TypeKey> {
        self.capabilities.abstractions()
    }

    /// Whether the type declares `marker`
    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.capabilities.has_marker(marker)
    }

    /// Whether the type implements `abstraction`
    pub fn implements(&self, abstraction: &TypeKey) -> bool {
        self.capabilities.implements(abstraction)
    }

    /// Constructor parameter types, in order
    pub fn parameters(&self) -> &[TypeKey] {
        &self.parameters
    }

    /// Activation conditions, in order
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Providers declared on the type
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Invoke the constructor and wrap the result
    ///
    /// Failures of the user constructor, panics included, are reported as
    /// [`Error::ConstructionFailure`] for this type.
    pub fn construct(&self, dependencies: &Dependencies) -> Result<Instance> {
        let value = panic::catch_unwind(AssertUnwindSafe(|| (self.constructor)(dependencies)))
            .map_err(panic_message)
            .and_then(|outcome| outcome)
            .map_err(|source| Error::construction(self.key.clone(), source))?;
        Ok(Instance::new(
            self.key.clone(),
            value,
            Arc::clone(&self.capabilities),
        ))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("markers", &self.markers().collect::<Vec<_>>())
            .field("abstractions", &self.abstractions().collect::<Vec<_>>())
            .field("parameters", &self.parameters)
            .field("conditions", &self.conditions)
            .field("providers", &self.providers)
            .finish()
    }
}

/// Builder for [`TypeDescriptor`]
///
/// Finished by [`construct_with`](Self::construct_with) or
/// [`construct_default`](Self::construct_default), so a descriptor can never
/// lack a constructor.
pub struct TypeDescriptorBuilder<T> {
    key: TypeKey,
    capabilities: Capabilities,
    parameters: Vec<TypeKey>,
    conditions: Vec<Condition>,
    providers: Vec<Provider>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeDescriptorBuilder<T> {
    fn new() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            capabilities: Capabilities::default(),
            parameters: Vec::new(),
            conditions: Vec::new(),
            providers: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Tag the type with a marker
    pub fn marker(mut self, marker: impl Into<Marker>) -> Self {
        self.capabilities.markers.insert(marker.into());
        self
    }

    /// Declare that the type can be viewed as `I`
    pub fn implements<I: ?Sized + Send + Sync + 'static>(mut self, upcast: fn(Arc<T>) -> Arc<I>) -> Self {
        let view: UpcastFn = Arc::new(move |value: AnyArc| {
            let concrete = value.downcast::<T>().ok()?;
            Some(Box::new(upcast(concrete)) as Box<dyn Any + Send + Sync>)
        });
        self.capabilities
            .abstractions
            .insert(TypeKey::of::<I>(), view);
        self
    }

    /// Append a constructor parameter of type `D`
    pub fn depends_on<D: ?Sized + 'static>(self) -> Self {
        self.depends_on_key(TypeKey::of::<D>())
    }

    /// Append a constructor parameter by key
    pub fn depends_on_key(mut self, key: TypeKey) -> Self {
        self.parameters.push(key);
        self
    }

    /// Append an activation condition
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Register a provider deriving a `P` from the constructed `T`
    pub fn provides<P, F>(mut self, factory: F) -> Self
    where
        P: Any + Send + Sync,
        F: Fn(&T) -> std::result::Result<P, BoxError> + Send + Sync + 'static,
    {
        self.providers.push(Provider::new::<T, P, F>(factory));
        self
    }

    /// Finish with an explicit constructor
    pub fn construct_with<F>(self, constructor: F) -> TypeDescriptor
    where
        F: Fn(&Dependencies) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        let constructor: ConstructorFn =
            Arc::new(move |deps: &Dependencies| Ok(Arc::new(constructor(deps)?) as AnyArc));
        TypeDescriptor {
            key: self.key,
            capabilities: Arc::new(self.capabilities),
            parameters: self.parameters,
            conditions: self.conditions,
            providers: self.providers,
            constructor,
        }
    }

    /// Finish with `T::default()` as constructor
    pub fn construct_default(self) -> TypeDescriptor
    where
        T: Default,
    {
        self.construct_with(|_| Ok(T::default()))
    }
}
