//! Resolution Engine
//!
//! Depth-first resolution of a type and its constructor dependencies.
//!
//! ## Per-type lifecycle
//!
//! ```text
//! Unstarted ──► InProgress ──► Resolved
//!                   │
//!                   └────────► Failed
//! ```
//!
//! `InProgress` is tracked twice:
//!
//! - per chain, by [`ResolutionChain`], so that a type reached again while it
//!   is still being resolved on the same worker is reported as a cycle;
//! - per process, by a construction gate (`OnceCell`) per concrete type, so
//!   that concurrent demand for the same type runs its constructor once and
//!   every other worker blocks until the winner's instance is available.
//!
//! Before a gate is ever entered the reachable subgraph is verified without
//! constructing anything. A verified subgraph is acyclic, so two workers can
//! never wait on each other's gates.

use crate::domain_services::{ConditionEvaluator, EligibleCatalog};
use dashmap::DashMap;
use graft_domain::error::{Error, Result};
use graft_domain::ports::{BindingRegistry, InstanceRepository, TypeCatalog};
use graft_domain::value_objects::{
    Dependencies, Instance, Marker, Provider, TypeDescriptor, TypeKey,
};
use once_cell::sync::OnceCell;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Tunables of a resolution pass
#[derive(Debug, Clone)]
pub struct ResolutionSettings {
    /// Markers that make a type a root
    pub markers: BTreeSet<Marker>,
    /// Worker threads; `None` lets the pool pick one per CPU
    pub workers: Option<usize>,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            markers: Marker::defaults(),
            workers: None,
        }
    }
}

/// Keys currently being resolved by one worker, outermost first
#[derive(Debug, Default)]
pub(crate) struct ResolutionChain {
    keys: Vec<TypeKey>,
}

impl ResolutionChain {
    /// Push `key`; fails with the closed cycle when it is already on the chain
    pub(crate) fn enter(&mut self, key: &TypeKey) -> Result<()> {
        if let Some(start) = self.keys.iter().position(|k| k == key) {
            let mut cycle = self.keys[start..].to_vec();
            cycle.push(key.clone());
            return Err(Error::cyclic(cycle));
        }
        self.keys.push(key.clone());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.keys.pop();
    }
}

/// What a requested key turns out to be
enum Target {
    /// Already registered
    Existing(Instance),
    /// An eligible marker-tagged type
    Concrete(Arc<TypeDescriptor>),
    /// An abstraction and the concrete type it resolves to
    Alias(TypeKey),
    /// A type registered by a provider of another type
    Provided(Provider),
}

type ConstructionGate = Arc<OnceCell<Instance>>;

/// The resolution-and-instantiation engine
///
/// Owns the eligible catalog of one pass and shares the binding registry and
/// instance repository with whoever assembled it.
pub struct ResolutionEngine {
    pub(crate) eligible: EligibleCatalog,
    pub(crate) bindings: Arc<dyn BindingRegistry>,
    pub(crate) repository: Arc<dyn InstanceRepository>,
    pub(crate) settings: ResolutionSettings,
    gates: DashMap<TypeKey, ConstructionGate>,
    cancelled: AtomicBool,
    failure: Mutex<Option<Error>>,
    constructed: AtomicUsize,
}

impl ResolutionEngine {
    /// Start assembling an engine
    pub fn builder() -> ResolutionEngineBuilder {
        ResolutionEngineBuilder::default()
    }

    /// The repository the engine writes into
    pub fn repository(&self) -> &Arc<dyn InstanceRepository> {
        &self.repository
    }

    /// The binding registry the engine reads from
    pub fn bindings(&self) -> &Arc<dyn BindingRegistry> {
        &self.bindings
    }

    /// The condition-filtered catalog
    pub fn eligible(&self) -> &EligibleCatalog {
        &self.eligible
    }

    /// Settings in effect
    pub fn settings(&self) -> &ResolutionSettings {
        &self.settings
    }

    /// Constructors invoked so far
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Acquire)
    }

    /// Whether a failure has cancelled the current pass
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Resolve `key`, constructing it and its dependencies as needed
    ///
    /// Resolving the same key again returns the same instance.
    pub fn resolve(&self, key: &TypeKey) -> Result<Instance> {
        if let Some(existing) = self.repository.get(key) {
            return Ok(existing);
        }
        self.verify(std::slice::from_ref(key))?;
        self.resolve_in(key, key, &mut ResolutionChain::default())
    }

    /// Typed [`resolve`](Self::resolve) of a concrete type
    pub fn resolve_as<T: std::any::Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let key = TypeKey::of::<T>();
        self.resolve(&key)?
            .downcast::<T>()
            .ok_or_else(|| Error::internal(format!("instance registered for {key} has another type")))
    }

    /// Check that every key in `keys` can be built, without building anything
    ///
    /// Reports cycles, unresolved parameters and ambiguous bindings.
    pub fn verify(&self, keys: &[TypeKey]) -> Result<()> {
        let mut verified = HashSet::new();
        for key in keys {
            self.verify_in(key, key, &mut ResolutionChain::default(), &mut verified)?;
        }
        Ok(())
    }

    /// Abort the pass: in-flight chains stop at their next step
    ///
    /// The first non-cancellation error recorded is the one the pass reports.
    pub(crate) fn record_failure(&self, error: Error) {
        if !error.is_cancelled() {
            let mut slot = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                warn!(error = %error, "Resolution failed, cancelling pass");
                *slot = Some(error);
            }
        }
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn take_failure(&self) -> Option<Error> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    fn target(&self, key: &TypeKey, requested_by: &TypeKey) -> Result<Target> {
        if let Some(existing) = self.repository.get(key) {
            return Ok(Target::Existing(existing));
        }
        if self.bindings.is_abstraction(key) {
            let concrete = self.bindings.resolve_abstraction(key, requested_by)?;
            if &concrete != key {
                return Ok(Target::Alias(concrete));
            }
        }
        if let Some(descriptor) = self.eligible.root(key) {
            return Ok(Target::Concrete(Arc::clone(descriptor)));
        }
        if let Some(provider) = self.bindings.provider_of(key) {
            return Ok(Target::Provided(provider));
        }
        Err(Error::unresolved(requested_by.clone(), key.clone()))
    }

    /// Descriptor of a binding target or provider owner; markers are not required here
    fn descriptor_for(&self, concrete: &TypeKey, requested_by: &TypeKey) -> Result<Arc<TypeDescriptor>> {
        self.eligible
            .get(concrete)
            .cloned()
            .ok_or_else(|| Error::unresolved(requested_by.clone(), concrete.clone()))
    }

    fn is_resolvable(&self, key: &TypeKey) -> bool {
        self.repository.contains(key)
            || self.bindings.is_abstraction(key)
            || self.eligible.is_root(key)
            || self.bindings.provider_of(key).is_some()
    }

    fn check_parameters(&self, descriptor: &TypeDescriptor) -> Result<()> {
        match descriptor
            .parameters()
            .iter()
            .find(|parameter| !self.is_resolvable(parameter))
        {
            Some(missing) => Err(Error::unresolved(descriptor.key().clone(), missing.clone())),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    fn verify_in(
        &self,
        key: &TypeKey,
        requested_by: &TypeKey,
        chain: &mut ResolutionChain,
        verified: &mut HashSet<TypeKey>,
    ) -> Result<()> {
        if verified.contains(key) {
            return Ok(());
        }
        let outcome = match self.target(key, requested_by)? {
            Target::Existing(_) => Ok(()),
            Target::Concrete(descriptor) => self.verify_concrete(&descriptor, chain, verified),
            Target::Alias(concrete) => self.verify_through(key, &concrete, chain, verified),
            Target::Provided(provider) => self.verify_through(key, provider.owner(), chain, verified),
        };
        if outcome.is_ok() {
            verified.insert(key.clone());
        }
        outcome
    }

    fn verify_through(
        &self,
        key: &TypeKey,
        concrete: &TypeKey,
        chain: &mut ResolutionChain,
        verified: &mut HashSet<TypeKey>,
    ) -> Result<()> {
        if verified.contains(concrete) || self.repository.contains(concrete) {
            return Ok(());
        }
        chain.enter(key)?;
        let outcome = self
            .descriptor_for(concrete, key)
            .and_then(|descriptor| self.verify_concrete(&descriptor, chain, verified));
        chain.leave();
        outcome
    }

    fn verify_concrete(
        &self,
        descriptor: &TypeDescriptor,
        chain: &mut ResolutionChain,
        verified: &mut HashSet<TypeKey>,
    ) -> Result<()> {
        let key = descriptor.key();
        if verified.contains(key) {
            return Ok(());
        }
        chain.enter(key)?;
        let outcome = self.check_parameters(descriptor).and_then(|()| {
            descriptor
                .parameters()
                .iter()
                .try_for_each(|parameter| self.verify_in(parameter, key, chain, verified))
        });
        chain.leave();
        if outcome.is_ok() {
            verified.insert(key.clone());
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub(crate) fn resolve_in(
        &self,
        key: &TypeKey,
        requested_by: &TypeKey,
        chain: &mut ResolutionChain,
    ) -> Result<Instance> {
        self.ensure_active()?;
        match self.target(key, requested_by)? {
            Target::Existing(instance) => Ok(instance),
            Target::Concrete(descriptor) => self.resolve_concrete(&descriptor, chain),
            Target::Alias(concrete) => {
                chain.enter(key)?;
                let outcome = self.resolve_through(&concrete, key, chain);
                chain.leave();
                let instance = outcome?;
                Ok(self.repository.put(key, instance))
            }
            Target::Provided(provider) => {
                chain.enter(key)?;
                let outcome = self.resolve_through(provider.owner(), key, chain);
                chain.leave();
                outcome?;
                self.repository.get(key).ok_or_else(|| {
                    Error::internal(format!(
                        "provider of {key} on {} registered nothing",
                        provider.owner()
                    ))
                })
            }
        }
    }

    /// Resolve a binding target or provider owner through its construction gate
    fn resolve_through(
        &self,
        concrete: &TypeKey,
        requested_by: &TypeKey,
        chain: &mut ResolutionChain,
    ) -> Result<Instance> {
        match self.descriptor_for(concrete, requested_by) {
            Ok(descriptor) => self.resolve_concrete(&descriptor, chain),
            Err(unresolved) => self.repository.get(concrete).ok_or(unresolved),
        }
    }

    fn resolve_concrete(&self, descriptor: &TypeDescriptor, chain: &mut ResolutionChain) -> Result<Instance> {
        let key = descriptor.key();
        chain.enter(key)?;
        let gate = Arc::clone(self.gates.entry(key.clone()).or_default().value());
        let outcome = gate
            .get_or_try_init(|| {
                // Waiters retry a failed gate; cancelling first stops them before any constructor runs.
                self.construct(descriptor, chain)
                    .inspect_err(|_| self.cancelled.store(true, Ordering::Release))
            })
            .cloned();
        chain.leave();
        outcome
    }

    /// Runs inside the type's construction gate, so at most once per type
    fn construct(&self, descriptor: &TypeDescriptor, chain: &mut ResolutionChain) -> Result<Instance> {
        let key = descriptor.key();
        self.ensure_active()?;

        if let Some(existing) = self.repository.get(key) {
            self.run_providers(key, &existing)?;
            return Ok(existing);
        }

        self.check_parameters(descriptor)?;
        let arguments = descriptor
            .parameters()
            .iter()
            .map(|parameter| self.resolve_in(parameter, key, chain))
            .collect::<Result<Vec<_>>>()?;

        self.ensure_active()?;
        let instance = descriptor.construct(&Dependencies::new(key.clone(), arguments))?;
        self.constructed.fetch_add(1, Ordering::AcqRel);
        debug!(type_key = %key, "Constructed instance");

        let canonical = self.repository.put(key, instance);
        for abstraction in descriptor.abstractions() {
            let bound_here = self
                .bindings
                .resolve_abstraction(abstraction, key)
                .is_ok_and(|concrete| &concrete == key);
            if bound_here {
                self.repository.put(abstraction, canonical.clone());
            }
        }

        self.run_providers(key, &canonical)?;
        Ok(canonical)
    }

    fn run_providers(&self, owner: &TypeKey, instance: &Instance) -> Result<()> {
        for provider in self.bindings.providers_for(owner) {
            let registered_here = self
                .bindings
                .provider_of(provider.provides())
                .is_some_and(|registered| registered.owner() == owner);
            if !registered_here || self.repository.contains(provider.provides()) {
                continue;
            }
            let provided = provider.invoke(instance)?;
            debug!(owner = %owner, provides = %provider.provides(), "Provider registered instance");
            self.repository.put(provider.provides(), provided);
        }
        Ok(())
    }
}

/// Assembles a [`ResolutionEngine`] for one pass
///
/// `build` filters the catalog through the condition evaluator, records every
/// abstraction implemented by an eligible marker-tagged type as a discovered
/// implementation, and registers the providers declared by eligible types in
/// catalog order. When two owners provide the same type, the one listed first
/// in the catalog is the one that registers it.
#[derive(Default)]
pub struct ResolutionEngineBuilder {
    catalog: Option<Arc<dyn TypeCatalog>>,
    bindings: Option<Arc<dyn BindingRegistry>>,
    repository: Option<Arc<dyn InstanceRepository>>,
    evaluator: ConditionEvaluator,
    settings: ResolutionSettings,
}

impl ResolutionEngineBuilder {
    /// Catalog to resolve
    pub fn catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Binding registry holding explicit bindings and providers
    pub fn bindings(mut self, bindings: Arc<dyn BindingRegistry>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Repository to populate
    pub fn repository(mut self, repository: Arc<dyn InstanceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Condition evaluator
    pub fn evaluator(mut self, evaluator: ConditionEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Pass settings
    pub fn settings(mut self, settings: ResolutionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Filter the catalog and register discovered implementations and providers
    pub fn build(self) -> Result<ResolutionEngine> {
        let catalog = self
            .catalog
            .ok_or_else(|| Error::configuration("resolution engine requires a type catalog"))?;
        let bindings = self
            .bindings
            .ok_or_else(|| Error::configuration("resolution engine requires a binding registry"))?;
        let repository = self
            .repository
            .ok_or_else(|| Error::configuration("resolution engine requires an instance repository"))?;
        if self.settings.workers == Some(0) {
            return Err(Error::configuration("worker count must be greater than zero"));
        }

        let eligible = EligibleCatalog::build(
            catalog.as_ref(),
            &self.evaluator,
            repository.as_ref(),
            &self.settings.markers,
        );

        for root in eligible.roots() {
            if let Some(descriptor) = eligible.get(root) {
                for abstraction in descriptor.abstractions() {
                    bindings.register_implementation(abstraction.clone(), root.clone());
                }
            }
        }
        for descriptor in eligible.descriptors() {
            for provider in descriptor.providers() {
                bindings.register_provider(provider.clone());
            }
        }

        Ok(ResolutionEngine {
            eligible,
            bindings,
            repository,
            settings: self.settings,
            gates: DashMap::new(),
            cancelled: AtomicBool::new(false),
            failure: Mutex::new(None),
            constructed: AtomicUsize::new(0),
        })
    }
}
