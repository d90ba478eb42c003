//! Container Bootstrap - composition root
//!
//! Wires the configured ports into a [`ResolutionEngine`] and runs the
//! resolution pass, either before the container is handed out or in the
//! background.
//!
//! ```text
//! GraftConfig ──► ContainerBuilder ──► ResolutionEngine ──► Container
//!                   ↑      ↑                  │
//!               catalog  bindings      spawn_blocking(run)
//!               (linkme) (config)             │
//!                                      wait_ready() ◄─┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let container = init_container(GraftConfig::default()).await?;
//! let service = container.get::<UserService>().expect("registered");
//! let store = container.get_as::<dyn UserStore>().expect("bound");
//! ```

use crate::config::GraftConfig;
use crate::config::loader::validate_config;
use crate::error_ext::ErrorContext;
use crate::properties::FigmentPropertySource;
use graft_application::{ConditionEvaluator, LinkedTypeCatalog, PassReport, ResolutionEngine};
use graft_domain::error::{Error, Result};
use graft_domain::ports::{BindingRegistry, InstanceRepository, PropertySource, TypeCatalog};
use graft_domain::value_objects::{Instance, Marker, TypeKey};
use graft_providers::{InMemoryBindingRegistry, InMemoryInstanceRepository};
use std::any::Any;
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

type PendingPass = JoinHandle<Result<PassReport>>;

/// Build a container from configuration with the default ports
pub async fn init_container(config: GraftConfig) -> Result<Container> {
    ContainerBuilder::new(config).build().await
}

/// Assembles a [`Container`]
///
/// Every port defaults to the in-process implementation: the linked
/// injectable catalog, the in-memory repository and binding registry, and a
/// Figment property source built from `config.properties`.
pub struct ContainerBuilder {
    config: GraftConfig,
    catalog: Option<Arc<dyn TypeCatalog>>,
    repository: Option<Arc<dyn InstanceRepository>>,
    bindings: Option<Arc<dyn BindingRegistry>>,
    properties: Option<Arc<dyn PropertySource>>,
    extra_bindings: Vec<(TypeKey, TypeKey)>,
}

impl ContainerBuilder {
    /// Start from `config`
    pub fn new(config: GraftConfig) -> Self {
        Self {
            config,
            catalog: None,
            repository: None,
            bindings: None,
            properties: None,
            extra_bindings: Vec::new(),
        }
    }

    /// Resolve this catalog instead of the linked injectables
    pub fn with_catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Populate this repository; pre-registered instances satisfy dependencies
    pub fn with_repository(mut self, repository: Arc<dyn InstanceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use this binding registry
    pub fn with_bindings(mut self, bindings: Arc<dyn BindingRegistry>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Evaluate property conditions against this source
    pub fn with_properties(mut self, properties: Arc<dyn PropertySource>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Bind abstraction `A` to concrete `C`; overrides a configured binding for `A`
    pub fn bind<A: ?Sized + 'static, C: ?Sized + 'static>(mut self) -> Self {
        self.extra_bindings
            .push((TypeKey::of::<A>(), TypeKey::of::<C>()));
        self
    }

    /// Build the container and start the resolution pass
    ///
    /// With `wait_until_completion` the pass has finished (or failed) when
    /// this returns. Otherwise the container comes back at once and
    /// [`Container::wait_ready`] reports the outcome.
    pub async fn build(self) -> Result<Container> {
        let wait = self.config.wait_until_completion;
        let engine = Arc::new(self.engine()?);
        let pass = {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || engine.run())
        };

        let container = Container {
            engine,
            pending: Mutex::new(Some(pass)),
            report: OnceLock::new(),
        };
        if wait {
            container.wait_ready().await?;
        } else {
            info!("Resolution pass running in the background");
        }
        Ok(container)
    }

    /// Build the container, running the pass on the calling thread
    pub fn build_blocking(self) -> Result<Container> {
        let engine = Arc::new(self.engine()?);
        let report = engine.run()?;
        Ok(Container {
            engine,
            pending: Mutex::new(None),
            report: OnceLock::from(report),
        })
    }

    fn engine(self) -> Result<ResolutionEngine> {
        validate_config(&self.config)?;

        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(LinkedTypeCatalog::discover()));
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryInstanceRepository::new()));
        let bindings = self
            .bindings
            .unwrap_or_else(|| Arc::new(InMemoryBindingRegistry::new()));
        let properties = self.properties.unwrap_or_else(|| {
            Arc::new(FigmentPropertySource::from_config(&self.config.properties))
        });

        for (abstraction, concrete) in self
            .config
            .explicit_bindings()
            .into_iter()
            .chain(self.extra_bindings)
        {
            bindings.bind(abstraction, concrete);
        }

        info!(
            source = properties.source_name(),
            workers = ?self.config.workers,
            "Assembling resolution engine"
        );
        ResolutionEngine::builder()
            .catalog(catalog)
            .bindings(bindings)
            .repository(repository)
            .evaluator(ConditionEvaluator::with_properties(properties))
            .settings(self.config.resolution_settings())
            .build()
    }
}

/// The populated object graph
///
/// Lookups read the repository directly. While a background pass is still
/// running they may miss instances that are not built yet; await
/// [`wait_ready`](Self::wait_ready) first when that matters.
pub struct Container {
    engine: Arc<ResolutionEngine>,
    pending: Mutex<Option<PendingPass>>,
    report: OnceLock<PassReport>,
}

impl Container {
    /// Wait for the resolution pass and return its report
    ///
    /// The first caller after a failed pass receives the failure; later calls
    /// return [`Error::Cancelled`].
    pub async fn wait_ready(&self) -> Result<PassReport> {
        let mut pending = self.pending.lock().await;
        if let Some(pass) = pending.take() {
            let report = pass.await.pass_context()??;
            let _ = self.report.set(report);
        }
        match self.report.get() {
            Some(report) => Ok(report.clone()),
            None => Err(Error::Cancelled),
        }
    }

    /// Whether the pass has completed successfully
    pub fn is_ready(&self) -> bool {
        self.report.get().is_some()
    }

    /// Report of the completed pass
    pub fn report(&self) -> Option<&PassReport> {
        self.report.get()
    }

    /// The engine that populated the container
    pub fn engine(&self) -> &Arc<ResolutionEngine> {
        &self.engine
    }

    /// The populated repository
    pub fn repository(&self) -> &Arc<dyn InstanceRepository> {
        self.engine.repository()
    }

    /// Raw instance registered under `key`
    pub fn instance(&self, key: &TypeKey) -> Option<Instance> {
        self.repository().get(key)
    }

    /// Singleton of concrete type `T`
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance(&TypeKey::of::<T>())?.downcast::<T>()
    }

    /// Singleton registered under abstraction `I`
    pub fn get_as<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        self.instance(&TypeKey::of::<I>())?.cast::<I>()
    }

    /// Resolve `T` on demand, building it if the pass did not
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.engine.resolve_as::<T>()
    }

    /// Instances whose type declares `marker`
    pub fn query_by_marker(&self, marker: impl Into<Marker>) -> Vec<Instance> {
        self.repository().query_by_marker(&marker.into())
    }

    /// Every instance implementing `I`, viewed as `I`
    pub fn query_by_abstraction<I: ?Sized + Send + Sync + 'static>(&self) -> Vec<Arc<I>> {
        self.repository()
            .query_by_abstraction(&TypeKey::of::<I>())
            .iter()
            .filter_map(Instance::cast::<I>)
            .collect()
    }

    /// Instances declaring `marker` and implementing `I`, viewed as `I`
    pub fn query_by_marker_and_abstraction<I: ?Sized + Send + Sync + 'static>(
        &self,
        marker: impl Into<Marker>,
    ) -> Vec<Arc<I>> {
        self.repository()
            .query_by_marker_and_abstraction(&marker.into(), &TypeKey::of::<I>())
            .iter()
            .filter_map(Instance::cast::<I>)
            .collect()
    }
}
