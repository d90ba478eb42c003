//! # graft
//!
//! Builds an application's object graph at startup. Types tagged with a
//! marker (`Service`, `Repository`, ...) are discovered, filtered by their
//! activation conditions, and constructed in dependency order on a worker
//! pool. Every concrete type is constructed at most once; the singletons are
//! stored in an instance repository and shared under their own type and every
//! abstraction bound to them.
//!
//! ## Example
//!
//! ```ignore
//! use graft::prelude::*;
//!
//! trait UserStore: Send + Sync {}
//!
//! #[derive(Default)]
//! struct MemoryUserStore;
//! impl UserStore for MemoryUserStore {}
//!
//! struct UserService {
//!     store: Arc<dyn UserStore>,
//! }
//!
//! #[graft::linkme::distributed_slice(INJECTABLES)]
//! #[linkme(crate = graft::linkme)]
//! static MEMORY_USER_STORE: InjectableEntry = InjectableEntry {
//!     name: "memory_user_store",
//!     describe: || {
//!         TypeDescriptor::builder::<MemoryUserStore>()
//!             .marker(MARKER_REPOSITORY)
//!             .implements::<dyn UserStore>(|store| store)
//!             .construct_default()
//!     },
//! };
//!
//! #[graft::linkme::distributed_slice(INJECTABLES)]
//! #[linkme(crate = graft::linkme)]
//! static USER_SERVICE: InjectableEntry = InjectableEntry {
//!     name: "user_service",
//!     describe: || {
//!         TypeDescriptor::builder::<UserService>()
//!             .marker(MARKER_SERVICE)
//!             .depends_on::<dyn UserStore>()
//!             .construct_with(|deps| Ok(UserService { store: deps.cast(0)? }))
//!     },
//! };
//!
//! let container = init_container(GraftConfig::default()).await?;
//! let service = container.get::<UserService>();
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type keys, descriptors, instances, errors and port traits
//! - `application` - condition evaluation and the resolution engine
//! - `providers` - in-memory repository, binding registry, catalogs and property sources
//! - `infrastructure` - configuration, logging and the container

/// Domain layer - descriptors, instances, errors and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use graft_domain::*;
}

/// Application layer - condition evaluation and the resolution engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use graft_application::*;
}

/// Default port implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use graft_providers::*;
}

/// Infrastructure layer - configuration, logging and the container
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use graft_infrastructure::*;
}

pub use linkme;

/// Everything needed to declare injectables and bootstrap a container
pub mod prelude {
    pub use graft_application::{INJECTABLES, InjectableEntry};
    pub use graft_domain::constants::*;
    pub use graft_domain::error::{BoxError, Error, Result};
    pub use graft_domain::value_objects::{
        Condition, ConditionContext, ConditionTester, Dependencies, Instance, Marker,
        TypeDescriptor, TypeKey,
    };
    pub use graft_infrastructure::{Container, ContainerBuilder, GraftConfig, init_container};
    pub use std::sync::Arc;
}

// Re-export commonly used types at the crate root
pub use domain::{Error, Result};
pub use infrastructure::{Container, ContainerBuilder, GraftConfig, init_container};
