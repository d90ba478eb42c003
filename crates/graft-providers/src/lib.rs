//! # graft providers
//!
//! Default implementations of the ports declared in `graft_domain::ports`:
//!
//! | Port | Implementation |
//! |------|----------------|
//! | `InstanceRepository` | [`InMemoryInstanceRepository`] |
//! | `BindingRegistry` | [`InMemoryBindingRegistry`] |
//! | `TypeCatalog` | [`StaticTypeCatalog`] |
//! | `PropertySource` | [`MapPropertySource`], [`EnvPropertySource`] |

pub mod bindings;
pub mod catalog;
pub mod properties;
pub mod repository;

pub use bindings::InMemoryBindingRegistry;
pub use catalog::StaticTypeCatalog;
pub use properties::{EnvPropertySource, MapPropertySource};
pub use repository::InMemoryInstanceRepository;
