//! Port traits
//!
//! Boundaries of the engine. Default implementations live in
//! `graft-providers`; every port can be replaced through the container
//! builder as long as the contract documented here is kept.

pub mod bindings;
pub mod catalog;
pub mod properties;
pub mod repository;

pub use bindings::BindingRegistry;
pub use catalog::TypeCatalog;
pub use properties::PropertySource;
pub use repository::InstanceRepository;
