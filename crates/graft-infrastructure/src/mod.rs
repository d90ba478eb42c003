//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the resolution engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`constants`] | Centralized configuration constants |
//! | [`di`] | Composition root: container builder and container |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`logging`] | Structured logging with tracing |
//! | [`properties`] | Figment-backed property source |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod properties;

pub use config::{ConfigLoader, GraftConfig, LoggingConfig, PropertiesConfig};
pub use di::{Container, ContainerBuilder, init_container};
pub use error_ext::ErrorContext;
pub use properties::FigmentPropertySource;
