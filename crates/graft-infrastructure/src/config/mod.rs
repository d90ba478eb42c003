//! Configuration
//!
//! [`GraftConfig`] is assembled by [`ConfigLoader`] from defaults, a TOML file
//! and `GRAFT__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{GraftConfig, LoggingConfig, PropertiesConfig};
