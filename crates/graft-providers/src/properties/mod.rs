//! Property source implementations

pub mod env;
pub mod map;

pub use env::EnvPropertySource;
pub use map::MapPropertySource;
