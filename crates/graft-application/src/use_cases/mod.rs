//! Use cases
//!
//! - [`resolution_engine`] - resolving one type and its dependency subtree
//! - [`resolution_pass`] - resolving every root on a worker pool

pub mod resolution_engine;
pub mod resolution_pass;

pub use resolution_engine::{ResolutionEngine, ResolutionEngineBuilder, ResolutionSettings};
pub use resolution_pass::PassReport;
