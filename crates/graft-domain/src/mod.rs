//! # graft domain layer
//!
//! Core types of the dependency-injection engine. Nothing in this crate
//! introspects Rust types at runtime: every constructible type is described by
//! a hand-built or registry-built [`TypeDescriptor`], and every constructed
//! object travels as a type-erased [`Instance`].
//!
//! ## Contents
//!
//! - [`value_objects`] - type identity, markers, conditions, descriptors, instances, providers
//! - [`ports`] - traits implemented by the provider and infrastructure crates
//! - [`error`] - the single error type shared by every layer

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
