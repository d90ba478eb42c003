//! Composition root
//!
//! [`ContainerBuilder`] assembles the ports and runs the resolution pass;
//! [`Container`] exposes the populated graph.

pub mod bootstrap;

pub use bootstrap::{Container, ContainerBuilder, init_container};
