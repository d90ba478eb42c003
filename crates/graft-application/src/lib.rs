//! # graft application layer
//!
//! Turns a catalog of type descriptors into a populated instance repository.
//!
//! ```text
//! TypeCatalog ──► ConditionEvaluator ──► EligibleCatalog
//!                                              │
//!                   BindingRegistry ◄──── ResolutionEngine ────► InstanceRepository
//!                   (bindings, providers)      │
//!                                        rayon worker pool
//! ```
//!
//! - [`domain_services`] - condition evaluation and eligibility filtering
//! - [`use_cases`] - the resolution engine and the root-level pass
//! - [`registry`] - compile-time registration of injectable types

pub mod domain_services;
pub mod registry;
pub mod use_cases;

pub use domain_services::{ConditionEvaluator, EligibleCatalog};
pub use registry::{INJECTABLES, InjectableEntry, LinkedTypeCatalog, list_injectables};
pub use use_cases::{PassReport, ResolutionEngine, ResolutionEngineBuilder, ResolutionSettings};
