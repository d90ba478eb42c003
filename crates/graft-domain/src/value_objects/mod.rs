//! Value objects of the object-graph model
//!
//! - [`TypeKey`] and [`Marker`] identify types and capability tags
//! - [`TypeDescriptor`] describes how to build a type
//! - [`Instance`] is a constructed, shared singleton
//! - [`Provider`] derives a secondary instance from a constructed one
//! - [`Condition`] gates whether a type is eligible at all

pub mod condition;
pub mod descriptor;
pub mod instance;
pub mod marker;
pub mod provider;
pub mod type_key;

pub use condition::{Condition, ConditionContext, ConditionTester};
pub use descriptor::{Capabilities, ConstructorFn, Dependencies, TypeDescriptor, TypeDescriptorBuilder};
pub use instance::{AnyArc, Instance};
pub use marker::Marker;
pub use provider::{Provider, ProviderFn};
pub use type_key::TypeKey;
