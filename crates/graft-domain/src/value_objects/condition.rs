//! Activation conditions

use super::descriptor::TypeDescriptor;
use super::type_key::TypeKey;
use crate::ports::{InstanceRepository, PropertySource, TypeCatalog};
use std::fmt;
use std::sync::Arc;

/// A single activation condition declared on a type
///
/// All conditions of a type must hold for it to be eligible.
#[derive(Clone)]
pub enum Condition {
    /// Property `key` must be present and equal to `expected`
    PropertyEquals {
        /// Property key
        key: String,
        /// Expected value, compared case-sensitively
        expected: String,
    },
    /// The given type must be registered or declared in the catalog
    OnType(TypeKey),
    /// User-supplied predicate
    Custom(Arc<dyn ConditionTester>),
}

impl Condition {
    /// `PropertyEquals` shorthand
    pub fn property_equals(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::PropertyEquals {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// `OnType` for a Rust type
    pub fn on_type<T: ?Sized + 'static>() -> Self {
        Self::OnType(TypeKey::of::<T>())
    }

    /// Wrap a custom tester
    pub fn custom(tester: impl ConditionTester + 'static) -> Self {
        Self::Custom(Arc::new(tester))
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyEquals { key, expected } => {
                write!(f, "PropertyEquals({key} == {expected:?})")
            }
            Self::OnType(key) => write!(f, "OnType({key})"),
            Self::Custom(tester) => write!(f, "Custom({})", tester.name()),
        }
    }
}

/// Pluggable condition kind
pub trait ConditionTester: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Whether the condition holds
    fn test(&self, context: &ConditionContext<'_>) -> bool;
}

/// What a condition may consult while being evaluated
pub struct ConditionContext<'a> {
    /// Type whose eligibility is being decided
    pub descriptor: &'a TypeDescriptor,
    /// External key/value source, if one is configured
    pub properties: Option<&'a dyn PropertySource>,
    /// Instances registered so far
    pub repository: &'a dyn InstanceRepository,
    /// The unfiltered catalog
    pub catalog: &'a dyn TypeCatalog,
}

impl ConditionContext<'_> {
    /// Look up a property; `None` when absent or when no source is configured
    pub fn property(&self, key: &str) -> Option<String> {
        self.properties.and_then(|source| source.lookup(key))
    }

    /// Whether `key` is registered or declared
    pub fn type_present(&self, key: &TypeKey) -> bool {
        self.repository.contains(key) || self.catalog.declares(key)
    }
}
