//! Condition evaluation
//!
//! Decides whether a type takes part in resolution at all. A type that fails
//! is treated as if it had never been discovered.

use graft_domain::ports::{InstanceRepository, PropertySource, TypeCatalog};
use graft_domain::value_objects::{Condition, ConditionContext, TypeDescriptor};
use std::sync::Arc;
use tracing::debug;

/// Evaluates the activation conditions of type descriptors
#[derive(Clone, Default)]
pub struct ConditionEvaluator {
    properties: Option<Arc<dyn PropertySource>>,
}

impl ConditionEvaluator {
    /// Evaluator without a property source; property conditions fail closed
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator reading properties from `properties`
    pub fn with_properties(properties: Arc<dyn PropertySource>) -> Self {
        Self {
            properties: Some(properties),
        }
    }

    /// Whether every condition of `descriptor` holds
    pub fn evaluate(
        &self,
        descriptor: &TypeDescriptor,
        repository: &dyn InstanceRepository,
        catalog: &dyn TypeCatalog,
    ) -> bool {
        let context = ConditionContext {
            descriptor,
            properties: self.properties.as_deref(),
            repository,
            catalog,
        };
        descriptor.conditions().iter().all(|condition| {
            let holds = Self::test(condition, &context);
            if !holds {
                debug!(type_key = %descriptor.key(), condition = ?condition, "Condition not satisfied");
            }
            holds
        })
    }

    fn test(condition: &Condition, context: &ConditionContext<'_>) -> bool {
        match condition {
            Condition::PropertyEquals { key, expected } => context
                .property(key)
                .is_some_and(|value| value.trim() == expected.as_str()),
            Condition::OnType(key) => context.type_present(key),
            Condition::Custom(tester) => tester.test(context),
        }
    }
}
