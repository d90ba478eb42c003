//! Domain services
//!
//! Stateless policy applied to the catalog before resolution starts.

pub mod conditions;
pub mod eligibility;

pub use conditions::ConditionEvaluator;
pub use eligibility::EligibleCatalog;
