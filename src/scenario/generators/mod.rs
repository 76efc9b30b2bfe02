//! One generator per scenario type.

mod all_fields;
mod auth_error;
mod edge_case;
mod not_found;
mod required_fields;
mod validation_error;

pub use all_fields::AllFieldsGenerator;
pub use auth_error::AuthErrorGenerator;
pub use edge_case::EdgeCaseGenerator;
pub use not_found::NotFoundGenerator;
pub use required_fields::RequiredFieldsGenerator;
pub use validation_error::ValidationErrorGenerator;

use super::types::{ScenarioType, TestScenario};
use crate::analysis::EndpointAnalysis;

/// Strategy for one scenario type.
///
/// Implementations are stateless with respect to documents: they only read
/// the [`EndpointAnalysis`] and never resolve references themselves.
pub trait ScenarioGenerator: Send + Sync {
    /// The type this generator produces.
    fn scenario_type(&self) -> ScenarioType;

    /// Whether the analysis carries what this generator needs.
    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool;

    /// Scenarios for the endpoint; empty when [`can_generate`](Self::can_generate) is false.
    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario>;
}
