//! Scenario generation: types, value synthesis, the generator strategies and
//! their registry.

mod builder;
mod factory;
pub mod generators;
mod pattern;
mod request;
mod types;
pub mod values;

pub use builder::ScenarioBuilder;
pub use factory::GeneratorFactory;
pub use generators::ScenarioGenerator;
pub use request::{targets, Credentials, ExpectedStatus, RequestPlan, Target, TargetSlot};
pub use types::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::analysis::{EndpointAnalysis, EndpointAnalyzer};
    use crate::spec::{build_endpoints, load_document_from_str, SpecFormat};

    /// Load a YAML document and analyze one of its endpoints.
    pub fn analyze(yaml: &str, path: &str, method: &str) -> EndpointAnalysis {
        let document = load_document_from_str(yaml, SpecFormat::Yaml).unwrap();
        let endpoint = build_endpoints(&document)
            .into_iter()
            .find(|e| e.path == path && e.method.as_str() == method)
            .unwrap();
        EndpointAnalyzer::new().analyze(&endpoint, &document).unwrap()
    }
}
