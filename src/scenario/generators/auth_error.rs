use super::ScenarioGenerator;
use crate::analysis::EndpointAnalysis;
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{Credentials, ExpectedStatus, RequestPlan};
use crate::scenario::types::{ScenarioType, TestScenario};

/// One Scenario Outline per security scheme, run with missing and invalid credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthErrorGenerator;

impl ScenarioGenerator for AuthErrorGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::AuthError
    }

    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool {
        analysis.requires_authentication()
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        if !self.can_generate(analysis) {
            return Vec::new();
        }
        let status = ExpectedStatus::Code(analysis.error_status(&[401, 403], 401));

        analysis
            .security_schemes()
            .into_iter()
            .map(|scheme| {
                let mut builder = ScenarioBuilder::new(
                    ScenarioType::AuthError,
                    format!("Reject request with <credential_state> \"{}\" credentials", scheme.name),
                )
                .description(format!("Requests must carry a valid {}", scheme.kind.credential_label()));

                let mut plan = RequestPlan::required_only(analysis);
                plan.credentials(Credentials::Custom(format!(
                    "the \"{}\" credentials are <credential_state>",
                    scheme.name
                )));
                plan.write_request(&mut builder);
                builder.then(status.step());
                builder.examples(
                    &["credential_state"],
                    vec![vec!["missing".to_string()], vec!["invalid".to_string()]],
                );
                builder.build()
            })
            .collect()
    }
}
