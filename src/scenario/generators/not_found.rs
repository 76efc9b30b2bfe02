use super::ScenarioGenerator;
use crate::analysis::EndpointAnalysis;
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{targets, ExpectedStatus, RequestPlan, Target};
use crate::scenario::types::{ScenarioType, TestScenario};
use crate::scenario::values::{non_existent_identifier, render_value};
use crate::spec::ParameterLocation;
use once_cell::sync::Lazy;
use regex::Regex;

static ID_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:id|ID|uuid|slug|key|code|.*[_-](?:id|ID|Id)|.*[a-z0-9]Id|.*[a-z0-9]ID)$")
        .expect("identifier regex should be valid")
});

/// Whether a parameter name looks like a resource identifier.
pub fn is_id_like(name: &str) -> bool {
    ID_LIKE.is_match(name)
}

/// Requests a resource by an identifier that should not exist.
#[derive(Debug, Clone, Default)]
pub struct NotFoundGenerator {
    identifier: Option<String>,
}

impl NotFoundGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `identifier` instead of a synthesized one.
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        NotFoundGenerator {
            identifier: Some(identifier.into()),
        }
    }

    /// The last id-like path parameter, else the parameter in the final path segment.
    fn identifying<'a>(&self, analysis: &'a EndpointAnalysis) -> Option<Target<'a>> {
        let path_targets: Vec<Target<'a>> = targets(analysis)
            .into_iter()
            .filter(|t| t.location == Some(ParameterLocation::Path))
            .collect();

        if let Some(found) = path_targets.iter().rev().find(|t| is_id_like(t.name)) {
            return Some(found.clone());
        }

        let last_segment = analysis.path.rsplit('/').find(|s| !s.is_empty())?;
        let name = last_segment.strip_prefix('{')?.strip_suffix('}')?;
        path_targets.into_iter().find(|t| t.name == name)
    }
}

impl ScenarioGenerator for NotFoundGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::NotFound
    }

    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool {
        self.identifying(analysis).is_some()
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        let Some(target) = self.identifying(analysis) else {
            return Vec::new();
        };

        let identifier = non_existent_identifier(target.constraints, self.identifier.as_deref());
        let mut builder = ScenarioBuilder::new(
            ScenarioType::NotFound,
            format!("Request with a non-existent \"{}\"", target.name),
        )
        .description(format!(
            "No resource exists for {} \"{}\"",
            target.name,
            render_value(&identifier)
        ));

        let mut plan = RequestPlan::required_only(analysis);
        plan.set(&target, identifier);
        plan.write_request(&mut builder);
        builder.then(ExpectedStatus::Code(404).step());
        vec![builder.build()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::test_support::analyze;

    const SPEC: &str = r#"
openapi: 3.1.0
info: { title: Shop, version: "1.0" }
paths:
  /users/{userId}/orders/{orderId}:
    get:
      parameters:
        - { name: userId, in: path, required: true, schema: { type: integer } }
        - { name: orderId, in: path, required: true, schema: { type: string, format: uuid } }
      responses:
        "200": { description: ok }
        "404": { description: missing }
  /files/{name}:
    get:
      parameters:
        - { name: name, in: path, required: true, schema: { type: string } }
      responses:
        "200": { description: ok }
  /files/{name}/meta:
    get:
      parameters:
        - { name: name, in: path, required: true, schema: { type: string } }
      responses:
        "200": { description: ok }
  /health:
    get:
      responses:
        "200": { description: ok }
"#;

    #[test]
    fn test_id_like_names() {
        for name in ["id", "userId", "user_id", "order-id", "uuid", "petID"] {
            assert!(is_id_like(name), "{name}");
        }
        for name in ["name", "idea", "valid", "status"] {
            assert!(!is_id_like(name), "{name}");
        }
    }

    #[test]
    fn test_last_id_like_path_parameter_is_substituted() {
        let analysis = analyze(SPEC, "/users/{userId}/orders/{orderId}", "GET");
        let scenarios = NotFoundGenerator::new().generate(&analysis);
        assert_eq!(scenarios.len(), 1);
        let texts: Vec<&str> = scenarios[0].steps.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"the path parameter \"userId\" is \"1\""));
        assert!(texts.contains(&"the path parameter \"orderId\" is \"00000000-0000-0000-0000-000000000000\""));
        assert_eq!(texts.last(), Some(&"the response status should be 404"));
    }

    #[test]
    fn test_final_segment_parameter_and_configured_identifier() {
        let analysis = analyze(SPEC, "/files/{name}", "GET");
        let scenarios = NotFoundGenerator::with_identifier("missing.txt").generate(&analysis);
        assert_eq!(scenarios.len(), 1);
        assert!(scenarios[0]
            .steps
            .iter()
            .any(|s| s.text == "the path parameter \"name\" is \"missing.txt\""));
    }

    #[test]
    fn test_skips_without_identifying_parameter() {
        let generator = NotFoundGenerator::new();
        for path in ["/health", "/files/{name}/meta"] {
            let analysis = analyze(SPEC, path, "GET");
            assert!(!generator.can_generate(&analysis));
            assert!(generator.generate(&analysis).is_empty());
        }
    }
}
