use super::ScenarioGenerator;
use crate::analysis::EndpointAnalysis;
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{write_success, RequestPlan};
use crate::scenario::types::{ScenarioType, TestScenario};

/// Sends only what the endpoint requires, with minimal valid values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldsGenerator;

impl ScenarioGenerator for RequiredFieldsGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::RequiredFields
    }

    fn can_generate(&self, _analysis: &EndpointAnalysis) -> bool {
        true
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        let mut builder = ScenarioBuilder::new(
            ScenarioType::RequiredFields,
            "Successful request with only required fields",
        )
        .description(format!(
            "{} {} succeeds when only required inputs are supplied",
            analysis.method, analysis.path
        ));
        RequestPlan::required_only(analysis).write_request(&mut builder);
        write_success(&mut builder, analysis);
        vec![builder.build()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::test_support::analyze;
    use crate::scenario::types::StepKeyword;

    const SPEC: &str = r#"
openapi: 3.1.0
info: { title: Items, version: "1.0" }
paths:
  /items:
    get:
      operationId: listItems
      parameters:
        - { name: category, in: query, required: true, schema: { type: string, minLength: 3 } }
        - { name: page, in: query, required: true, schema: { type: integer, minimum: 1 } }
        - { name: sort, in: query, schema: { type: string } }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/ItemList' }
components:
  schemas:
    ItemList:
      type: array
      items: { type: string }
"#;

    #[test]
    fn test_only_required_parameters_are_sent() {
        let analysis = analyze(SPEC, "/items", "GET");
        let scenarios = RequiredFieldsGenerator.generate(&analysis);
        assert_eq!(scenarios.len(), 1);

        let texts: Vec<&str> = scenarios[0].steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "the API is available",
                "the query parameter \"category\" is \"aaa\"",
                "the query parameter \"page\" is \"1\"",
                "I send a GET request to \"/items\"",
                "the response status should be 200",
                "the response body should match the \"ItemList\" schema",
            ]
        );
        assert_eq!(scenarios[0].steps[0].keyword, StepKeyword::Given);
        assert_eq!(scenarios[0].steps[1].keyword, StepKeyword::And);
        assert_eq!(scenarios[0].steps[3].keyword, StepKeyword::When);
    }
}
