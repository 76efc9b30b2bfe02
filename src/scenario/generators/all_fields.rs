use super::ScenarioGenerator;
use crate::analysis::EndpointAnalysis;
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{targets, write_success, RequestPlan};
use crate::scenario::types::{ScenarioType, TestScenario};

/// Sends every declared field with representative values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFieldsGenerator;

impl ScenarioGenerator for AllFieldsGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::AllFields
    }

    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool {
        analysis.has_optional_fields()
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        if !self.can_generate(analysis) {
            return Vec::new();
        }

        let mut builder =
            ScenarioBuilder::new(ScenarioType::AllFields, "Successful request with all fields")
                .description(format!(
                    "{} {} accepts every declared parameter and body field",
                    analysis.method, analysis.path
                ));
        RequestPlan::all_fields(analysis).write_request(&mut builder);
        write_success(&mut builder, analysis);

        // optional inputs the success body declares as well are expected back
        let echoed = analysis
            .success_response
            .as_ref()
            .map(|r| r.property_names())
            .unwrap_or_default();
        for target in targets(analysis) {
            if !target.required && echoed.contains(&target.name) {
                builder.then(format!(
                    "the response body should contain the field \"{}\"",
                    target.name
                ));
            }
        }

        vec![builder.build()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::test_support::analyze;

    const SPEC: &str = r#"
openapi: 3.1.0
info: { title: Pets, version: "1.0" }
paths:
  /pets:
    post:
      operationId: createPet
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: '#/components/schemas/NewPet' }
      responses:
        "201":
          description: created
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
  /ping:
    get:
      responses:
        "200": { description: ok }
components:
  schemas:
    NewPet:
      type: object
      required: [name]
      properties:
        name: { type: string }
        tag: { type: string }
        nickname: { type: string }
    Pet:
      type: object
      properties:
        id: { type: integer }
        name: { type: string }
        tag: { type: string }
"#;

    #[test]
    fn test_every_field_is_sent_and_optional_echo_asserted() {
        let analysis = analyze(SPEC, "/pets", "POST");
        assert!(AllFieldsGenerator.can_generate(&analysis));

        let scenarios = AllFieldsGenerator.generate(&analysis);
        assert_eq!(scenarios.len(), 1);
        let table = scenarios[0].data_table().unwrap();
        let fields: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(fields, vec!["name", "tag", "nickname"]);

        let texts: Vec<&str> = scenarios[0].steps.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"the response status should be 201"));
        assert!(texts.contains(&"the response body should match the \"Pet\" schema"));
        assert!(texts.contains(&"the response body should contain the field \"tag\""));
        assert!(!texts.contains(&"the response body should contain the field \"nickname\""));
        assert!(!texts.contains(&"the response body should contain the field \"name\""));
    }

    #[test]
    fn test_skipped_without_optional_fields() {
        let analysis = analyze(SPEC, "/ping", "GET");
        assert!(!AllFieldsGenerator.can_generate(&analysis));
        assert!(AllFieldsGenerator.generate(&analysis).is_empty());
    }
}
