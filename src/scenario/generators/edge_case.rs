use super::ScenarioGenerator;
use crate::analysis::{EndpointAnalysis, FieldKind};
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{targets, write_success, RequestPlan, Target};
use crate::scenario::types::{ScenarioType, TestScenario};
use crate::scenario::values::{self, render_cell};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Boundary {
    Minimum(Value),
    Maximum(Value),
    MinLength(Value),
    MaxLength(Value),
    MinItems(Value),
    MaxItems(Value),
    Empty(Value),
    Absent,
}

impl Boundary {
    fn title(&self, target: &Target<'_>) -> String {
        let label = target.label();
        match self {
            Boundary::Minimum(v) => format!("Accept {label} at its minimum {}", render_cell(v)),
            Boundary::Maximum(v) => format!("Accept {label} at its maximum {}", render_cell(v)),
            Boundary::MinLength(v) => format!("Accept {label} at its minimum length {}", length(v)),
            Boundary::MaxLength(v) => format!("Accept {label} at its maximum length {}", length(v)),
            Boundary::MinItems(v) => format!("Accept {label} with the minimum of {} items", length(v)),
            Boundary::MaxItems(v) => format!("Accept {label} with the maximum of {} items", length(v)),
            Boundary::Empty(_) => format!("Accept an empty optional {label}"),
            Boundary::Absent => format!("Accept a request without the optional {label}"),
        }
    }
}

fn length(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

fn boundaries(target: &Target<'_>) -> Vec<Boundary> {
    let c = target.constraints;
    let mut out = Vec::new();
    if c.kind.is_numeric() {
        out.extend(values::minimum_boundary(c).map(Boundary::Minimum));
        out.extend(values::maximum_boundary(c).map(Boundary::Maximum));
    }
    if c.kind == FieldKind::String && !c.has_enum() {
        out.extend(values::min_length_value(c).map(Boundary::MinLength));
        out.extend(values::max_length_value(c).map(Boundary::MaxLength));
    }
    if c.kind == FieldKind::Array {
        out.extend(values::min_items_value(target.schema, c).map(Boundary::MinItems));
        out.extend(values::max_items_value(target.schema, c).map(Boundary::MaxItems));
    }
    if !target.required {
        let allows_empty = c.min_length.map_or(true, |m| m == 0)
            && c.min_items.map_or(true, |m| m == 0)
            && !c.has_enum();
        if allows_empty {
            out.extend(values::empty_value(c).map(Boundary::Empty));
        }
        out.push(Boundary::Absent);
    }
    out
}

/// One scenario per boundary value of each field.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeCaseGenerator;

impl ScenarioGenerator for EdgeCaseGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::EdgeCase
    }

    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool {
        targets(analysis).iter().any(|t| !boundaries(t).is_empty())
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        let mut scenarios = Vec::new();
        for target in targets(analysis) {
            for boundary in boundaries(&target) {
                let mut plan = RequestPlan::required_only(analysis);
                match &boundary {
                    Boundary::Absent => {
                        plan.omit(&target);
                    }
                    Boundary::Minimum(v)
                    | Boundary::Maximum(v)
                    | Boundary::MinLength(v)
                    | Boundary::MaxLength(v)
                    | Boundary::MinItems(v)
                    | Boundary::MaxItems(v)
                    | Boundary::Empty(v) => {
                        plan.set(&target, v.clone());
                    }
                }

                let mut builder = ScenarioBuilder::new(ScenarioType::EdgeCase, boundary.title(&target));
                plan.write_request(&mut builder);
                write_success(&mut builder, analysis);
                scenarios.push(builder.build());
            }
        }
        scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::test_support::analyze;

    const SPEC: &str = r#"
openapi: 3.1.0
info: { title: Search, version: "1.0" }
paths:
  /search:
    get:
      parameters:
        - { name: limit, in: query, required: true, schema: { type: integer, exclusiveMinimum: 0, maximum: 100 } }
        - { name: q, in: query, schema: { type: string, maxLength: 5 } }
      responses:
        "200": { description: ok }
  /tags:
    put:
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [tags]
              properties:
                tags:
                  type: array
                  minItems: 1
                  maxItems: 3
                  items: { type: string }
      responses:
        "204": { description: stored }
  /codes:
    get:
      parameters:
        - { name: code, in: query, required: true, schema: { type: string, pattern: "^[0-9]+$", minLength: 3, maxLength: 5 } }
        - { name: ref, in: query, required: true, schema: { type: string, format: uuid, minLength: 36 } }
        - name: labels
          in: query
          required: true
          schema: { type: array, uniqueItems: true, maxItems: 3, items: { type: string } }
        - { name: token, in: query, required: true, schema: { type: string, format: uuid, minLength: 10 } }
      responses:
        "200": { description: ok }
  /ping:
    get:
      responses:
        "200": { description: ok }
"#;

    #[test]
    fn test_numeric_and_string_boundaries() {
        let analysis = analyze(SPEC, "/search", "GET");
        let scenarios = EdgeCaseGenerator.generate(&analysis);
        let titles: Vec<&str> = scenarios.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Accept query parameter \"limit\" at its minimum 1",
                "Accept query parameter \"limit\" at its maximum 100",
                "Accept query parameter \"q\" at its maximum length 5",
                "Accept an empty optional query parameter \"q\"",
                "Accept a request without the optional query parameter \"q\"",
            ]
        );
        assert!(scenarios[2]
            .steps
            .iter()
            .any(|s| s.text == "the query parameter \"q\" is \"aaaaa\""));
    }

    #[test]
    fn test_item_count_boundaries() {
        let analysis = analyze(SPEC, "/tags", "PUT");
        let scenarios = EdgeCaseGenerator.generate(&analysis);
        assert_eq!(scenarios.len(), 2);
        let table = scenarios[1].data_table().unwrap();
        assert_eq!(table.rows[0], vec!["tags".to_string(), r#"["a","a","a"]"#.to_string()]);
        assert!(scenarios[1]
            .steps
            .iter()
            .any(|s| s.text == "the response status should be 204"));
    }

    #[test]
    fn test_nothing_to_vary() {
        let analysis = analyze(SPEC, "/ping", "GET");
        assert!(!EdgeCaseGenerator.can_generate(&analysis));
        assert!(EdgeCaseGenerator.generate(&analysis).is_empty());
    }

    #[test]
    fn test_boundaries_keep_pattern_format_and_uniqueness() {
        let analysis = analyze(SPEC, "/codes", "GET");
        let scenarios = EdgeCaseGenerator.generate(&analysis);
        let titles: Vec<&str> = scenarios.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Accept query parameter \"code\" at its minimum length 3",
                "Accept query parameter \"code\" at its maximum length 5",
                "Accept query parameter \"ref\" at its minimum length 36",
                "Accept query parameter \"labels\" with the maximum of 3 items",
            ]
        );
        let has_step = |index: usize, text: &str| scenarios[index].steps.iter().any(|s| s.text == text);
        assert!(has_step(0, "the query parameter \"code\" is \"000\""));
        assert!(has_step(1, "the query parameter \"code\" is \"00000\""));
        assert!(has_step(
            2,
            "the query parameter \"ref\" is \"123e4567-e89b-12d3-a456-426614174000\""
        ));
        assert!(has_step(3, r#"the query parameter "labels" is "["a","b","c"]""#));
    }
}
