#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use oas_gherkin::spec::EndpointFilter;
use oas_gherkin::{GeneratorConfig, OutputFormat, ScenarioService, ScenarioType};
use std::sync::atomic::AtomicBool;

const ITEM_LOOKUP_SPEC: &str = r#"openapi: 3.1.0
info:
  title: Items
  version: "1.0.0"
components:
  securitySchemes:
    ApiKey:
      type: apiKey
      in: header
      name: X-API-Key
paths:
  /items/{id}:
    get:
      security:
        - ApiKey: []
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
      responses:
        "200":
          description: The item
        "404":
          description: No such item
"#;

#[test]
fn test_item_lookup_generates_expected_types() {
    let document = common::document(ITEM_LOOKUP_SPEC);
    let mut service = ScenarioService::from_document(document, GeneratorConfig::default());

    let scenarios = service.generate_scenarios("/items/{id}", "GET", None).unwrap();
    let count = |t: ScenarioType| scenarios.iter().filter(|s| s.scenario_type == t).count();

    assert!(count(ScenarioType::RequiredFields) >= 1);
    assert!(count(ScenarioType::NotFound) >= 1);
    assert!(count(ScenarioType::AuthError) >= 1);
    assert_eq!(count(ScenarioType::ValidationError), 0);

    let not_found = scenarios
        .iter()
        .find(|s| s.scenario_type == ScenarioType::NotFound)
        .unwrap();
    assert!(not_found
        .steps
        .iter()
        .any(|s| s.text.starts_with("the path parameter \"id\" is \"nonexistent")));

    let auth = scenarios
        .iter()
        .find(|s| s.scenario_type == ScenarioType::AuthError)
        .unwrap();
    let examples = auth.examples.as_ref().unwrap();
    assert!(examples.rows.contains(&vec!["missing".to_string()]));
}

#[test]
fn test_summaries_follow_scenarios() {
    let document = common::document(ITEM_LOOKUP_SPEC);
    let mut service = ScenarioService::from_document(document, GeneratorConfig::default());
    let scenarios = service.generate_scenarios("/items/{id}", "get", None).unwrap();

    let summaries = ScenarioService::summarize(&scenarios);
    assert_eq!(summaries.len(), scenarios.len());
    for (summary, scenario) in summaries.iter().zip(&scenarios) {
        assert_eq!(summary.title, scenario.title);
        assert_eq!(summary.step_count, scenario.steps.len());
        assert_eq!(summary.outline, scenario.is_outline());
    }
}

#[test]
fn test_requested_types_only() {
    let document = common::document(ITEM_LOOKUP_SPEC);
    let mut service = ScenarioService::from_document(document, GeneratorConfig::default());
    let scenarios = service
        .generate_scenarios(
            "/items/{id}",
            "GET",
            Some(&[ScenarioType::AuthError, ScenarioType::ValidationError]),
        )
        .unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].scenario_type, ScenarioType::AuthError);
}

#[test]
fn test_unknown_endpoint_is_reported() {
    let mut service = common::inventory_service();
    let err = service
        .generate_scenarios("/items/{id}", "DELETE", None)
        .unwrap_err();
    assert_eq!(err.kind(), "endpoint_not_found");
    assert_eq!(err.report().details["method"], "DELETE");
}

#[test]
fn test_batch_over_document() {
    let mut service = common::inventory_service();
    let cancel = AtomicBool::new(false);

    let outcomes = service.generate_all_features(&EndpointFilter::default(), None, &cancel);
    let ids: Vec<&str> = outcomes
        .iter()
        .map(|o| o.endpoint.operation_id.as_str())
        .collect();
    assert_eq!(ids, vec!["listItems", "createItem", "getItem", "get_health"]);

    for outcome in &outcomes {
        let feature = outcome.result.as_ref().unwrap();
        let text = service.export_feature(feature, OutputFormat::Gherkin).unwrap();
        assert!(text.contains("Feature: "));
    }

    let tagged = service.generate_all_features(
        &EndpointFilter {
            tag: Some("items".to_string()),
            ..EndpointFilter::default()
        },
        Some(&[ScenarioType::RequiredFields]),
        &cancel,
    );
    assert_eq!(tagged.len(), 3);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_file(dir.path(), "openapi.yaml", ITEM_LOOKUP_SPEC);
    let service = ScenarioService::load(&path, GeneratorConfig::default()).unwrap();
    assert_eq!(service.document().title(), "Items");
    assert_eq!(service.endpoints().len(), 1);
    assert_eq!(service.endpoints()[0].operation_id, "get_items_id");

    let err = ScenarioService::load(&dir.path().join("missing.yaml"), GeneratorConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), "io");
}
