#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use oas_gherkin::scenario::generators::{
    AllFieldsGenerator, AuthErrorGenerator, EdgeCaseGenerator, NotFoundGenerator,
    RequiredFieldsGenerator, ValidationErrorGenerator,
};
use oas_gherkin::scenario::{ScenarioGenerator, StepKeyword, TestScenario};
use oas_gherkin::EndpointAnalysis;

fn analysis(path: &str, method: &str) -> EndpointAnalysis {
    common::inventory_service()
        .analyze_endpoint(path, method)
        .unwrap()
}

fn parameter_steps(scenario: &TestScenario) -> Vec<&str> {
    scenario
        .steps
        .iter()
        .map(|s| s.text.as_str())
        .filter(|t| t.starts_with("the query parameter"))
        .collect()
}

fn titles(scenarios: &[TestScenario]) -> Vec<&str> {
    scenarios.iter().map(|s| s.title.as_str()).collect()
}

#[test]
fn test_required_fields_vs_all_fields() {
    let analysis = analysis("/items", "GET");

    let required = RequiredFieldsGenerator.generate(&analysis);
    assert_eq!(required.len(), 1);
    assert_eq!(parameter_steps(&required[0]).len(), 2);

    assert!(AllFieldsGenerator.can_generate(&analysis));
    let all = AllFieldsGenerator.generate(&analysis);
    assert_eq!(all.len(), 1);
    assert_eq!(parameter_steps(&all[0]).len(), 3);
    assert!(parameter_steps(&all[0])
        .iter()
        .any(|t| t.starts_with("the query parameter \"limit\"")));
}

#[test]
fn test_required_fields_steps_shape() {
    let analysis = analysis("/items", "POST");
    let scenario = &RequiredFieldsGenerator.generate(&analysis)[0];

    let keywords: Vec<StepKeyword> = scenario.steps.iter().map(|s| s.keyword).collect();
    assert_eq!(keywords[0], StepKeyword::Given);
    assert_eq!(scenario.steps[0].text, "the API is available");
    assert_eq!(scenario.steps[1].text, "valid \"ApiKey\" credentials are provided");
    assert!(keywords.contains(&StepKeyword::When));
    assert!(scenario
        .steps
        .iter()
        .any(|s| s.text == "the response status should be 201"));
    assert!(scenario
        .steps
        .iter()
        .any(|s| s.text == "the response body should match the \"Item\" schema"));

    let table = scenario.data_table().unwrap();
    assert_eq!(table.headers, vec!["field", "value"]);
    assert_eq!(table.rows, vec![vec!["name".to_string(), "\"a\"".to_string()]]);
}

#[test]
fn test_auth_error_without_security() {
    let analysis = analysis("/items", "GET");
    assert!(!AuthErrorGenerator.can_generate(&analysis));
    assert!(AuthErrorGenerator.generate(&analysis).is_empty());
}

#[test]
fn test_auth_error_outline() {
    let analysis = analysis("/items", "POST");
    assert!(AuthErrorGenerator.can_generate(&analysis));
    let scenarios = AuthErrorGenerator.generate(&analysis);
    assert_eq!(scenarios.len(), 1);

    let outline = &scenarios[0];
    assert!(outline.is_outline());
    let examples = outline.examples.as_ref().unwrap();
    assert_eq!(examples.headers, vec!["credential_state"]);
    assert_eq!(
        examples.rows,
        vec![vec!["missing".to_string()], vec!["invalid".to_string()]]
    );
    assert!(outline
        .steps
        .iter()
        .any(|s| s.text == "the response status should be 401"));
}

#[test]
fn test_not_found_substitutes_identifier() {
    let analysis = analysis("/items/{id}", "GET");
    let scenarios = NotFoundGenerator::new().generate(&analysis);
    assert_eq!(scenarios.len(), 1);
    let steps: Vec<&str> = scenarios[0].steps.iter().map(|s| s.text.as_str()).collect();
    assert!(steps.contains(&"the path parameter \"id\" is \"nonexistent-id-000000\""));
    assert!(steps.contains(&"the response status should be 404"));

    let configured = NotFoundGenerator::with_identifier("missing-42").generate(&analysis);
    assert!(configured[0]
        .steps
        .iter()
        .any(|s| s.text == "the path parameter \"id\" is \"missing-42\""));

    let listing = common::inventory_service()
        .analyze_endpoint("/items", "GET")
        .unwrap();
    assert!(!NotFoundGenerator::new().can_generate(&listing));
}

#[test]
fn test_validation_error_one_scenario_per_constraint() {
    let analysis = analysis("/items", "POST");
    let scenarios = ValidationErrorGenerator.generate(&analysis);
    let titles = titles(&scenarios);
    assert_eq!(titles[0], "Reject request missing the required field \"name\"");
    assert!(titles.contains(&"Reject field \"name\" longer than its maximum length"));
    assert!(titles.contains(&"Reject field \"price\" below its minimum"));
    assert!(titles.contains(&"Reject field \"tags\" with too many items"));
    for scenario in &scenarios {
        assert!(scenario
            .steps
            .iter()
            .any(|s| s.text == "the response status should be 400"));
    }
}

#[test]
fn test_validation_error_skips_unconstrained_operation() {
    let analysis = analysis("/items/{id}", "GET");
    assert!(!ValidationErrorGenerator.can_generate(&analysis));
}

#[test]
fn test_edge_cases_for_query_bounds() {
    let analysis = analysis("/items", "GET");
    let scenarios = EdgeCaseGenerator.generate(&analysis);
    assert_eq!(
        titles(&scenarios),
        vec![
            "Accept query parameter \"page\" at its minimum 1",
            "Accept query parameter \"limit\" at its minimum 1",
            "Accept query parameter \"limit\" at its maximum 100",
            "Accept a request without the optional query parameter \"limit\"",
        ]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let first = ValidationErrorGenerator.generate(&analysis("/items", "POST"));
    let second = ValidationErrorGenerator.generate(&analysis("/items", "POST"));
    assert_eq!(first, second);
}
