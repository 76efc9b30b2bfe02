#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use oas_gherkin::scenario::{ScenarioBuilder, ScenarioType};
use oas_gherkin::{
    EndpointAnalysis, GeneratorConfig, GeneratorFactory, ScenarioError, ScenarioGenerator,
    TestScenario,
};
use std::sync::Arc;

#[test]
fn test_scenario_type_strings_round_trip() {
    for scenario_type in ScenarioType::ALL {
        let text = scenario_type.to_string();
        assert_eq!(text.parse::<ScenarioType>().unwrap(), scenario_type);
        assert_eq!(ScenarioType::try_from(text.as_str()).unwrap(), scenario_type);
    }
}

#[test]
fn test_scenario_type_rejects_near_misses() {
    for input in ["", " required_fields", "required_fields ", "Required_Fields", "NOT_FOUND", "not-found"] {
        let err = input.parse::<ScenarioType>().unwrap_err();
        assert_eq!(
            err,
            ScenarioError::InvalidScenarioType {
                input: input.to_string()
            }
        );
        assert_eq!(err.kind(), "invalid_scenario_type");
    }
}

#[test]
fn test_defaults_register_every_type() {
    let factory = GeneratorFactory::with_defaults(&GeneratorConfig::default());
    assert_eq!(factory.registered_types(), ScenarioType::ALL.to_vec());
    for scenario_type in ScenarioType::ALL {
        assert_eq!(factory.create(scenario_type).unwrap().scenario_type(), scenario_type);
    }
}

#[test]
fn test_unregistered_and_unknown_types() {
    let factory = GeneratorFactory::new();
    let err = factory.create(ScenarioType::NotFound).err().unwrap();
    assert_eq!(
        err,
        ScenarioError::GeneratorNotRegistered {
            scenario_type: "not_found".to_string()
        }
    );

    let err = factory.create_named("bogus").err().unwrap();
    assert_eq!(err.kind(), "invalid_scenario_type");
}

struct SmokeGenerator;

impl ScenarioGenerator for SmokeGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::RequiredFields
    }

    fn can_generate(&self, _analysis: &EndpointAnalysis) -> bool {
        true
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        let mut builder = ScenarioBuilder::new(ScenarioType::RequiredFields, "Smoke");
        builder.when(format!("I send a {} request to \"{}\"", analysis.method, analysis.path));
        builder.then("the response status should be 200");
        vec![builder.build()]
    }
}

#[test]
fn test_registered_generator_replaces_builtin() {
    let mut service = common::inventory_service();
    service.factory_mut().register(Arc::new(SmokeGenerator));

    let scenarios = service
        .generate_scenarios("/health", "GET", Some(&[ScenarioType::RequiredFields]))
        .unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].title, "Smoke");
}

#[test]
fn test_config_limits_default_types() {
    let config = GeneratorConfig {
        scenario_types: vec![ScenarioType::NotFound],
        ..GeneratorConfig::default()
    };
    let document = common::document(common::INVENTORY_SPEC);
    let mut service = oas_gherkin::ScenarioService::from_document(document, config);

    let scenarios = service.generate_scenarios("/items/{id}", "GET", None).unwrap();
    assert!(!scenarios.is_empty());
    assert!(scenarios
        .iter()
        .all(|s| s.scenario_type == ScenarioType::NotFound));
}
