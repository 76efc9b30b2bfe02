use crate::scenario::{Step, TestScenario};
use serde::Serialize;

/// Where a feature came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureMetadata {
    pub spec_title: String,
    pub spec_version: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

/// Steps shared by every scenario of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Background {
    pub steps: Vec<Step>,
}

/// All scenarios for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub path: String,
    pub method: String,
    pub metadata: FeatureMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    pub scenarios: Vec<TestScenario>,
}

impl FeatureFile {
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }
}
