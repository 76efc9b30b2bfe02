use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six scenario categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ScenarioType {
    RequiredFields,
    AllFields,
    ValidationError,
    AuthError,
    NotFound,
    EdgeCase,
}

impl ScenarioType {
    /// Every type in canonical order.
    pub const ALL: [ScenarioType; 6] = [
        ScenarioType::RequiredFields,
        ScenarioType::AllFields,
        ScenarioType::ValidationError,
        ScenarioType::AuthError,
        ScenarioType::NotFound,
        ScenarioType::EdgeCase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioType::RequiredFields => "required_fields",
            ScenarioType::AllFields => "all_fields",
            ScenarioType::ValidationError => "validation_error",
            ScenarioType::AuthError => "auth_error",
            ScenarioType::NotFound => "not_found",
            ScenarioType::EdgeCase => "edge_case",
        }
    }

    /// Tag placed on generated scenarios (`@required-fields`).
    pub fn tag(&self) -> String {
        format!("@{}", self.as_str().replace('_', "-"))
    }

    /// Parse a comma-separated list, rejecting the first invalid entry.
    pub fn parse_list(input: &str) -> Result<Vec<ScenarioType>, ScenarioError> {
        let mut out = Vec::new();
        for part in input.split(',') {
            let parsed: ScenarioType = part.trim().parse()?;
            if !out.contains(&parsed) {
                out.push(parsed);
            }
        }
        Ok(out)
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioType {
    type Err = ScenarioError;

    /// Exact, case-sensitive match. Whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ScenarioError::InvalidScenarioType {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for ScenarioType {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for ScenarioType {
    type Error = ScenarioError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: &[&str]) -> Self {
        DataTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub keyword: StepKeyword,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<DataTable>,
}

impl Step {
    pub fn new(keyword: StepKeyword, text: impl Into<String>) -> Self {
        Step {
            keyword,
            text: text.into(),
            table: None,
        }
    }
}

/// Examples block of a Scenario Outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamplesTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One generated scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestScenario {
    pub scenario_type: ScenarioType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesTable>,
}

impl TestScenario {
    /// A scenario with an examples table renders as a Scenario Outline.
    pub fn is_outline(&self) -> bool {
        self.examples.is_some()
    }

    /// The first data table attached to any step.
    pub fn data_table(&self) -> Option<&DataTable> {
        self.steps.iter().find_map(|s| s.table.as_ref())
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            scenario_type: self.scenario_type,
            title: self.title.clone(),
            step_count: self.steps.len(),
            outline: self.is_outline(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    pub scenario_type: ScenarioType,
    pub title: String,
    pub step_count: usize,
    pub outline: bool,
}
