use super::types::{DataTable, ExamplesTable, ScenarioType, Step, StepKeyword, TestScenario};

/// Incremental scenario construction.
///
/// Consecutive steps of the same phase are written with `And`, so callers
/// only state the phase (`given`, `when`, `then`).
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    scenario_type: ScenarioType,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    steps: Vec<Step>,
    examples: Option<ExamplesTable>,
    phase: Option<StepKeyword>,
}

impl ScenarioBuilder {
    pub fn new(scenario_type: ScenarioType, title: impl Into<String>) -> Self {
        ScenarioBuilder {
            scenario_type,
            title: title.into(),
            description: None,
            tags: vec![scenario_type.tag()],
            steps: Vec::new(),
            examples: None,
            phase: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn push(&mut self, phase: StepKeyword, text: String, table: Option<DataTable>) {
        let keyword = if self.phase == Some(phase) {
            StepKeyword::And
        } else {
            phase
        };
        self.phase = Some(phase);
        self.steps.push(Step { keyword, text, table });
    }

    pub fn given(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(StepKeyword::Given, text.into(), None);
        self
    }

    pub fn given_table(&mut self, text: impl Into<String>, table: DataTable) -> &mut Self {
        self.push(StepKeyword::Given, text.into(), Some(table));
        self
    }

    pub fn when(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(StepKeyword::When, text.into(), None);
        self
    }

    pub fn then(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(StepKeyword::Then, text.into(), None);
        self
    }

    pub fn examples(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> &mut Self {
        self.examples = Some(ExamplesTable {
            name: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        });
        self
    }

    pub fn build(self) -> TestScenario {
        TestScenario {
            scenario_type: self.scenario_type,
            title: self.title,
            description: self.description,
            tags: self.tags,
            steps: self.steps,
            examples: self.examples,
        }
    }
}
