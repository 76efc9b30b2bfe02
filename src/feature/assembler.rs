use super::model::{Background, FeatureFile, FeatureMetadata};
use crate::scenario::{Step, StepKeyword, TestScenario};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How two steps are compared when looking for a shared background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMatching {
    /// Keyword, text and table must all be equal
    #[default]
    Structural,
    /// Text and table must be equal; the keyword is ignored
    Text,
}

impl StepMatching {
    fn matches(&self, a: &Step, b: &Step) -> bool {
        let same_content = a.text == b.text && a.table == b.table;
        match self {
            StepMatching::Structural => same_content && a.keyword == b.keyword,
            StepMatching::Text => same_content,
        }
    }
}

/// When leading steps are lifted into a Background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundPolicy {
    pub enabled: bool,
    /// Shortest shared prefix worth extracting
    pub min_shared_steps: usize,
    pub matching: StepMatching,
}

impl Default for BackgroundPolicy {
    fn default() -> Self {
        BackgroundPolicy {
            enabled: true,
            min_shared_steps: 1,
            matching: StepMatching::Structural,
        }
    }
}

/// Groups an endpoint's scenarios into a [`FeatureFile`].
#[derive(Debug, Clone, Default)]
pub struct FeatureAssembler {
    policy: BackgroundPolicy,
}

impl FeatureAssembler {
    pub fn new(policy: BackgroundPolicy) -> Self {
        FeatureAssembler { policy }
    }

    pub fn policy(&self) -> &BackgroundPolicy {
        &self.policy
    }

    pub fn assemble(
        &self,
        scenarios: Vec<TestScenario>,
        path: &str,
        method: &str,
        metadata: FeatureMetadata,
    ) -> FeatureFile {
        let method = method.to_ascii_uppercase();
        let name = metadata
            .summary
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("{method} {path}"));
        let description = Some(format!("Operation {}: {method} {path}", metadata.operation_id));
        let tags = metadata.tags.iter().map(|t| feature_tag(t)).collect();

        let (background, scenarios) = self.extract_background(scenarios);

        FeatureFile {
            name,
            description,
            tags,
            path: path.to_string(),
            method,
            metadata,
            background,
            scenarios,
        }
    }

    /// Length of the prefix every scenario shares, limited to the steps
    /// before the first `When` and leaving each scenario at least one step.
    fn shared_prefix_len(&self, scenarios: &[TestScenario]) -> usize {
        let Some(first) = scenarios.first() else {
            return 0;
        };
        let limit = scenarios
            .iter()
            .map(|s| {
                let before_when = s
                    .steps
                    .iter()
                    .position(|step| step.keyword == StepKeyword::When)
                    .unwrap_or(s.steps.len());
                before_when.min(s.steps.len().saturating_sub(1))
            })
            .min()
            .unwrap_or(0);

        (0..limit)
            .take_while(|&i| {
                scenarios
                    .iter()
                    .all(|s| self.policy.matching.matches(&first.steps[i], &s.steps[i]))
            })
            .count()
    }

    fn extract_background(
        &self,
        mut scenarios: Vec<TestScenario>,
    ) -> (Option<Background>, Vec<TestScenario>) {
        if !self.policy.enabled || scenarios.len() < 2 {
            return (None, scenarios);
        }
        let shared = self.shared_prefix_len(&scenarios);
        if shared == 0 || shared < self.policy.min_shared_steps {
            return (None, scenarios);
        }

        let mut steps: Vec<Step> = scenarios[0].steps[..shared].to_vec();
        normalize_leading_keyword(&mut steps);

        for scenario in &mut scenarios {
            scenario.steps.drain(..shared);
            normalize_leading_keyword(&mut scenario.steps);
        }
        debug!(steps = shared, scenarios = scenarios.len(), "extracted background");
        (Some(Background { steps }), scenarios)
    }
}

/// A leading `And`/`But` continues nothing, so it becomes `Given`.
fn normalize_leading_keyword(steps: &mut [Step]) {
    if let Some(first) = steps.first_mut() {
        if matches!(first.keyword, StepKeyword::And | StepKeyword::But) {
            first.keyword = StepKeyword::Given;
        }
    }
    for step in steps.iter_mut().skip(1) {
        if step.keyword == StepKeyword::Given {
            step.keyword = StepKeyword::And;
        }
    }
}

fn feature_tag(tag: &str) -> String {
    let cleaned: String = tag
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    if cleaned.starts_with('@') {
        cleaned
    } else {
        format!("@{cleaned}")
    }
}
