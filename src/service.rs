//! Library entry point tying loading, analysis, generation and rendering
//! together for one document.

use crate::analysis::{EndpointAnalysis, EndpointAnalyzer};
use crate::config::GeneratorConfig;
use crate::error::{Result, ScenarioError};
use crate::feature::{FeatureAssembler, FeatureFile, FeatureMetadata, FeatureSerializer, OutputFormat};
use crate::scenario::{GeneratorFactory, ScenarioSummary, ScenarioType, TestScenario};
use crate::spec::{build_endpoints, load_document, ApiDocument, Endpoint, EndpointFilter, EndpointSummary};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Group name for endpoints without tags.
pub const UNTAGGED: &str = "untagged";

/// Result of one endpoint in a batch run.
#[derive(Debug)]
pub struct FeatureOutcome {
    pub endpoint: EndpointSummary,
    pub result: Result<FeatureFile>,
}

#[derive(Debug)]
pub struct ScenarioService {
    document: ApiDocument,
    endpoints: Vec<Endpoint>,
    analyzer: EndpointAnalyzer,
    factory: GeneratorFactory,
    assembler: FeatureAssembler,
    serializer: FeatureSerializer,
    config: GeneratorConfig,
}

impl ScenarioService {
    /// Load the document at `path`.
    pub fn load(path: &Path, config: GeneratorConfig) -> Result<Self> {
        let document = load_document(path)?;
        Ok(Self::from_document(document, config))
    }

    pub fn from_document(document: ApiDocument, config: GeneratorConfig) -> Self {
        let endpoints = build_endpoints(&document);
        debug!(
            title = %document.title(),
            endpoints = endpoints.len(),
            "scenario service ready"
        );
        ScenarioService {
            document,
            endpoints,
            analyzer: EndpointAnalyzer::new(),
            factory: GeneratorFactory::with_defaults(&config),
            assembler: FeatureAssembler::new(config.background.clone()),
            serializer: FeatureSerializer::new(),
            config,
        }
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Registry, for adding or replacing generators.
    pub fn factory_mut(&mut self) -> &mut GeneratorFactory {
        &mut self.factory
    }

    pub fn list_endpoints(&self, filter: &EndpointFilter) -> Vec<EndpointSummary> {
        self.endpoints
            .iter()
            .filter(|e| filter.matches(e))
            .map(Endpoint::summary)
            .collect()
    }

    /// Listing grouped by tag; an endpoint with several tags appears in each.
    pub fn group_by_tag(&self, filter: &EndpointFilter) -> BTreeMap<String, Vec<EndpointSummary>> {
        let mut groups: BTreeMap<String, Vec<EndpointSummary>> = BTreeMap::new();
        for summary in self.list_endpoints(filter) {
            if summary.tags.is_empty() {
                groups.entry(UNTAGGED.to_string()).or_default().push(summary);
                continue;
            }
            for tag in &summary.tags {
                groups.entry(tag.clone()).or_default().push(summary.clone());
            }
        }
        groups
    }

    fn endpoint_index(endpoints: &[Endpoint], path: &str, method: &str) -> Result<usize> {
        endpoints
            .iter()
            .position(|e| e.path == path && e.method.as_str().eq_ignore_ascii_case(method))
            .ok_or_else(|| ScenarioError::EndpointNotFound {
                method: method.to_ascii_uppercase(),
                path: path.to_string(),
            })
    }

    pub fn find_endpoint(&self, path: &str, method: &str) -> Result<&Endpoint> {
        let index = Self::endpoint_index(&self.endpoints, path, method)?;
        Ok(&self.endpoints[index])
    }

    /// # Errors
    ///
    /// `endpoint_not_found`, or a resolution error from the analyzer.
    pub fn analyze_endpoint(&mut self, path: &str, method: &str) -> Result<EndpointAnalysis> {
        let index = Self::endpoint_index(&self.endpoints, path, method)?;
        self.analyzer.analyze(&self.endpoints[index], &self.document)
    }

    /// Types used when the caller names none: registered and enabled in config.
    fn default_types(&self) -> Vec<ScenarioType> {
        self.factory
            .registered_types()
            .into_iter()
            .filter(|t| self.config.scenario_types.contains(t))
            .collect()
    }

    /// Run the generators for `types` (or the defaults) over one analysis.
    /// Generators that cannot apply are skipped.
    pub fn scenarios_for(
        &self,
        analysis: &EndpointAnalysis,
        types: Option<&[ScenarioType]>,
    ) -> Result<Vec<TestScenario>> {
        let types = match types {
            Some(types) => types.to_vec(),
            None => self.default_types(),
        };

        let mut scenarios = Vec::new();
        for scenario_type in types {
            let generator = self.factory.create(scenario_type)?;
            if !generator.can_generate(analysis) {
                debug!(
                    scenario_type = %scenario_type,
                    operation_id = %analysis.operation_id,
                    "generator does not apply"
                );
                continue;
            }
            scenarios.extend(generator.generate(analysis));
        }
        Ok(scenarios)
    }

    /// Analyze the endpoint and generate its scenarios.
    pub fn generate_scenarios(
        &mut self,
        path: &str,
        method: &str,
        types: Option<&[ScenarioType]>,
    ) -> Result<Vec<TestScenario>> {
        let analysis = self.analyze_endpoint(path, method)?;
        let scenarios = self.scenarios_for(&analysis, types)?;
        info!(
            method = %analysis.method,
            path = %analysis.path,
            scenarios = scenarios.len(),
            "generated scenarios"
        );
        Ok(scenarios)
    }

    pub fn summarize(scenarios: &[TestScenario]) -> Vec<ScenarioSummary> {
        scenarios.iter().map(TestScenario::summary).collect()
    }

    fn metadata(&self, endpoint: &Endpoint) -> FeatureMetadata {
        FeatureMetadata {
            spec_title: self.document.title().to_string(),
            spec_version: self.document.version().to_string(),
            operation_id: endpoint.operation_id.clone(),
            summary: endpoint.summary.clone(),
            tags: endpoint.tags.clone(),
        }
    }

    /// Generate and assemble the feature for one endpoint.
    pub fn build_feature(
        &mut self,
        path: &str,
        method: &str,
        types: Option<&[ScenarioType]>,
    ) -> Result<FeatureFile> {
        let index = Self::endpoint_index(&self.endpoints, path, method)?;
        let scenarios = self.generate_scenarios(path, method, types)?;
        let endpoint = &self.endpoints[index];
        Ok(self.assembler.assemble(
            scenarios,
            &endpoint.path,
            endpoint.method.as_str(),
            self.metadata(endpoint),
        ))
    }

    pub fn export_feature(&self, feature: &FeatureFile, format: OutputFormat) -> Result<String> {
        self.serializer.serialize(feature, format)
    }

    /// Features for every endpoint matching `filter`, in document order.
    ///
    /// Per-endpoint failures are reported in the outcome and do not stop the
    /// run. `cancel` is checked before each endpoint.
    pub fn generate_all_features(
        &mut self,
        filter: &EndpointFilter,
        types: Option<&[ScenarioType]>,
        cancel: &AtomicBool,
    ) -> Vec<FeatureOutcome> {
        let selected: Vec<(String, String, EndpointSummary)> = self
            .endpoints
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| (e.path.clone(), e.method.to_string(), e.summary()))
            .collect();

        let mut outcomes = Vec::with_capacity(selected.len());
        for (path, method, endpoint) in selected {
            if cancel.load(Ordering::SeqCst) {
                warn!(
                    completed = outcomes.len(),
                    "generation cancelled, remaining endpoints skipped"
                );
                break;
            }
            let result = self.build_feature(&path, &method, types);
            if let Err(err) = &result {
                warn!(
                    method = %method,
                    path = %path,
                    kind = err.kind(),
                    error = %err,
                    "skipping endpoint"
                );
            }
            outcomes.push(FeatureOutcome { endpoint, result });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            features = outcomes.len() - failed,
            failed,
            "batch generation finished"
        );
        outcomes
    }
}
