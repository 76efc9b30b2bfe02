use super::generators::{
    AllFieldsGenerator, AuthErrorGenerator, EdgeCaseGenerator, NotFoundGenerator,
    RequiredFieldsGenerator, ScenarioGenerator, ValidationErrorGenerator,
};
use super::types::ScenarioType;
use crate::config::GeneratorConfig;
use crate::error::{Result, ScenarioError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of generators keyed by scenario type.
#[derive(Clone, Default)]
pub struct GeneratorFactory {
    generators: HashMap<ScenarioType, Arc<dyn ScenarioGenerator>>,
}

impl std::fmt::Debug for GeneratorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorFactory")
            .field("registered", &self.registered_types())
            .finish()
    }
}

impl GeneratorFactory {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All six built-in generators, configured from `config`.
    pub fn with_defaults(config: &GeneratorConfig) -> Self {
        let mut factory = Self::new();
        factory.register(Arc::new(RequiredFieldsGenerator));
        factory.register(Arc::new(AllFieldsGenerator));
        factory.register(Arc::new(ValidationErrorGenerator));
        factory.register(Arc::new(AuthErrorGenerator));
        factory.register(Arc::new(match &config.not_found_identifier {
            Some(identifier) => NotFoundGenerator::with_identifier(identifier.clone()),
            None => NotFoundGenerator::new(),
        }));
        factory.register(Arc::new(EdgeCaseGenerator));
        factory
    }

    /// Add a generator, replacing any previous one for the same type.
    pub fn register(&mut self, generator: Arc<dyn ScenarioGenerator>) {
        let scenario_type = generator.scenario_type();
        if self.generators.insert(scenario_type, generator).is_some() {
            debug!(scenario_type = %scenario_type, "replaced registered generator");
        }
    }

    /// Look up the generator for `scenario_type`.
    pub fn create(&self, scenario_type: ScenarioType) -> Result<Arc<dyn ScenarioGenerator>> {
        self.generators
            .get(&scenario_type)
            .cloned()
            .ok_or_else(|| ScenarioError::GeneratorNotRegistered {
                scenario_type: scenario_type.to_string(),
            })
    }

    /// String form of [`create`](Self::create); rejects unknown type names first.
    pub fn create_named(&self, name: &str) -> Result<Arc<dyn ScenarioGenerator>> {
        self.create(name.parse()?)
    }

    pub fn is_registered(&self, scenario_type: ScenarioType) -> bool {
        self.generators.contains_key(&scenario_type)
    }

    /// Registered types in canonical order.
    pub fn registered_types(&self) -> Vec<ScenarioType> {
        ScenarioType::ALL
            .iter()
            .copied()
            .filter(|t| self.generators.contains_key(t))
            .collect()
    }
}
