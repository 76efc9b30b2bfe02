//! Generator configuration
//!
//! Settings come from an optional `oas-gherkin.toml` that sits alongside the
//! OpenAPI document (or is passed explicitly), then from environment
//! variables, then from CLI flags.
//!
//! ```toml
//! scenario_types = ["required_fields", "not_found", "auth_error"]
//! default_format = "markdown"
//! not_found_identifier = "does-not-exist"
//!
//! [background]
//! enabled = true
//! min_shared_steps = 2
//! matching = "text"
//! ```

use crate::error::Result;
use crate::feature::{BackgroundPolicy, OutputFormat};
use crate::scenario::ScenarioType;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up next to the OpenAPI document.
pub const CONFIG_FILE_NAME: &str = "oas-gherkin.toml";

/// Overrides the configured output format.
pub const FORMAT_ENV: &str = "OAS_GHERKIN_FORMAT";

/// Overrides the configured scenario types (comma-separated).
pub const SCENARIO_TYPES_ENV: &str = "OAS_GHERKIN_SCENARIO_TYPES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Types generated when the caller does not name any
    pub scenario_types: Vec<ScenarioType>,
    pub default_format: OutputFormat,
    /// Identifier used by not-found scenarios instead of a synthesized one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found_identifier: Option<String>,
    pub background: BackgroundPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            scenario_types: ScenarioType::ALL.to_vec(),
            default_format: OutputFormat::Gherkin,
            not_found_identifier: None,
            background: BackgroundPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Apply string overrides, as given by environment or flags.
    ///
    /// # Errors
    ///
    /// `unsupported_format` or `invalid_scenario_type` for bad values.
    pub fn apply_overrides(&mut self, format: Option<&str>, types: Option<&str>) -> Result<()> {
        if let Some(format) = format {
            self.default_format = format.parse()?;
        }
        if let Some(types) = types {
            self.scenario_types = ScenarioType::parse_list(types)?;
        }
        Ok(())
    }

    /// Apply `OAS_GHERKIN_FORMAT` and `OAS_GHERKIN_SCENARIO_TYPES` when set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let format = std::env::var(FORMAT_ENV).ok().filter(|v| !v.is_empty());
        let types = std::env::var(SCENARIO_TYPES_ENV)
            .ok()
            .filter(|v| !v.is_empty());
        self.apply_overrides(format.as_deref(), types.as_deref())
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Load configuration from a TOML file.
pub fn load_config(config_path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config = GeneratorConfig::from_toml(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    debug!(path = %config_path.display(), "loaded generator config");
    Ok(config)
}

/// `oas-gherkin.toml` in the document's directory, if present.
pub fn auto_detect_config_path(spec_path: &Path) -> Option<PathBuf> {
    let spec_dir = spec_path.parent()?;
    let config_path = spec_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Explicit path first, then the auto-detected one.
pub fn resolve_config_path(explicit_path: Option<&Path>, spec_path: &Path) -> Option<PathBuf> {
    match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect_config_path(spec_path),
    }
}

/// Resolve, load and apply environment overrides. No file means defaults.
pub fn load_for_spec(explicit_path: Option<&Path>, spec_path: &Path) -> anyhow::Result<GeneratorConfig> {
    let mut config = match resolve_config_path(explicit_path, spec_path) {
        Some(path) => load_config(&path)?,
        None => GeneratorConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid configuration override in environment")?;
    Ok(config)
}
