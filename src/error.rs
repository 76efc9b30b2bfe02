//! # Error Module
//!
//! A single tagged error type for the scenario pipeline. Each variant carries
//! the structured fields a caller needs to tell failures apart (a cyclic spec
//! versus an unknown scenario type, for example) without parsing messages.
//!
//! ```rust
//! use oas_gherkin::ScenarioError;
//!
//! let err = ScenarioError::ReferenceNotFound {
//!     reference: "#/components/schemas/Missing".to_string(),
//! };
//! assert_eq!(err.kind(), "reference_not_found");
//! assert_eq!(err.report().details["reference"], "#/components/schemas/Missing");
//! ```

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors raised by resolution, analysis, generation and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// A `$ref` pointer does not resolve to any node in the document.
    #[error("reference '{reference}' could not be resolved in the document")]
    ReferenceNotFound { reference: String },

    /// A reference chain revisited a reference already being expanded.
    #[error("circular reference detected: {} (closed by '{closing}')", .chain.join(" -> "))]
    CircularReference {
        /// Active chain including the closing reference as the last element
        chain: Vec<String>,
        /// The reference that closed the cycle
        closing: String,
    },

    /// Scenario type string outside the fixed vocabulary.
    #[error("invalid scenario type '{input}': expected one of required_fields, all_fields, validation_error, auth_error, not_found, edge_case")]
    InvalidScenarioType { input: String },

    /// No generator registered for the requested type.
    #[error("no generator registered for scenario type '{scenario_type}'")]
    GeneratorNotRegistered { scenario_type: String },

    /// Output format outside the supported set.
    #[error("unsupported output format '{format}': expected gherkin, json or markdown")]
    UnsupportedFormat { format: String },

    /// No operation for this (method, path) pair.
    #[error("endpoint {method} {path} not found in the document")]
    EndpointNotFound { method: String, path: String },

    /// The document could not be read or parsed.
    #[error("failed to load OpenAPI document: {message}")]
    SpecLoad { message: String },

    /// A file could not be read.
    #[error("i/o error on {path}: {message}")]
    Io { path: String, message: String },

    /// Rendering failed inside a template or JSON encoder.
    #[error("failed to render feature: {message}")]
    Render { message: String },
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Serializable error record surfaced by outer layers (CLI, service callers).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    pub details: Value,
}

impl ScenarioError {
    /// Stable discriminator for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::ReferenceNotFound { .. } => "reference_not_found",
            ScenarioError::CircularReference { .. } => "circular_reference",
            ScenarioError::InvalidScenarioType { .. } => "invalid_scenario_type",
            ScenarioError::GeneratorNotRegistered { .. } => "generator_not_registered",
            ScenarioError::UnsupportedFormat { .. } => "unsupported_format",
            ScenarioError::EndpointNotFound { .. } => "endpoint_not_found",
            ScenarioError::SpecLoad { .. } => "spec_load",
            ScenarioError::Io { .. } => "io",
            ScenarioError::Render { .. } => "render",
        }
    }

    /// Kind, message and kind-specific diagnostic fields.
    pub fn report(&self) -> ErrorReport {
        let details = match self {
            ScenarioError::ReferenceNotFound { reference } => json!({ "reference": reference }),
            ScenarioError::CircularReference { chain, closing } => {
                json!({ "chain": chain, "closing": closing })
            }
            ScenarioError::InvalidScenarioType { input } => json!({ "input": input }),
            ScenarioError::GeneratorNotRegistered { scenario_type } => {
                json!({ "scenario_type": scenario_type })
            }
            ScenarioError::UnsupportedFormat { format } => json!({ "format": format }),
            ScenarioError::EndpointNotFound { method, path } => {
                json!({ "method": method, "path": path })
            }
            ScenarioError::Io { path, message } => json!({ "path": path, "cause": message }),
            ScenarioError::SpecLoad { message } | ScenarioError::Render { message } => {
                json!({ "cause": message })
            }
        };
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<askama::Error> for ScenarioError {
    fn from(err: askama::Error) -> Self {
        ScenarioError::Render {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(err: serde_json::Error) -> Self {
        ScenarioError::Render {
            message: err.to_string(),
        }
    }
}
