//! # oas-gherkin
//!
//! **oas-gherkin** derives behavioral test scenarios, written in Gherkin, from an
//! [OpenAPI 3.x](https://spec.openapis.org/oas/v3.1.0) document.
//!
//! ## Overview
//!
//! For every operation in a document the crate expands `$ref` references,
//! works out what a request needs (required and optional parameters, body
//! fields and their constraints, security schemes, declared responses) and
//! runs a set of scenario generators over that analysis. The scenarios for one
//! operation are grouped into a feature file and rendered as Gherkin, JSON or
//! Markdown.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Loading YAML/JSON documents and enumerating operations
//! - **[`resolver`]** - `$ref` expansion with a per-document cache and cycle detection
//! - **[`analysis`]** - Per-operation analysis (parameters, body, responses, security)
//! - **[`scenario`]** - Scenario model, value synthesis, generators and their registry
//! - **[`feature`]** - Feature assembly (shared background) and rendering
//! - **[`service`]** - [`ScenarioService`], the library entry point
//! - **[`config`]** - `oas-gherkin.toml` settings and environment overrides
//! - **[`cli`]** - The `oas-gherkin` command-line interface
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(oas-gherkin)
//!     participant Service as ScenarioService
//!     participant Analyzer as EndpointAnalyzer
//!     participant Resolver as ReferenceResolver
//!     participant Factory as GeneratorFactory
//!     participant Assembler as FeatureAssembler
//!     participant Serializer as FeatureSerializer
//!
//!     CLI->>Service: load(openapi.yaml)
//!     CLI->>Service: build_feature(path, method, types)
//!     Service->>Analyzer: analyze(endpoint, document)
//!     Analyzer->>Resolver: resolve_schema(schema, document)
//!     Resolver-->>Analyzer: expanded schema
//!     Analyzer-->>Service: EndpointAnalysis
//!     loop each scenario type
//!         Service->>Factory: create(type)
//!         Factory-->>Service: generator
//!         Service->>Service: can_generate / generate
//!     end
//!     Service->>Assembler: assemble(scenarios)
//!     Assembler-->>Service: FeatureFile
//!     CLI->>Service: export_feature(feature, format)
//!     Service->>Serializer: serialize(feature, format)
//!     Serializer-->>CLI: text
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use oas_gherkin::{GeneratorConfig, OutputFormat, ScenarioService, ScenarioType};
//! use oas_gherkin::spec::{load_document_from_str, SpecFormat};
//!
//! let yaml = r#"
//! openapi: 3.1.0
//! info: { title: Items, version: "1.0" }
//! paths:
//!   /items/{id}:
//!     get:
//!       operationId: getItem
//!       parameters:
//!         - { name: id, in: path, required: true, schema: { type: integer } }
//!       responses:
//!         "200": { description: found }
//!         "404": { description: missing }
//! "#;
//!
//! let document = load_document_from_str(yaml, SpecFormat::Yaml).unwrap();
//! let mut service = ScenarioService::from_document(document, GeneratorConfig::default());
//! let feature = service
//!     .build_feature("/items/{id}", "GET", Some(&[ScenarioType::NotFound]))
//!     .unwrap();
//! let text = service.export_feature(&feature, OutputFormat::Gherkin).unwrap();
//! assert!(text.starts_with("Feature: GET /items/{id}"));
//! assert!(text.contains("@not-found"));
//! ```
//!
//! ## Scenario Types
//!
//! | Type | Generated when | Expects |
//! |------|----------------|---------|
//! | `required_fields` | always | the success status |
//! | `all_fields` | the operation has optional fields | the success status |
//! | `validation_error` | a field carries a checkable rule | 400 / 422 / 4XX |
//! | `auth_error` | security applies | 401 / 403 |
//! | `not_found` | a path parameter looks like an identifier | 404 |
//! | `edge_case` | a field declares bounds, lengths or item counts | the success status |

pub mod analysis;
pub mod cli;
pub mod config;
mod error;
pub mod feature;
pub mod logging;
pub mod resolver;
pub mod scenario;
pub mod service;
pub mod spec;

pub use analysis::{EndpointAnalysis, EndpointAnalyzer};
pub use config::GeneratorConfig;
pub use error::{ErrorReport, Result, ScenarioError};
pub use feature::{FeatureAssembler, FeatureFile, FeatureSerializer, OutputFormat};
pub use resolver::{ReferenceResolver, ResolutionCache};
pub use scenario::{GeneratorFactory, ScenarioGenerator, ScenarioType, TestScenario};
pub use service::{FeatureOutcome, ScenarioService};
pub use spec::{load_document, ApiDocument, Endpoint, EndpointFilter};
