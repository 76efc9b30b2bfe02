use http::Method;
use oas3::OpenApiV3Spec;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::error::ScenarioError;

/// Source format of an OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// Pick the format from a file extension (`.yaml`/`.yml` → YAML, else JSON).
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SpecFormat::Yaml
            }
            _ => SpecFormat::Json,
        }
    }
}

impl FromStr for SpecFormat {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(SpecFormat::Yaml),
            "json" => Ok(SpecFormat::Json),
            other => Err(ScenarioError::SpecLoad {
                message: format!("unknown document format '{other}' (expected yaml or json)"),
            }),
        }
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "cookie" => Ok(ParameterLocation::Cookie),
            _ => Err(()),
        }
    }
}

/// A loaded OpenAPI document.
///
/// Holds the raw order-preserving JSON tree used for `$ref` pointer
/// resolution and declaration-ordered traversal. `info` is taken from the
/// typed [`OpenApiV3Spec`] when the document parses cleanly into it.
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    raw: Value,
    title: String,
    version: String,
}

impl ApiDocument {
    pub(crate) fn new(raw: Value, spec: Option<&OpenApiV3Spec>) -> Self {
        let (title, version) = match spec {
            Some(spec) => (spec.info.title.clone(), spec.info.version.clone()),
            None => {
                let info = |key: &str| {
                    raw.get("info")
                        .and_then(|i| i.get(key))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                (info("title"), info("version"))
            }
        };
        ApiDocument { raw, title, version }
    }

    /// Raw JSON tree of the document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// `openapi` version string.
    pub fn openapi_version(&self) -> &str {
        self.raw
            .get("openapi")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// `info.title`
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `info.version`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Document-level default security requirements, if declared.
    pub fn default_security(&self) -> Option<&Vec<Value>> {
        self.raw.get("security").and_then(Value::as_array)
    }
}

/// One (path, method) operation of the document.
///
/// A view into the raw document: parameters, request body and responses are
/// kept unresolved here and expanded by the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: Method,
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    /// Path-level parameters followed by operation-level parameters
    pub parameters: Vec<Value>,
    pub request_body: Option<Value>,
    /// Responses in declaration order, keyed by status (`"200"`, `"4XX"`, `"default"`)
    pub responses: Vec<(String, Value)>,
    /// `None` when the operation does not declare `security` itself
    pub security: Option<Vec<Value>>,
}

impl Endpoint {
    pub fn summary(&self) -> EndpointSummary {
        EndpointSummary {
            method: self.method.to_string(),
            path: self.path.clone(),
            operation_id: self.operation_id.clone(),
            summary: self.summary.clone(),
            tags: self.tags.clone(),
            deprecated: self.deprecated,
        }
    }
}

/// Listing record for an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub method: String,
    pub path: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

/// Filter applied when listing endpoints. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointFilter {
    /// Case-insensitive HTTP method
    pub method: Option<String>,
    /// Exact tag name
    pub tag: Option<String>,
    /// Substring of the path template
    pub path_contains: Option<String>,
}

impl EndpointFilter {
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        if let Some(method) = &self.method {
            if !endpoint.method.as_str().eq_ignore_ascii_case(method) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !endpoint.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(fragment) = &self.path_contains {
            if !endpoint.path.contains(fragment.as_str()) {
                return false;
            }
        }
        true
    }
}
