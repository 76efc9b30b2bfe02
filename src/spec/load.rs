use super::types::{ApiDocument, SpecFormat};
use crate::error::{Result, ScenarioError};
use oas3::OpenApiV3Spec;
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Remove keys from path items that are neither operations nor path-item fields.
fn strip_unknown_verbs(val: &mut Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    if let Some(Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let Value::Object(obj) = item {
                let keys: Vec<String> = obj.keys().cloned().collect();
                for k in keys {
                    let lk = k.to_ascii_lowercase();
                    let keep = match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    };
                    if !keep {
                        debug!(key = %k, "dropping unknown path item key");
                        obj.remove(&k);
                    }
                }
            }
        }
    }
}

/// Convert a YAML tree into JSON, stringifying non-string mapping keys
/// (unquoted status codes such as `200:` parse as integers).
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut out = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => serde_yaml::to_string(&other)
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                };
                out.insert(key, yaml_to_json(v));
            }
            Value::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Parse a document from raw content.
///
/// The typed `oas3` parse acts as the shape check; a document it rejects is
/// reported as a `spec_load` error.
pub fn load_document_from_str(content: &str, format: SpecFormat) -> Result<ApiDocument> {
    let mut value = match format {
        SpecFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| ScenarioError::SpecLoad {
                    message: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json(yaml)
        }
        SpecFormat::Json => serde_json::from_str(content).map_err(|e| ScenarioError::SpecLoad {
            message: format!("invalid JSON: {e}"),
        })?,
    };

    strip_unknown_verbs(&mut value);
    load_document_from_value(value)
}

/// Build a document from an already parsed JSON tree.
///
/// Requires an `openapi: 3.x` version and an `info.title`. Anything the typed
/// `oas3` model rejects beyond that is logged and the raw tree is used alone.
pub fn load_document_from_value(value: Value) -> Result<ApiDocument> {
    if !value.is_object() {
        return Err(ScenarioError::SpecLoad {
            message: "document root must be an object".to_string(),
        });
    }
    match value.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with("3.") => {}
        Some(version) => {
            return Err(ScenarioError::SpecLoad {
                message: format!("unsupported OpenAPI version '{version}' (expected 3.x)"),
            })
        }
        None => {
            return Err(ScenarioError::SpecLoad {
                message: "missing 'openapi' version field".to_string(),
            })
        }
    }
    if value.pointer("/info/title").and_then(Value::as_str).is_none() {
        return Err(ScenarioError::SpecLoad {
            message: "missing 'info.title'".to_string(),
        });
    }

    let spec = match serde_json::from_value::<OpenApiV3Spec>(value.clone()) {
        Ok(spec) => Some(spec),
        Err(e) => {
            warn!(error = %e, "document does not match the typed OpenAPI model, continuing with raw tree");
            None
        }
    };
    let document = ApiDocument::new(value, spec.as_ref());
    debug!(title = %document.title(), version = %document.version(), "loaded OpenAPI document");
    Ok(document)
}

/// Read and parse a document from disk, choosing YAML or JSON by extension.
pub fn load_document(file_path: &Path) -> Result<ApiDocument> {
    let content = std::fs::read_to_string(file_path).map_err(|e| ScenarioError::Io {
        path: file_path.display().to_string(),
        message: e.to_string(),
    })?;
    load_document_from_str(&content, SpecFormat::from_path(file_path))
}
