use super::types::{ApiDocument, Endpoint};
use crate::resolver::lookup;
use http::Method;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{debug, warn};

const OPERATION_KEYS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

fn method_for(key: &str) -> Option<Method> {
    match key.to_ascii_lowercase().as_str() {
        "get" => Some(Method::GET),
        "put" => Some(Method::PUT),
        "post" => Some(Method::POST),
        "delete" => Some(Method::DELETE),
        "options" => Some(Method::OPTIONS),
        "head" => Some(Method::HEAD),
        "patch" => Some(Method::PATCH),
        "trace" => Some(Method::TRACE),
        _ => None,
    }
}

/// Derive an operation id from method and path: `GET /items/{id}` → `get_items_id`.
pub fn derive_operation_id(method: &Method, path: &str) -> String {
    let mut out = method.as_str().to_ascii_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let cleaned: String = segment
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let cleaned = cleaned.trim_matches('_');
        if !cleaned.is_empty() {
            out.push('_');
            out.push_str(cleaned);
        }
    }
    out
}

pub(crate) fn unique_operation_id(seen: &mut HashSet<String>, name: &str) -> String {
    if !seen.contains(name) {
        seen.insert(name.to_string());
        return name.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{name}_{counter}");
        if !seen.contains(&candidate) {
            warn!(original = %name, renamed = %candidate, "duplicate operation id");
            seen.insert(candidate.clone());
            return candidate;
        }
        counter += 1;
    }
}

fn string_field(op: &Value, key: &str) -> Option<String> {
    op.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Follow `$ref` chains on a path item. Keys written next to a `$ref` win
/// over the target's own keys.
fn dereference_path_item<'a>(
    path: &str,
    item: &'a Value,
    document: &Value,
) -> Option<Cow<'a, Value>> {
    if item.get("$ref").is_none() {
        return Some(Cow::Borrowed(item));
    }

    let mut current = item.clone();
    let mut followed: Vec<String> = Vec::new();
    while let Some(reference) = current.get("$ref").and_then(Value::as_str).map(str::to_string) {
        if followed.contains(&reference) {
            warn!(path = %path, reference = %reference, "path item references loop, skipping");
            return None;
        }
        let target = match lookup(&reference, document) {
            Ok(target) => target.clone(),
            Err(err) => {
                warn!(path = %path, error = %err, "path item reference could not be resolved, skipping");
                return None;
            }
        };
        let Value::Object(mut merged) = target else {
            warn!(path = %path, reference = %reference, "path item reference is not an object, skipping");
            return None;
        };
        if let Value::Object(siblings) = &current {
            for (key, value) in siblings {
                if key != "$ref" {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        debug!(path = %path, reference = %reference, "followed path item reference");
        followed.push(reference);
        current = Value::Object(merged);
    }
    Some(Cow::Owned(current))
}

/// Build endpoint views for every operation, in document declaration order.
pub fn build_endpoints(document: &ApiDocument) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    let mut seen = HashSet::new();

    let Some(paths) = document.raw().get("paths").and_then(Value::as_object) else {
        return endpoints;
    };

    for (path, item) in paths {
        let Some(item) = dereference_path_item(path, item, document.raw()) else {
            continue;
        };
        let Some(item_obj) = item.as_object() else {
            continue;
        };
        let path_parameters: Vec<Value> = item_obj
            .get("parameters")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for (key, op) in item_obj {
            if !OPERATION_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
                continue;
            }
            let Some(method) = method_for(key) else {
                continue;
            };

            let operation_id = string_field(op, "operationId")
                .unwrap_or_else(|| derive_operation_id(&method, path));
            let operation_id = unique_operation_id(&mut seen, &operation_id);

            let mut parameters = path_parameters.clone();
            if let Some(op_params) = op.get("parameters").and_then(Value::as_array) {
                parameters.extend(op_params.iter().cloned());
            }

            let responses = op
                .get("responses")
                .and_then(Value::as_object)
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default();

            let tags = op
                .get("tags")
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            debug!(method = %method, path = %path, operation_id = %operation_id, "found operation");

            endpoints.push(Endpoint {
                path: path.clone(),
                method,
                operation_id,
                summary: string_field(op, "summary"),
                description: string_field(op, "description"),
                tags,
                deprecated: op.get("deprecated").and_then(Value::as_bool).unwrap_or(false),
                parameters,
                request_body: op.get("requestBody").cloned(),
                responses,
                security: op.get("security").and_then(Value::as_array).cloned(),
            });
        }
    }

    endpoints
}
