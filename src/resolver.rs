//! # Reference Resolver
//!
//! Expands `$ref` pointers in an OpenAPI document into concrete nodes.
//!
//! Resolution is recursive: a resolved target is itself walked until no
//! `$ref` remains. Cycles are detected with an explicit stack of the
//! references currently being expanded, so a schema reused along two
//! branches (a diamond) resolves fine while `A -> B -> A` fails with
//! [`ScenarioError::CircularReference`] carrying the whole chain.
//!
//! Every fully resolved reference is stored in a [`ResolutionCache`] keyed by
//! the reference string. The cache belongs to one document; call
//! [`ReferenceResolver::clear_cache`] before pointing the resolver at another.

use crate::error::{Result, ScenarioError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Keywords whose values are literal data, never schemas.
const LITERAL_KEYWORDS: [&str; 5] = ["example", "examples", "default", "enum", "const"];

/// Keywords whose values map arbitrary names to schemas.
const NAME_MAPS: [&str; 5] = [
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "dependentSchemas",
];

const SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Resolved nodes keyed by reference string.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, Value>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<&Value> {
        self.entries.get(reference)
    }

    /// Store a resolution. An existing entry is never replaced.
    pub fn insert(&mut self, reference: &str, resolved: Value) {
        self.entries
            .entry(reference.to_string())
            .or_insert(resolved);
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves local JSON-pointer references against a document tree.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    cache: ResolutionCache,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a reference string such as `#/components/schemas/Item` to its
    /// fully expanded target.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::ReferenceNotFound`] when the pointer does not exist or
    /// is not local, [`ScenarioError::CircularReference`] when expansion loops.
    pub fn resolve(&mut self, reference: &str, document: &Value) -> Result<Value> {
        let mut active = Vec::new();
        self.resolve_reference(reference, document, &mut active)
    }

    /// Walk a schema (or a bare `{"$ref": ..}` node) and expand every
    /// reference inside it.
    pub fn resolve_schema(&mut self, schema: &Value, document: &Value) -> Result<Value> {
        let mut active = Vec::new();
        self.walk(schema, document, &mut active)
    }

    /// Whether `reference` has a cached resolution.
    pub fn has_been_resolved(&self, reference: &str) -> bool {
        self.cache.contains(reference)
    }

    /// Drop every cached resolution.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing resolution cache");
        self.cache.clear();
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    fn resolve_reference(
        &mut self,
        reference: &str,
        document: &Value,
        active: &mut Vec<String>,
    ) -> Result<Value> {
        if let Some(hit) = self.cache.get(reference) {
            debug!(reference = %reference, "resolution cache hit");
            return Ok(hit.clone());
        }

        if active.iter().any(|r| r == reference) {
            let mut chain = active.clone();
            chain.push(reference.to_string());
            return Err(ScenarioError::CircularReference {
                chain,
                closing: reference.to_string(),
            });
        }

        let target = lookup(reference, document)?;

        active.push(reference.to_string());
        let walked = self.walk(target, document, active);
        active.pop();
        let mut resolved = walked?;

        if let (Some(name), Value::Object(obj)) = (schema_name(reference), &mut resolved) {
            obj.entry("x-ref-name")
                .or_insert_with(|| Value::String(name));
        }

        debug!(reference = %reference, depth = active.len(), "resolved reference");
        self.cache.insert(reference, resolved.clone());
        Ok(resolved)
    }

    fn walk(&mut self, node: &Value, document: &Value, active: &mut Vec<String>) -> Result<Value> {
        match node {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    let target = self.resolve_reference(reference, document, active)?;
                    return self.overlay_siblings(target, map, document, active);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.walk_keyword(key, value, document, active)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.walk(item, document, active))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn walk_keyword(
        &mut self,
        key: &str,
        value: &Value,
        document: &Value,
        active: &mut Vec<String>,
    ) -> Result<Value> {
        if LITERAL_KEYWORDS.contains(&key) {
            return Ok(value.clone());
        }
        if NAME_MAPS.contains(&key) {
            if let Value::Object(named) = value {
                let mut out = Map::with_capacity(named.len());
                for (name, schema) in named {
                    out.insert(name.clone(), self.walk(schema, document, active)?);
                }
                return Ok(Value::Object(out));
            }
        }
        self.walk(value, document, active)
    }

    /// Keys written next to `$ref` win over the target's own keys.
    fn overlay_siblings(
        &mut self,
        target: Value,
        node: &Map<String, Value>,
        document: &Value,
        active: &mut Vec<String>,
    ) -> Result<Value> {
        if node.len() == 1 {
            return Ok(target);
        }
        match target {
            Value::Object(mut merged) => {
                for (key, value) in node {
                    if key == "$ref" {
                        continue;
                    }
                    let walked = self.walk_keyword(key, value, document, active)?;
                    merged.insert(key.clone(), walked);
                }
                Ok(Value::Object(merged))
            }
            other => Ok(other),
        }
    }
}

/// Locate the node a local reference points at.
pub(crate) fn lookup<'a>(reference: &str, document: &'a Value) -> Result<&'a Value> {
    let not_found = || ScenarioError::ReferenceNotFound {
        reference: reference.to_string(),
    };

    let fragment = reference.strip_prefix('#').ok_or_else(not_found)?;
    let pointer = urlencoding::decode(fragment).map_err(|_| not_found())?;
    if pointer.is_empty() {
        return Ok(document);
    }
    if !pointer.starts_with('/') {
        return Err(not_found());
    }
    document.pointer(&pointer).ok_or_else(not_found)
}

/// Component name for `#/components/schemas/<Name>` references.
fn schema_name(reference: &str) -> Option<String> {
    let token = reference.strip_prefix(SCHEMA_PREFIX)?;
    if token.is_empty() || token.contains('/') {
        return None;
    }
    let decoded = urlencoding::decode(token).ok()?;
    Some(decoded.replace("~1", "/").replace("~0", "~"))
}

/// Whether any `$ref` key remains anywhere in `value`.
pub fn contains_reference(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("$ref") || map.values().any(contains_reference),
        Value::Array(items) => items.iter().any(contains_reference),
        _ => false,
    }
}
