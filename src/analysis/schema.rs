//! Schema shape helpers used by the analyzer on already resolved schemas.

use super::types::{FieldConstraints, FieldInfo, FieldKind};
use serde_json::{Map, Value};

/// Collapse composition keywords into one object schema.
///
/// `allOf` members are merged in order (first declaration of a property wins
/// between members, the schema's own properties are applied last), `required`
/// lists are unioned without duplicates. `oneOf`/`anyOf` take their first
/// alternative.
pub fn flatten_schema(schema: &Value) -> Value {
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };

    if let Some(Value::Array(parts)) = obj.get("allOf") {
        let mut merged = Map::new();
        let mut properties = Map::new();
        let mut required: Vec<Value> = Vec::new();

        for part in parts {
            let flat = flatten_schema(part);
            let Some(part_obj) = flat.as_object() else {
                continue;
            };
            absorb(part_obj, &mut merged, &mut properties, &mut required, false);
        }

        let mut own = obj.clone();
        own.remove("allOf");
        let own = flatten_schema(&Value::Object(own));
        if let Some(own_obj) = own.as_object() {
            absorb(own_obj, &mut merged, &mut properties, &mut required, true);
        }

        if !properties.is_empty() {
            merged.insert("properties".to_string(), Value::Object(properties));
            merged
                .entry("type")
                .or_insert_with(|| Value::String("object".to_string()));
        }
        if !required.is_empty() {
            merged.insert("required".to_string(), Value::Array(required));
        }
        return Value::Object(merged);
    }

    for keyword in ["oneOf", "anyOf"] {
        if let Some(Value::Array(alternatives)) = obj.get(keyword) {
            let mut rest = obj.clone();
            rest.remove(keyword);
            let Some(first) = alternatives.first() else {
                return Value::Object(rest);
            };
            let mut chosen = match flatten_schema(first) {
                Value::Object(m) => m,
                _ => Map::new(),
            };
            for (key, value) in rest {
                chosen.entry(key).or_insert(value);
            }
            return flatten_schema(&Value::Object(chosen));
        }
    }

    schema.clone()
}

fn absorb(
    source: &Map<String, Value>,
    merged: &mut Map<String, Value>,
    properties: &mut Map<String, Value>,
    required: &mut Vec<Value>,
    overriding: bool,
) {
    for (key, value) in source {
        match key.as_str() {
            "properties" => {
                if let Some(props) = value.as_object() {
                    for (name, prop) in props {
                        if overriding || !properties.contains_key(name) {
                            properties.insert(name.clone(), prop.clone());
                        }
                    }
                }
            }
            "required" => {
                if let Some(names) = value.as_array() {
                    for name in names {
                        if !required.contains(name) {
                            required.push(name.clone());
                        }
                    }
                }
            }
            _ => {
                if overriding {
                    merged.insert(key.clone(), value.clone());
                } else {
                    merged.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
    }
}

fn as_u64(schema: &Value, key: &str) -> Option<u64> {
    schema.get(key).and_then(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    })
}

fn infer_kind(schema: &Value) -> FieldKind {
    if schema.get("properties").is_some() {
        return FieldKind::Object;
    }
    if schema.get("items").is_some() {
        return FieldKind::Array;
    }
    if let Some(first) = schema.get("enum").and_then(Value::as_array).and_then(|e| e.first()) {
        return kind_of_value(first);
    }
    if ["minLength", "maxLength", "pattern", "format"]
        .iter()
        .any(|k| schema.get(*k).is_some())
    {
        return FieldKind::String;
    }
    if ["minimum", "maximum", "multipleOf"].iter().any(|k| schema.get(*k).is_some()) {
        return FieldKind::Number;
    }
    FieldKind::Unknown
}

/// Kind of a literal JSON value.
pub fn kind_of_value(value: &Value) -> FieldKind {
    match value {
        Value::String(_) => FieldKind::String,
        Value::Number(n) if n.is_i64() || n.is_u64() => FieldKind::Integer,
        Value::Number(_) => FieldKind::Number,
        Value::Bool(_) => FieldKind::Boolean,
        Value::Array(_) => FieldKind::Array,
        Value::Object(_) => FieldKind::Object,
        Value::Null => FieldKind::Unknown,
    }
}

/// Read kind and validation keywords off a schema.
pub fn constraints_for(schema: &Value) -> FieldConstraints {
    let schema = flatten_schema(schema);

    let mut nullable = schema
        .get("nullable")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let kind = match schema.get("type") {
        Some(Value::String(name)) => FieldKind::from_type_name(name),
        Some(Value::Array(names)) => {
            let mut kind = FieldKind::Unknown;
            for name in names.iter().filter_map(Value::as_str) {
                if name == "null" {
                    nullable = true;
                } else if kind == FieldKind::Unknown {
                    kind = FieldKind::from_type_name(name);
                }
            }
            kind
        }
        _ => infer_kind(&schema),
    };

    let mut constraints = FieldConstraints::unconstrained(kind);
    constraints.nullable = nullable;
    constraints.format = schema
        .get("format")
        .and_then(Value::as_str)
        .map(str::to_string);
    constraints.minimum = schema.get("minimum").and_then(Value::as_f64);
    constraints.maximum = schema.get("maximum").and_then(Value::as_f64);

    // 3.0 uses booleans next to minimum/maximum, 3.1 carries the bound itself
    match schema.get("exclusiveMinimum") {
        Some(Value::Bool(b)) => constraints.exclusive_minimum = *b && constraints.minimum.is_some(),
        Some(Value::Number(n)) => {
            constraints.minimum = n.as_f64();
            constraints.exclusive_minimum = true;
        }
        _ => {}
    }
    match schema.get("exclusiveMaximum") {
        Some(Value::Bool(b)) => constraints.exclusive_maximum = *b && constraints.maximum.is_some(),
        Some(Value::Number(n)) => {
            constraints.maximum = n.as_f64();
            constraints.exclusive_maximum = true;
        }
        _ => {}
    }

    constraints.multiple_of = schema
        .get("multipleOf")
        .and_then(Value::as_f64)
        .filter(|m| *m > 0.0);
    constraints.min_length = as_u64(&schema, "minLength");
    constraints.max_length = as_u64(&schema, "maxLength");
    constraints.pattern = schema
        .get("pattern")
        .and_then(Value::as_str)
        .map(str::to_string);
    constraints.min_items = as_u64(&schema, "minItems");
    constraints.max_items = as_u64(&schema, "maxItems");
    constraints.unique_items = schema
        .get("uniqueItems")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if let Some(values) = schema.get("enum").and_then(Value::as_array) {
        constraints.enum_values = values.iter().filter(|v| !v.is_null()).cloned().collect();
    } else if let Some(value) = schema.get("const") {
        constraints.enum_values = vec![value.clone()];
    }

    constraints
}

/// Top-level properties of an object schema in declaration order,
/// excluding `readOnly` ones.
pub fn object_fields(schema: &Value) -> Vec<FieldInfo> {
    let flat = flatten_schema(schema);
    let required: Vec<&str> = flat
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = flat.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .filter(|(_, prop)| !prop.get("readOnly").and_then(Value::as_bool).unwrap_or(false))
        .map(|(name, prop)| {
            let prop = flatten_schema(prop);
            FieldInfo {
                name: name.clone(),
                required: required.contains(&name.as_str()),
                constraints: constraints_for(&prop),
                schema: prop,
            }
        })
        .collect()
}

/// Component name recorded by the resolver, if any.
pub fn schema_name(schema: &Value) -> Option<String> {
    schema
        .get("x-ref-name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_of_merges_properties_in_order() {
        let schema = json!({
            "allOf": [
                { "type": "object", "required": ["id"], "properties": { "id": { "type": "integer" } } },
                { "required": ["name", "id"], "properties": { "name": { "type": "string" }, "id": { "type": "string" } } }
            ],
            "properties": { "tag": { "type": "string" } }
        });
        let flat = flatten_schema(&schema);
        let keys: Vec<&String> = flat["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "name", "tag"]);
        assert_eq!(flat["properties"]["id"]["type"], "integer");
        assert_eq!(flat["required"], json!(["id", "name"]));
        assert_eq!(flat["type"], "object");
    }

    #[test]
    fn test_one_of_takes_first_alternative() {
        let schema = json!({
            "oneOf": [
                { "type": "object", "properties": { "cat": { "type": "string" } } },
                { "type": "object", "properties": { "dog": { "type": "string" } } }
            ],
            "description": "pet"
        });
        let flat = flatten_schema(&schema);
        assert!(flat["properties"].get("cat").is_some());
        assert!(flat["properties"].get("dog").is_none());
        assert_eq!(flat["description"], "pet");
    }

    #[test]
    fn test_constraints_nullable_type_array() {
        let c = constraints_for(&json!({ "type": ["integer", "null"], "minimum": 1, "maximum": 10 }));
        assert_eq!(c.kind, FieldKind::Integer);
        assert!(c.nullable);
        assert_eq!(c.minimum, Some(1.0));
        assert_eq!(c.maximum, Some(10.0));
    }

    #[test]
    fn test_exclusive_bounds_both_dialects() {
        let v30 = constraints_for(&json!({ "type": "integer", "minimum": 0, "exclusiveMinimum": true }));
        assert!(v30.exclusive_minimum);
        assert_eq!(v30.minimum, Some(0.0));

        let v31 = constraints_for(&json!({ "type": "integer", "exclusiveMaximum": 100 }));
        assert!(v31.exclusive_maximum);
        assert_eq!(v31.maximum, Some(100.0));
    }

    #[test]
    fn test_object_fields_skip_read_only() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "id": { "type": "string", "readOnly": true },
                "name": { "type": "string", "minLength": 2 },
                "age": { "type": "integer" }
            }
        });
        let fields = object_fields(&schema);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert!(fields[0].required);
        assert_eq!(fields[0].constraints.min_length, Some(2));
        assert!(!fields[1].required);
    }

    #[test]
    fn test_kind_inferred_without_type() {
        assert_eq!(constraints_for(&json!({ "enum": ["a", "b"] })).kind, FieldKind::String);
        assert_eq!(constraints_for(&json!({ "items": {} })).kind, FieldKind::Array);
        assert_eq!(constraints_for(&json!({})).kind, FieldKind::Unknown);
    }
}
