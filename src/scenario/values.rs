//! Sample values for generated steps.
//!
//! Valid values honour the field's constraints; invalid values each break
//! exactly one constraint class.

use super::pattern::PatternSampler;
use crate::analysis::{constraints_for, flatten_schema, FieldConstraints, FieldKind};
use regex::Regex;
use serde_json::{Map, Number, Value};
use tracing::warn;

/// Longest string written out into a step; longer boundaries are skipped.
pub const MAX_STRING_LENGTH: u64 = 4096;

/// Largest array written out into a step; larger boundaries are skipped.
pub const MAX_ITEMS: u64 = 256;

const STRING_CANDIDATES: [&str; 12] = [
    "a",
    "example",
    "A",
    "abc",
    "ABC",
    "1",
    "123",
    "a1",
    "abc123",
    "ABC-123",
    "user@example.com",
    "2024-01-15",
];

const MISMATCH_CANDIDATES: [&str; 6] = ["!!!", "", " ", "invalid value", "0", "a"];

const EMAIL_DOMAIN: &str = "@example.com";
const URI_PREFIX: &str = "https://example.com/";

fn format_sample(format: &str) -> Option<&'static str> {
    let sample = match format {
        "date" => "2024-01-15",
        "date-time" => "2024-01-15T10:30:00Z",
        "time" => "10:30:00",
        "email" => "user@example.com",
        "uuid" => "123e4567-e89b-12d3-a456-426614174000",
        "uri" | "url" => "https://example.com/resource",
        "hostname" => "example.com",
        "ipv4" => "192.168.1.1",
        "ipv6" => "2001:db8::1",
        "byte" => "ZXhhbXBsZQ==",
        "password" => "P@ssw0rd!",
        _ => return None,
    };
    Some(sample)
}

/// A value of `format` that is exactly `len` characters long.
fn format_of_length(format: &str, len: usize) -> Option<String> {
    match format {
        "email" => len
            .checked_sub(EMAIL_DOMAIN.len())
            .filter(|local| *local > 0)
            .map(|local| format!("{}{EMAIL_DOMAIN}", "a".repeat(local))),
        "uri" | "url" => len
            .checked_sub(URI_PREFIX.len())
            .map(|rest| format!("{URI_PREFIX}{}", "a".repeat(rest))),
        "password" => Some("x".repeat(len)),
        "byte" => (len % 4 == 0).then(|| "YWFh".repeat(len / 4)),
        other => match format_sample(other) {
            Some(sample) => (sample.chars().count() == len).then(|| sample.to_string()),
            None => Some("a".repeat(len)),
        },
    }
}

/// Build a JSON number, as an integer when the kind calls for one.
pub fn number_value(value: f64, kind: FieldKind) -> Value {
    if kind == FieldKind::Integer && value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

/// Render a value for step text: strings as-is, everything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value for a table cell (JSON encoding, strings quoted).
pub fn render_cell(value: &Value) -> String {
    value.to_string()
}

fn fit_length(base: &str, c: &FieldConstraints, pad: char) -> Option<String> {
    let min = c.min_length.unwrap_or(0);
    if min > MAX_STRING_LENGTH || c.max_length.map_or(false, |max| max < min) {
        return None;
    }
    let mut out: String = match c.max_length {
        Some(max) => base.chars().take(max.min(MAX_STRING_LENGTH) as usize).collect(),
        None => base.to_string(),
    };
    while (out.chars().count() as u64) < min {
        out.push(pad);
    }
    Some(out)
}

fn pattern_regex(c: &FieldConstraints) -> Option<Regex> {
    c.pattern.as_deref().and_then(|p| Regex::new(p).ok())
}

fn pattern_sampler(c: &FieldConstraints) -> Option<PatternSampler> {
    c.pattern.as_deref().and_then(PatternSampler::new)
}

fn length_ok(s: &str, c: &FieldConstraints) -> bool {
    let len = s.chars().count() as u64;
    c.min_length.map_or(true, |min| min <= len) && c.max_length.map_or(true, |max| len <= max)
}

/// A string of exactly `len` characters that satisfies the field's pattern
/// and format. Length limits are not consulted, so callers can ask for
/// lengths just outside them.
fn string_of_length(c: &FieldConstraints, len: u64) -> Option<String> {
    if len > MAX_STRING_LENGTH {
        return None;
    }
    let len = len as usize;
    if let Some(sampler) = pattern_sampler(c) {
        return sampler.sample_exact(len);
    }
    match c.format.as_deref() {
        Some(format) => format_of_length(format, len),
        None => Some("a".repeat(len)),
    }
}

fn string_value(c: &FieldConstraints, minimal: bool) -> Option<String> {
    let sampler = pattern_sampler(c);
    let pattern_ok = |s: &str| sampler.as_ref().map_or(true, |p| p.matches(s));

    if let Some(sample) = c.format.as_deref().and_then(format_sample) {
        if length_ok(sample, c) && pattern_ok(sample) {
            return Some(sample.to_string());
        }
    }
    if let Some(sampler) = &sampler {
        if let Some(found) = STRING_CANDIDATES
            .iter()
            .find(|candidate| sampler.matches(candidate) && length_ok(candidate, c))
        {
            return Some(found.to_string());
        }
        let target = c.min_length.unwrap_or(0).min(MAX_STRING_LENGTH) as usize;
        return sampler.sample(target).filter(|s| length_ok(s, c));
    }

    let shortest = c
        .min_length
        .unwrap_or(1)
        .max(1)
        .min(c.max_length.unwrap_or(u64::MAX));
    if minimal || c.format.is_some() {
        string_of_length(c, shortest)
    } else {
        fit_length("example", c, 'x')
    }
}

/// Used when no generated string satisfies every rule on the field.
fn fallback_string(schema: &Value, c: &FieldConstraints) -> Value {
    if let Some(given) = schema
        .get("example")
        .or_else(|| schema.get("default"))
        .filter(|v| v.is_string())
    {
        return given.clone();
    }
    warn!(
        pattern = ?c.pattern,
        format = ?c.format,
        min_length = ?c.min_length,
        max_length = ?c.max_length,
        "no sample string satisfies the field constraints; using a placeholder"
    );
    let len = c.min_length.unwrap_or(1).clamp(1, MAX_STRING_LENGTH);
    Value::String("a".repeat(len as usize))
}

/// Snap `value` onto the `multipleOf` grid, moving up.
fn snap_up(value: f64, c: &FieldConstraints) -> f64 {
    match c.multiple_of {
        Some(step) => (value / step).ceil() * step,
        None => value,
    }
}

fn lower_bound(c: &FieldConstraints) -> Option<f64> {
    let min = c.minimum?;
    if !c.exclusive_minimum {
        return Some(min);
    }
    Some(match (c.kind, c.maximum) {
        (FieldKind::Integer, _) => min.floor() + 1.0,
        (_, Some(max)) => (min + max) / 2.0,
        _ => min + 1.0,
    })
}

fn upper_bound(c: &FieldConstraints) -> Option<f64> {
    let max = c.maximum?;
    if !c.exclusive_maximum {
        return Some(max);
    }
    Some(match (c.kind, c.minimum) {
        (FieldKind::Integer, _) => max.ceil() - 1.0,
        (_, Some(min)) => (min + max) / 2.0,
        _ => max - 1.0,
    })
}

fn numeric_value(c: &FieldConstraints, preferred: f64) -> Value {
    let mut value = preferred;
    if let Some(low) = lower_bound(c) {
        if value < low {
            value = low;
        }
    }
    if let Some(high) = upper_bound(c) {
        if value > high {
            value = high;
        }
    }
    let snapped = snap_up(value, c);
    let value = match upper_bound(c) {
        Some(high) if snapped > high => value,
        _ => snapped,
    };
    number_value(value, c.kind)
}

fn items_schema(schema: &Value) -> Value {
    schema
        .get("items")
        .map(flatten_schema)
        .unwrap_or_else(|| serde_json::json!({ "type": "string" }))
}

/// `count` valid items, pairwise distinct when the array asks for unique items.
fn items_of_count(schema: &Value, c: &FieldConstraints, count: u64, minimal: bool) -> Option<Value> {
    if count > MAX_ITEMS {
        return None;
    }
    let items = items_schema(schema);
    let item_constraints = constraints_for(&items);
    if c.unique_items && count > 1 {
        return distinct_values(&item_constraints, count as usize).map(Value::Array);
    }
    let item = sample_value(&items, &item_constraints, minimal);
    Some(Value::Array(vec![item; count as usize]))
}

fn distinct_values(c: &FieldConstraints, count: usize) -> Option<Vec<Value>> {
    if c.has_enum() {
        return (c.enum_values.len() >= count).then(|| c.enum_values[..count].to_vec());
    }
    match c.kind {
        FieldKind::Integer | FieldKind::Number => {
            let step = c.multiple_of.unwrap_or(1.0);
            let first = snap_up(lower_bound(c).unwrap_or(1.0), c);
            let last = first + step * (count - 1) as f64;
            if upper_bound(c).map_or(false, |high| last > high) {
                return None;
            }
            Some(
                (0..count)
                    .map(|i| number_value(first + step * i as f64, c.kind))
                    .collect(),
            )
        }
        FieldKind::Boolean => {
            (count <= 2).then(|| [true, false][..count].iter().map(|b| Value::Bool(*b)).collect())
        }
        FieldKind::String | FieldKind::Unknown => distinct_strings(c, count),
        FieldKind::Array | FieldKind::Object => None,
    }
}

/// Fixed-width letter codes for plain strings; otherwise one sample per length.
fn distinct_strings(c: &FieldConstraints, count: usize) -> Option<Vec<Value>> {
    if c.pattern.is_none() && c.format.is_none() {
        let mut width = c.min_length.unwrap_or(1).max(1);
        while 26u64.checked_pow(width as u32).map_or(false, |n| (n as usize) < count) {
            width += 1;
        }
        if width > MAX_STRING_LENGTH || c.max_length.map_or(false, |max| width > max) {
            return None;
        }
        return Some(
            (0..count)
                .map(|i| Value::String(letter_code(i, width as usize)))
                .collect(),
        );
    }

    let longest = c.max_length.unwrap_or(MAX_STRING_LENGTH).min(MAX_STRING_LENGTH);
    let mut out: Vec<Value> = Vec::with_capacity(count);
    let mut len = c.min_length.unwrap_or(0);
    while out.len() < count && len <= longest {
        if let Some(s) = string_of_length(c, len).map(Value::String) {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        len += 1;
    }
    (out.len() == count).then_some(out)
}

fn letter_code(mut index: usize, width: usize) -> String {
    let mut letters = vec!['a'; width];
    for slot in letters.iter_mut().rev() {
        *slot = char::from(b'a' + (index % 26) as u8);
        index /= 26;
    }
    letters.into_iter().collect()
}

fn object_value(schema: &Value, minimal: bool) -> Value {
    let flat = flatten_schema(schema);
    let required: Vec<&str> = flat
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let mut out = Map::new();
    if let Some(props) = flat.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            if prop.get("readOnly").and_then(Value::as_bool).unwrap_or(false) {
                continue;
            }
            if minimal && !required.contains(&name.as_str()) {
                continue;
            }
            let prop = flatten_schema(prop);
            out.insert(name.clone(), sample_value(&prop, &constraints_for(&prop), minimal));
        }
    }
    Value::Object(out)
}

fn sample_value(schema: &Value, c: &FieldConstraints, minimal: bool) -> Value {
    if let Some(first) = c.enum_values.first() {
        return first.clone();
    }
    match c.kind {
        FieldKind::String | FieldKind::Unknown => match string_value(c, minimal) {
            Some(s) => Value::String(s),
            None => fallback_string(schema, c),
        },
        FieldKind::Integer | FieldKind::Number if minimal => {
            numeric_value(c, lower_bound(c).unwrap_or(1.0))
        }
        FieldKind::Integer => numeric_value(c, 42.0),
        FieldKind::Number => numeric_value(c, 12.5),
        FieldKind::Boolean => Value::Bool(true),
        FieldKind::Array => {
            let count = c
                .min_items
                .unwrap_or(1)
                .max(1)
                .min(c.max_items.unwrap_or(u64::MAX));
            items_of_count(schema, c, count, minimal).unwrap_or_else(|| {
                warn!(
                    min_items = ?c.min_items,
                    unique = c.unique_items,
                    "no sample array satisfies the field constraints; using an empty one"
                );
                Value::Array(Vec::new())
            })
        }
        FieldKind::Object => object_value(schema, minimal),
    }
}

/// Smallest valid value: shortest string, lowest number, first enum value.
pub fn minimal_value(schema: &Value, c: &FieldConstraints) -> Value {
    sample_value(schema, c, true)
}

/// A typical valid value. Uses the schema's own `example` or `default` when given.
pub fn representative_value(schema: &Value, c: &FieldConstraints) -> Value {
    if let Some(example) = schema.get("example").or_else(|| schema.get("default")) {
        if !example.is_null() {
            return example.clone();
        }
    }
    sample_value(schema, c, false)
}

/// A value of another JSON type.
pub fn wrong_type_value(kind: FieldKind) -> Option<Value> {
    let value = match kind {
        FieldKind::String => Value::from(12345),
        FieldKind::Integer | FieldKind::Number => Value::from("not-a-number"),
        FieldKind::Boolean => Value::from("not-a-boolean"),
        FieldKind::Array => Value::from("not-an-array"),
        FieldKind::Object => Value::from("not-an-object"),
        FieldKind::Unknown => return None,
    };
    Some(value)
}

pub fn below_minimum(c: &FieldConstraints) -> Option<Value> {
    let min = c.minimum?;
    let value = if c.exclusive_minimum { min } else { min - 1.0 };
    Some(number_value(value, c.kind))
}

pub fn above_maximum(c: &FieldConstraints) -> Option<Value> {
    let max = c.maximum?;
    let value = if c.exclusive_maximum { max } else { max + 1.0 };
    Some(number_value(value, c.kind))
}

/// One character short of `minLength`, still matching pattern and format.
pub fn too_short(c: &FieldConstraints) -> Option<Value> {
    let min = c.min_length.filter(|m| *m > 0)?;
    string_of_length(c, min - 1).map(Value::String)
}

/// One character past `maxLength`, still matching pattern and format.
pub fn too_long(c: &FieldConstraints) -> Option<Value> {
    let len = c.max_length?.checked_add(1)?;
    string_of_length(c, len).map(Value::String)
}

pub fn too_few_items(schema: &Value, c: &FieldConstraints) -> Option<Value> {
    let min = c.min_items.filter(|m| *m > 0)?;
    items_of_count(schema, c, min - 1, true)
}

pub fn too_many_items(schema: &Value, c: &FieldConstraints) -> Option<Value> {
    let count = c.max_items?.checked_add(1)?;
    items_of_count(schema, c, count, true)
}

/// A value outside the enum, of the same JSON type as its members.
pub fn out_of_enum_value(c: &FieldConstraints) -> Option<Value> {
    let first = c.enum_values.first()?;
    if first.is_number() {
        let highest = c
            .enum_values
            .iter()
            .filter_map(Value::as_f64)
            .fold(f64::MIN, f64::max);
        let kind = if first.is_f64() { FieldKind::Number } else { FieldKind::Integer };
        return Some(number_value(highest.floor() + 1.0, kind));
    }
    let mut candidate = "invalid-value".to_string();
    let mut counter = 0;
    while c.enum_values.iter().any(|v| v.as_str() == Some(candidate.as_str())) {
        counter += 1;
        candidate = format!("invalid-value-{counter}");
    }
    Some(Value::String(candidate))
}

/// A string the field's pattern rejects.
pub fn pattern_mismatch(c: &FieldConstraints) -> Option<Value> {
    let re = pattern_regex(c)?;
    MISMATCH_CANDIDATES
        .iter()
        .find(|candidate| !re.is_match(candidate))
        .map(|s| Value::String(s.to_string()))
}

/// Exact lower boundary, stepping inward for exclusive integer bounds.
pub fn minimum_boundary(c: &FieldConstraints) -> Option<Value> {
    let min = c.minimum?;
    if !c.exclusive_minimum {
        return Some(number_value(min, c.kind));
    }
    (c.kind == FieldKind::Integer).then(|| number_value(min.floor() + 1.0, c.kind))
}

pub fn maximum_boundary(c: &FieldConstraints) -> Option<Value> {
    let max = c.maximum?;
    if !c.exclusive_maximum {
        return Some(number_value(max, c.kind));
    }
    (c.kind == FieldKind::Integer).then(|| number_value(max.ceil() - 1.0, c.kind))
}

pub fn min_length_value(c: &FieldConstraints) -> Option<Value> {
    string_of_length(c, c.min_length?).map(Value::String)
}

pub fn max_length_value(c: &FieldConstraints) -> Option<Value> {
    string_of_length(c, c.max_length?).map(Value::String)
}

pub fn min_items_value(schema: &Value, c: &FieldConstraints) -> Option<Value> {
    items_of_count(schema, c, c.min_items?, true)
}

pub fn max_items_value(schema: &Value, c: &FieldConstraints) -> Option<Value> {
    items_of_count(schema, c, c.max_items?, true)
}

/// The "empty" value of the field, when its rules accept one.
pub fn empty_value(c: &FieldConstraints) -> Option<Value> {
    match c.kind {
        FieldKind::String => string_of_length(c, 0).map(Value::String),
        FieldKind::Array => Some(Value::Array(Vec::new())),
        FieldKind::Object => Some(Value::Object(Map::new())),
        _ => None,
    }
}

/// A well-formed identifier that should not exist.
pub fn non_existent_identifier(c: &FieldConstraints, configured: Option<&str>) -> Value {
    if let Some(configured) = configured {
        if c.kind.is_numeric() {
            if let Ok(n) = configured.parse::<i64>() {
                return Value::from(n);
            }
        }
        return Value::String(configured.to_string());
    }
    match c.kind {
        FieldKind::Integer | FieldKind::Number => {
            let mut value = 999_999_999.0;
            if let Some(high) = upper_bound(c) {
                value = high.floor();
            }
            number_value(value, FieldKind::Integer)
        }
        _ if c.format.as_deref() == Some("uuid") => {
            Value::String("00000000-0000-0000-0000-000000000000".to_string())
        }
        _ => fit_length("nonexistent-id-000000", c, '0')
            .map(Value::String)
            .unwrap_or_else(|| Value::String("nonexistent-id".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(schema: Value) -> FieldConstraints {
        constraints_for(&schema)
    }

    #[test]
    fn test_minimal_string_honours_min_length() {
        let schema = json!({ "type": "string", "minLength": 3, "maxLength": 10 });
        assert_eq!(minimal_value(&schema, &c(schema.clone())), json!("aaa"));
        let schema = json!({ "type": "string" });
        assert_eq!(minimal_value(&schema, &c(schema.clone())), json!("a"));
    }

    #[test]
    fn test_minimal_number_uses_declared_minimum() {
        let schema = json!({ "type": "integer", "minimum": 5, "maximum": 10 });
        assert_eq!(minimal_value(&schema, &c(schema.clone())), json!(5));
        let schema = json!({ "type": "integer", "minimum": 5, "exclusiveMinimum": true });
        assert_eq!(minimal_value(&schema, &c(schema.clone())), json!(6));
    }

    #[test]
    fn test_representative_values() {
        let schema = json!({ "type": "integer" });
        assert_eq!(representative_value(&schema, &c(schema.clone())), json!(42));
        let schema = json!({ "type": "integer", "maximum": 10 });
        assert_eq!(representative_value(&schema, &c(schema.clone())), json!(10));
        let schema = json!({ "type": "string", "format": "email" });
        assert_eq!(representative_value(&schema, &c(schema.clone())), json!("user@example.com"));
        let schema = json!({ "type": "string", "example": "Rex" });
        assert_eq!(representative_value(&schema, &c(schema.clone())), json!("Rex"));
        let schema = json!({ "type": "string", "enum": ["available", "sold"] });
        assert_eq!(representative_value(&schema, &c(schema.clone())), json!("available"));
    }

    #[test]
    fn test_pattern_values() {
        let constraints = c(json!({ "type": "string", "pattern": "^[0-9]+$" }));
        let schema = json!({ "type": "string", "pattern": "^[0-9]+$" });
        assert_eq!(minimal_value(&schema, &constraints), json!("1"));
        assert_eq!(pattern_mismatch(&constraints), Some(json!("!!!")));
    }

    #[test]
    fn test_bounds_violations() {
        let constraints = c(json!({ "type": "integer", "minimum": 1, "maximum": 100 }));
        assert_eq!(below_minimum(&constraints), Some(json!(0)));
        assert_eq!(above_maximum(&constraints), Some(json!(101)));

        let exclusive = c(json!({ "type": "integer", "exclusiveMinimum": 0, "exclusiveMaximum": 10 }));
        assert_eq!(below_minimum(&exclusive), Some(json!(0)));
        assert_eq!(minimum_boundary(&exclusive), Some(json!(1)));
        assert_eq!(maximum_boundary(&exclusive), Some(json!(9)));
    }

    #[test]
    fn test_out_of_enum_value_avoids_members() {
        let constraints = c(json!({ "enum": ["invalid-value", "ok"] }));
        assert_eq!(out_of_enum_value(&constraints), Some(json!("invalid-value-1")));
        let constraints = c(json!({ "type": "integer", "enum": [1, 2, 3] }));
        assert_eq!(out_of_enum_value(&constraints), Some(json!(4)));
    }

    #[test]
    fn test_non_existent_identifier() {
        assert_eq!(
            non_existent_identifier(&c(json!({ "type": "string", "format": "uuid" })), None),
            json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(non_existent_identifier(&c(json!({ "type": "integer" })), None), json!(999999999));
        assert_eq!(
            non_existent_identifier(&c(json!({ "type": "string", "maxLength": 5 })), None),
            json!("nonex")
        );
        assert_eq!(
            non_existent_identifier(&c(json!({ "type": "integer" })), Some("424242")),
            json!(424242)
        );
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("abc")), "abc");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_cell(&json!("abc")), "\"abc\"");
    }

    #[test]
    fn test_generated_string_for_uncommon_pattern() {
        let schema = json!({ "type": "string", "pattern": "^[A-Z]{3}-[0-9]{4}$" });
        let constraints = c(schema.clone());
        assert_eq!(minimal_value(&schema, &constraints), json!("AAA-0000"));
        assert_eq!(representative_value(&schema, &constraints), json!("AAA-0000"));
    }

    #[test]
    fn test_length_values_keep_the_pattern() {
        let constraints = c(json!({ "type": "string", "pattern": "^[0-9]+$", "minLength": 3, "maxLength": 5 }));
        assert_eq!(min_length_value(&constraints), Some(json!("000")));
        assert_eq!(max_length_value(&constraints), Some(json!("00000")));
        assert_eq!(too_short(&constraints), Some(json!("00")));
        assert_eq!(too_long(&constraints), Some(json!("000000")));

        let fixed = c(json!({ "type": "string", "pattern": "^[0-9]{4}$", "minLength": 4 }));
        assert_eq!(too_short(&fixed), None);
        assert_eq!(empty_value(&fixed), None);
        assert_eq!(empty_value(&c(json!({ "type": "string" }))), Some(json!("")));
    }

    #[test]
    fn test_length_values_keep_the_format() {
        let uuid = c(json!({ "type": "string", "format": "uuid", "minLength": 36, "maxLength": 40 }));
        assert_eq!(
            min_length_value(&uuid),
            Some(json!("123e4567-e89b-12d3-a456-426614174000"))
        );
        assert_eq!(max_length_value(&uuid), None);
        assert_eq!(too_long(&uuid), None);

        let email = c(json!({ "type": "string", "format": "email", "maxLength": 20 }));
        assert_eq!(max_length_value(&email), Some(json!("aaaaaaaa@example.com")));
    }

    #[test]
    fn test_unique_items_are_distinct() {
        let schema = json!({
            "type": "array",
            "items": { "type": "string" },
            "uniqueItems": true,
            "minItems": 2,
            "maxItems": 3
        });
        let constraints = c(schema.clone());
        assert_eq!(minimal_value(&schema, &constraints), json!(["a", "b"]));
        assert_eq!(max_items_value(&schema, &constraints), Some(json!(["a", "b", "c"])));
        assert_eq!(too_many_items(&schema, &constraints), Some(json!(["a", "b", "c", "d"])));

        let numbers = json!({ "type": "array", "items": { "type": "integer", "minimum": 10 }, "uniqueItems": true, "maxItems": 3 });
        assert_eq!(max_items_value(&numbers, &c(numbers.clone())), Some(json!([10, 11, 12])));

        let flags = json!({ "type": "array", "items": { "type": "boolean" }, "uniqueItems": true, "maxItems": 3 });
        assert_eq!(max_items_value(&flags, &c(flags.clone())), None);
    }

    #[test]
    fn test_huge_limits_are_not_materialized() {
        for max in [json!(2147483647u64), json!(18446744073709551615u64)] {
            let constraints = c(json!({ "type": "string", "maxLength": max }));
            assert_eq!(too_long(&constraints), None);
            assert_eq!(max_length_value(&constraints), None);
            let schema = json!({ "type": "string", "maxLength": max });
            assert_eq!(representative_value(&schema, &constraints), json!("example"));

            let array = json!({ "type": "array", "items": { "type": "integer" }, "maxItems": max });
            let constraints = c(array.clone());
            assert_eq!(too_many_items(&array, &constraints), None);
            assert_eq!(max_items_value(&array, &constraints), None);
        }
    }
}
