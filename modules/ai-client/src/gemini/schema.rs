use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keywords of a JSON schema object that Gemini's OpenAPI subset accepts.
const SUPPORTED_KEYWORDS: &[&str] = &[
    "type",
    "format",
    "description",
    "nullable",
    "enum",
    "properties",
    "required",
    "items",
    "minItems",
    "maxItems",
    "minimum",
    "maximum",
];

const SUPPORTED_FORMATS: &[&str] = &["float", "double", "int32", "int64", "enum", "date-time"];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible `responseSchema` for this type.
    ///
    /// Gemini requires:
    /// 1. Fully inlined schemas (no `$ref` references)
    /// 2. A single `type` per schema; optional values use `nullable: true`
    /// 3. Only the OpenAPI keywords listed in `SUPPORTED_KEYWORDS`
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);
        sanitize(&mut value);

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            if let Some(Value::Array(all_of)) = map.get("allOf").cloned() {
                if let [single] = all_of.as_slice() {
                    *value = single.clone();
                    inline_refs_recursive(value, definitions);
                    return;
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite one schema object in place, then recurse into its sub-schemas.
///
/// Only schema positions are visited, so a property that happens to be named
/// like a keyword (`title`, `format`) survives.
fn sanitize(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };

    collapse_nullable_any_of(map);
    collapse_nullable_type(map);

    map.retain(|key, _| SUPPORTED_KEYWORDS.contains(&key.as_str()));

    if let Some(Value::String(format)) = map.get("format") {
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            map.remove("format");
        }
    }

    if let Some(Value::Object(props)) = map.get_mut("properties") {
        for (_, prop) in props.iter_mut() {
            sanitize(prop);
        }
    }

    if let Some(items) = map.get_mut("items") {
        sanitize(items);
    }
}

/// `"type": ["string", "null"]` becomes `"type": "string", "nullable": true`.
fn collapse_nullable_type(map: &mut Map<String, Value>) {
    let Some(Value::Array(types)) = map.get("type").cloned() else {
        return;
    };

    let non_null: Vec<Value> = types
        .iter()
        .filter(|t| t.as_str() != Some("null"))
        .cloned()
        .collect();

    if let [single] = non_null.as_slice() {
        map.insert("type".to_string(), single.clone());
        if non_null.len() < types.len() {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
    }
}

/// `anyOf: [<schema>, {"type": "null"}]` becomes `<schema>` with `nullable: true`.
fn collapse_nullable_any_of(map: &mut Map<String, Value>) {
    let Some(Value::Array(variants)) = map.get("anyOf").cloned() else {
        return;
    };

    let is_null = |v: &Value| v.get("type").and_then(Value::as_str) == Some("null");
    let non_null: Vec<&Value> = variants.iter().filter(|v| !is_null(v)).collect();

    if let [Value::Object(inner)] = non_null.as_slice() {
        map.remove("anyOf");
        for (k, v) in inner {
            map.entry(k.clone()).or_insert_with(|| v.clone());
        }
        map.insert("nullable".to_string(), Value::Bool(true));
    }
}
