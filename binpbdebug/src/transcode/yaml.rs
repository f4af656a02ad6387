//! YAML output for parsed debug strings.
//!
//! Mapping to YAML:
//!   - Value::Null      -> YAML null
//!   - Value::Bool      -> YAML bool
//!   - Value::Integer   -> YAML integer (as a string if beyond i64/u64)
//!   - Value::Float     -> YAML float (including .nan, .inf, -.inf)
//!   - Value::String    -> YAML string
//!   - Value::BareWord  -> YAML string
//!   - Value::Object    -> YAML mapping, in field order

use libpbdebug::{Document, Value};
use num_traits::ToPrimitive;

/// Encode a document as a YAML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    let yaml_value = document_to_yaml(doc);
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn document_to_yaml(doc: &Document) -> serde_yaml::Value {
    let mut map = serde_yaml::Mapping::new();
    for (k, v) in doc {
        map.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v));
    }
    serde_yaml::Value::Mapping(map)
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(n) => {
            if let Some(i) = n.to_i64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(i))
            } else if let Some(u) = n.to_u64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(u))
            } else {
                // YAML has no arbitrary-precision integers.
                serde_yaml::Value::String(n.to_string())
            }
        }
        Value::Float(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::String(s) | Value::BareWord(s) => serde_yaml::Value::String(s.clone()),
        Value::Object(obj) => document_to_yaml(obj),
    }
}
