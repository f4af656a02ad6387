//! Debug-string value representation.

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Field names to values, in first-insertion order.
///
/// Inserting a name that is already present replaces the value in place.
pub type Document = IndexMap<String, Value>;

/// A value parsed from a debug string.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// `null`, or the fallback when no value could be read.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// Arbitrary-precision integer.
    Integer(BigInt),
    /// 64-bit floating-point number.
    Float(f64),
    /// Quoted string, escapes decoded.
    String(String),
    /// Unquoted identifier such as an enum constant.
    BareWord(String),
    /// Nested message body.
    Object(Document),
}

impl Value {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns a reference to the integer if this is an `Integer`.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the integer as `i64` when it is an `Integer` that fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(ToPrimitive::to_i64)
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text of a `String` or a `BareWord`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::BareWord(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the mapping if this is an `Object`.
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a field of an `Object`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(field))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{:?}", n)
                }
            }
            Value::String(s) => write!(f, "{:?}", s),
            Value::BareWord(s) => write!(f, "{}", s),
            Value::Object(obj) => f.debug_map().entries(obj).finish(),
        }
    }
}

/// Serializes to the JSON data model: bare words become plain strings and
/// objects keep their field order.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => {
                if let Some(i) = n.to_i64() {
                    serializer.serialize_i64(i)
                } else if let Some(u) = n.to_u64() {
                    serializer.serialize_u64(u)
                } else if let Some(i) = n.to_i128() {
                    serializer.serialize_i128(i)
                } else if let Some(u) = n.to_u128() {
                    serializer.serialize_u128(u)
                } else {
                    // Wider than 128 bits: serde_json writes the digits verbatim.
                    match n.to_string().parse::<serde_json::Number>() {
                        Ok(number) => number.serialize(serializer),
                        Err(e) => {
                            log::warn!("integer {} kept as float: {}", n, e);
                            serializer.serialize_f64(n.to_f64().unwrap_or(f64::NAN))
                        }
                    }
                }
            }
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) | Value::BareWord(s) => serializer.serialize_str(s),
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
