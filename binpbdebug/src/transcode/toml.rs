//! TOML output for parsed debug strings.
//!
//! Mapping to TOML:
//!   - Value::Null      -> error (TOML has no null)
//!   - Value::Bool      -> TOML boolean
//!   - Value::Integer   -> TOML integer (if fits in i64, otherwise error)
//!   - Value::Float     -> TOML float
//!   - Value::String    -> TOML string
//!   - Value::BareWord  -> TOML string
//!   - Value::Object    -> TOML table, in field order
//!
//! Every document is a table, so the top level always fits.

use libpbdebug::{Document, Value};
use num_traits::ToPrimitive;
use toml_edit::{DocumentMut, Formatted, Item, Table};

/// Encode a document as a TOML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    let table = document_to_table(doc, "")?;
    let mut out = DocumentMut::new();
    for (key, item) in table.iter() {
        out[key] = item.clone();
    }
    Ok(out.to_string())
}

fn document_to_table(doc: &Document, path: &str) -> Result<Table, String> {
    let mut table = Table::new();
    for (k, v) in doc {
        let field_path = if path.is_empty() {
            k.clone()
        } else {
            format!("{}.{}", path, k)
        };
        table.insert(k, value_to_toml(v, &field_path)?);
    }
    Ok(table)
}

fn value_to_toml(value: &Value, path: &str) -> Result<Item, String> {
    let v = match value {
        Value::Null => return Err(format!("TOML has no null type (field {})", path)),
        Value::Bool(b) => toml_edit::Value::Boolean(Formatted::new(*b)),
        Value::Integer(n) => {
            let i = n.to_i64().ok_or_else(|| {
                format!("Integer {} too large for TOML (i64) (field {})", n, path)
            })?;
            toml_edit::Value::Integer(Formatted::new(i))
        }
        Value::Float(f) => toml_edit::Value::Float(Formatted::new(*f)),
        Value::String(s) | Value::BareWord(s) => toml_edit::Value::String(Formatted::new(s.clone())),
        Value::Object(obj) => return Ok(Item::Table(document_to_table(obj, path)?)),
    };
    Ok(Item::Value(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalars_and_tables() {
        let doc = libpbdebug::parse_to_tree("name: \"x\" mode: FAST server { port: 80 }").unwrap();
        let text = encode(&doc).unwrap();
        assert!(text.starts_with("name = \"x\"\nmode = \"FAST\"\n"));
        let parsed: DocumentMut = text.parse().unwrap();
        assert_eq!(parsed["server"]["port"].as_integer(), Some(80));
    }

    #[test]
    fn test_encode_rejects_null() {
        let doc = libpbdebug::parse_to_tree("a { b: null }").unwrap();
        let err = encode(&doc).unwrap_err();
        assert_eq!(err, "TOML has no null type (field a.b)");
    }

    #[test]
    fn test_encode_rejects_big_integer() {
        let doc = libpbdebug::parse_to_tree("n: 99999999999999999999").unwrap();
        assert!(encode(&doc).unwrap_err().contains("too large for TOML"));
    }
}
