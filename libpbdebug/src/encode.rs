//! Encode documents to JSON and back to debug-string text.

use crate::value::{Document, Value};

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON indented by two spaces
    Json,
    /// JSON on a single line
    JsonCompact,
    /// Multi-line debug string, one field per line
    Text,
    /// Single-line debug string
    ShortText,
}

/// Encode a document in the specified format.
///
/// Text output re-parses to the same document as long as every float is
/// finite; `inf`, `-inf` and `nan` are written the way protobuf writes them
/// but read back as bare words or malformed numbers.
pub fn encode(doc: &Document, format: Format) -> String {
    match format {
        Format::Json => encode_json(doc, true),
        Format::JsonCompact => encode_json(doc, false),
        Format::Text => {
            let mut out = String::new();
            encode_text(&mut out, doc, 0);
            out
        }
        Format::ShortText => {
            let mut out = String::new();
            encode_short_text(&mut out, doc);
            out
        }
    }
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(doc: &Document, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    // Maps keyed by String with serializable values cannot fail.
    encoded.unwrap_or_else(|e| unreachable!("JSON serialization failed: {}", e))
}

// =============================================================================
// Debug-String Encoders
// =============================================================================

fn encode_text(out: &mut String, doc: &Document, indent: usize) {
    let pad = "  ".repeat(indent);

    for (name, value) in doc {
        out.push_str(&pad);
        out.push_str(name);
        match value {
            Value::Object(obj) if obj.is_empty() => out.push_str(" {}\n"),
            Value::Object(obj) => {
                out.push_str(" {\n");
                encode_text(out, obj, indent + 1);
                out.push_str(&pad);
                out.push_str("}\n");
            }
            scalar => {
                out.push_str(": ");
                encode_scalar(out, scalar);
                out.push('\n');
            }
        }
    }
}

fn encode_short_text(out: &mut String, doc: &Document) {
    for (i, (name, value)) in doc.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(name);
        match value {
            Value::Object(obj) => {
                out.push_str(" { ");
                encode_short_text(out, obj);
                if !obj.is_empty() {
                    out.push(' ');
                }
                out.push('}');
            }
            scalar => {
                out.push_str(": ");
                encode_scalar(out, scalar);
            }
        }
    }
}

fn encode_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&encode_float(*f)),
        Value::String(s) => encode_text_string(out, s),
        Value::BareWord(w) => out.push_str(w),
        Value::Object(_) => unreachable!("objects are written as blocks"),
    }
}

/// Floats always carry a `.` or an exponent so they read back as floats.
fn encode_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else {
        format!("{:?}", f)
    }
}

fn encode_text_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
