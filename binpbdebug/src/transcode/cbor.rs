//! CBOR output for parsed debug strings, plus diagnostic notation.
//!
//! Mapping to CBOR:
//!   - Value::Null      -> CBOR null (simple value 22)
//!   - Value::Bool      -> CBOR bool (simple values 20/21)
//!   - Value::Integer   -> CBOR integer (smallest encoding that fits)
//!   - Value::Float     -> CBOR float64 (always 9 bytes, never downgraded)
//!   - Value::String    -> CBOR text string (determinate length)
//!   - Value::BareWord  -> CBOR text string (determinate length)
//!   - Value::Object    -> CBOR map (determinate length, text keys in field order)
//!
//! Integers that exceed CBOR's native integer range (-2^64 to 2^64-1)
//! produce an error rather than using bignum tags.

use ciborium::value::Value as CborValue;
use libpbdebug::{Document, Value};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use std::fmt::Write as FmtWrite;

// ---------------------------------------------------------------------------
// Encode
//
// Written by hand: ciborium's serializer shrinks float64 to float16/float32
// whenever the value fits, and floats here stay 8 bytes wide.
// ---------------------------------------------------------------------------

/// Encode a document as CBOR bytes.
pub fn encode(doc: &Document) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    write_map(&mut buf, doc)?;
    Ok(buf)
}

fn write_map(buf: &mut Vec<u8>, doc: &Document) -> Result<(), String> {
    write_type_and_length(buf, 5, doc.len() as u64); // major 5 = map
    for (k, v) in doc {
        write_text(buf, k);
        write_value(buf, v)?;
    }
    Ok(())
}

fn write_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), String> {
    match value {
        Value::Null => buf.push(0xf6),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Integer(n) => write_integer(buf, n)?,
        Value::Float(f) => {
            buf.push(0xfb);
            buf.extend_from_slice(&f.to_be_bytes());
        }
        Value::String(s) | Value::BareWord(s) => write_text(buf, s),
        Value::Object(obj) => write_map(buf, obj)?,
    }
    Ok(())
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_type_and_length(buf, 3, s.len() as u64); // major 3 = text string
    buf.extend_from_slice(s.as_bytes());
}

/// Write a CBOR major type and its argument in the fewest bytes.
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, val: u64) {
    let high = major << 5;
    match val {
        0..=23 => buf.push(high | val as u8),
        24..=0xff => {
            buf.push(high | 24);
            buf.push(val as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(val as u16).to_be_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&val.to_be_bytes());
        }
    }
}

/// Major 0 holds n, major 1 holds -1 - n.
fn write_integer(buf: &mut Vec<u8>, n: &BigInt) -> Result<(), String> {
    let (major, magnitude) = if n.sign() == Sign::Minus {
        (1, -n - 1)
    } else {
        (0, n.clone())
    };
    let val = magnitude.to_u64().ok_or_else(|| {
        format!(
            "integer {} exceeds CBOR's native integer range (-2^64 to 2^64-1)",
            n
        )
    })?;
    write_type_and_length(buf, major, val);
    Ok(())
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes as diagnostic notation.
///
/// Works from the encoded bytes rather than the document, so it shows what
/// actually went over the wire.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0);
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) {
    match val {
        CborValue::Null => out.push_str("null"),
        CborValue::Bool(true) => out.push_str("true"),
        CborValue::Bool(false) => out.push_str("false"),
        CborValue::Integer(i) => {
            let n: i128 = (*i).into();
            let _ = write!(out, "{}", n);
        }
        CborValue::Float(f) => diag_float(out, *f),
        CborValue::Text(s) => diag_text(out, s),
        CborValue::Map(pairs) => diag_map(out, pairs, indent),
        other => {
            let _ = write!(out, "<?unknown {:?}>", other);
        }
    }
}

fn diag_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        // Debug formatting always keeps a `.` or exponent.
        let _ = write!(out, "{:?}", f);
    }
}

fn diag_text(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn diag_map(out: &mut String, pairs: &[(CborValue, CborValue)], indent: usize) {
    if pairs.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    let child_pad = " ".repeat(indent + 2);
    for (i, (k, v)) in pairs.iter().enumerate() {
        out.push_str(&child_pad);
        diag_value(out, k, indent + 2);
        out.push_str(": ");
        diag_value(out, v, indent + 2);
        if i + 1 < pairs.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
}
