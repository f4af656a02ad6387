//! Schema-less parser for protobuf debug strings.
//!
//! A debug string is the human-readable text a protobuf message prints:
//! `name: value` fields and `name { ... }` nested messages, with an optional
//! `TypeName { ... }` wrapper at the top. This crate reads that text without
//! a schema into a [`Document`] of typed [`Value`]s and renders it as JSON.
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: a cursor over the input with one-character lookahead and
//!    a snapshot/restore used for the top-level block-vs-field decision.
//!
//! 2. **Lexical readers**: identifiers, quoted strings with escape decoding,
//!    and numeric literals classified as integer or float.
//!
//! 3. **Parser**: a recursive descent over fields and nested objects that
//!    keeps whatever it could read when the input is malformed.
//!
//! Repeated fields are not collected into arrays: a field name that occurs
//! twice keeps the last value.

mod encode;
mod error;
mod lexer;
mod options;
mod parser;
mod scanner;
mod value;

pub use encode::{encode, Format};
pub use error::{ParseError, Result};
pub use options::{NumberPolicy, ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{Parsed, Recovery, RecoveryKind};
pub use value::{Document, Value};

/// Parse a debug string, reporting every place malformed input was tolerated.
///
/// # Example
///
/// ```
/// use libpbdebug::parse;
///
/// let parsed = parse("User { id: 1 }").unwrap();
/// assert!(parsed.is_complete());
/// assert_eq!(parsed.document["User"].get("id").and_then(|v| v.as_i64()), Some(1));
/// ```
pub fn parse(input: &str) -> Result<Parsed> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a debug string with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Parsed> {
    parser::parse_document(input, options)
}

/// Parse a debug string into its document tree.
pub fn parse_to_tree(input: &str) -> Result<Document> {
    parse(input).map(Parsed::into_document)
}

/// Parse a debug string and render it as JSON indented by two spaces.
///
/// ```
/// let json = libpbdebug::parse_to_json("name: \"Ada\" age: 36").unwrap();
/// assert_eq!(json, "{\n  \"name\": \"Ada\",\n  \"age\": 36\n}");
/// ```
pub fn parse_to_json(input: &str) -> Result<String> {
    parse_to_tree(input).map(|doc| encode(&doc, Format::Json))
}

/// Parse a debug string and render it as single-line JSON.
pub fn parse_to_json_compact(input: &str) -> Result<String> {
    parse_to_tree(input).map(|doc| encode(&doc, Format::JsonCompact))
}

/// 1-based line and column of a byte offset such as [`Recovery::offset`].
pub fn line_col(input: &str, offset: usize) -> (usize, usize) {
    scanner::Cursor::new(input).line_col(offset)
}
