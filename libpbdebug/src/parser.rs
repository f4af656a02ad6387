//! Recursive-descent parser over the scanner's cursor.
//!
//! The parser never fails on malformed structure. An unclosed brace, an
//! unterminated string or a stray character ends the construct being read,
//! keeps everything accumulated so far, and leaves a [`Recovery`] record
//! behind. Only malformed numbers (under [`NumberPolicy::Reject`]) and
//! excessive nesting abort the parse.

use crate::error::{ParseContext, ParseError, Result};
use crate::lexer::{read_identifier, read_number, read_quoted_string};
use crate::options::{NumberPolicy, ParseOptions};
use crate::scanner::{is_alpha, Cursor};
use crate::value::{Document, Value};
use log::{debug, trace};
use std::fmt;

/// A place where the parser tolerated malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub kind: RecoveryKind,
    /// Byte offset into the input.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryKind {
    /// Input ended inside a quoted string.
    UnterminatedString,
    /// No `}` matched the `{` at the recorded offset.
    UnclosedObject,
    /// A `:` was followed by nothing that starts a value; `null` was stored.
    MissingValue,
    /// A field name followed by neither `:` nor `{`.
    DanglingField(String),
    /// A character that cannot start a field ended an object body.
    UnexpectedChar(char),
    /// The top level stopped before the end of input; the rest was ignored.
    TrailingInput,
    /// A malformed numeric literal replaced by `null`.
    MalformedNumber(String),
}

impl fmt::Display for RecoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryKind::UnterminatedString => write!(f, "unterminated string"),
            RecoveryKind::UnclosedObject => write!(f, "unclosed brace"),
            RecoveryKind::MissingValue => write!(f, "missing value"),
            RecoveryKind::DanglingField(name) => {
                write!(f, "field \"{}\" has neither ':' nor '{{'", name)
            }
            RecoveryKind::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            RecoveryKind::TrailingInput => write!(f, "unparsed trailing input"),
            RecoveryKind::MalformedNumber(text) => {
                write!(f, "malformed number \"{}\" read as null", text)
            }
        }
    }
}

/// The outcome of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub document: Document,
    /// Empty when the input was read cleanly.
    pub recoveries: Vec<Recovery>,
}

impl Parsed {
    /// True when no malformed input had to be tolerated.
    pub fn is_complete(&self) -> bool {
        self.recoveries.is_empty()
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Parse a debug string into a document.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Parsed> {
    let mut parser = Parser::new(input, options);
    let document = parser.parse_root()?;
    Ok(Parsed {
        document,
        recoveries: parser.recoveries,
    })
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    ctx: ParseContext,
    number_policy: NumberPolicy,
    max_depth: usize,
    depth: usize,
    recoveries: Vec<Recovery>,
    /// Offset of the last stray character reported.
    stray: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            ctx: ParseContext::new(options.filename.as_deref()),
            number_policy: options.number_policy,
            max_depth: options.max_depth,
            depth: 0,
            recoveries: Vec::new(),
            stray: None,
        }
    }

    fn recover(&mut self, kind: RecoveryKind, offset: usize) {
        if let RecoveryKind::UnexpectedChar(_) = kind {
            // Every enclosing object stops on the same stray character.
            if self.stray == Some(offset) {
                return;
            }
            self.stray = Some(offset);
        }
        debug!("recovered from {} at byte {}", kind, offset);
        self.recoveries.push(Recovery { kind, offset });
    }

    fn error_at(&self, err: ParseError, offset: usize) -> ParseError {
        let (line, col) = self.cursor.line_col(offset);
        err.with_location(&self.ctx, line, col)
    }

    // ========================================================================
    // Top Level
    // ========================================================================

    /// Parse top-level entries until input runs out or an entry is neither
    /// `Name { ... }` nor `name: value`.
    fn parse_root(&mut self) -> Result<Document> {
        let mut result = Document::new();

        loop {
            self.cursor.skip_whitespace();
            let Some(c) = self.cursor.peek() else {
                break;
            };
            let start = self.cursor.snapshot();
            let start_offset = self.cursor.offset();
            if !is_alpha(c) {
                self.recover(RecoveryKind::TrailingInput, start_offset);
                break;
            }

            let name = read_identifier(&mut self.cursor);
            self.cursor.skip_whitespace();

            match self.cursor.peek() {
                Some('{') => {
                    let open = self.cursor.offset();
                    self.cursor.bump();
                    let nested = self.parse_nested(open)?;
                    result.insert(name, Value::Object(nested));
                }
                Some(':') => {
                    trace!("`{}` is a field, rewinding to byte {}", name, start_offset);
                    self.cursor.restore(start);
                    let (name, value) = self.parse_scalar_field()?;
                    result.insert(name, value);
                }
                _ => {
                    self.recover(RecoveryKind::TrailingInput, start_offset);
                    break;
                }
            }
        }

        Ok(result)
    }

    /// Read `name: value` with the cursor at the name.
    fn parse_scalar_field(&mut self) -> Result<(String, Value)> {
        let name = read_identifier(&mut self.cursor);
        self.cursor.skip_whitespace();
        self.cursor.eat(':');
        self.cursor.skip_whitespace();
        let value = self.read_value()?;
        Ok((name, value))
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Parse an object body whose `{` at `open` was just consumed, then
    /// consume the closing `}` if there is one.
    fn parse_nested(&mut self, open: usize) -> Result<Document> {
        if self.depth >= self.max_depth {
            return Err(self.error_at(ParseError::NestingTooDeep(self.max_depth, String::new()), open));
        }

        self.depth += 1;
        let mut obj = Document::new();
        let fields = self.parse_fields(&mut obj);
        self.depth -= 1;
        fields?;

        self.cursor.skip_whitespace();
        if !self.cursor.eat('}') {
            self.recover(RecoveryKind::UnclosedObject, open);
        }
        Ok(obj)
    }

    /// Read fields into `result` until `}` or end of input.
    ///
    /// A position where no field name can be read ends the body without
    /// consuming anything.
    fn parse_fields(&mut self, result: &mut Document) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            let at = self.cursor.offset();
            match self.cursor.peek() {
                None | Some('}') => return Ok(()),
                Some(c) if !is_alpha(c) => {
                    self.recover(RecoveryKind::UnexpectedChar(c), at);
                    return Ok(());
                }
                Some(_) => {}
            }

            let name = read_identifier(&mut self.cursor);
            self.cursor.skip_whitespace();

            match self.cursor.peek() {
                Some(':') => {
                    self.cursor.bump();
                    self.cursor.skip_whitespace();
                    let value = self.read_value()?;
                    result.insert(name, value);
                }
                Some('{') => {
                    let open = self.cursor.offset();
                    self.cursor.bump();
                    let nested = self.parse_nested(open)?;
                    result.insert(name, Value::Object(nested));
                }
                _ => self.recover(RecoveryKind::DanglingField(name), at),
            }
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Read the value after a `:`, choosing the reader from the next character.
    fn read_value(&mut self) -> Result<Value> {
        self.cursor.skip_whitespace();
        let at = self.cursor.offset();

        match self.cursor.peek() {
            Some('"') => {
                let s = read_quoted_string(&mut self.cursor);
                if !s.terminated {
                    self.recover(RecoveryKind::UnterminatedString, at);
                }
                Ok(Value::String(s.text))
            }
            Some('{') => {
                self.cursor.bump();
                Ok(Value::Object(self.parse_nested(at)?))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.read_number(at),
            Some(c) if is_alpha(c) => {
                let word = read_identifier(&mut self.cursor);
                Ok(match word.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" => Value::Null,
                    _ => Value::BareWord(word),
                })
            }
            _ => {
                self.recover(RecoveryKind::MissingValue, at);
                Ok(Value::Null)
            }
        }
    }

    fn read_number(&mut self, at: usize) -> Result<Value> {
        match read_number(&mut self.cursor) {
            Ok(value) => Ok(value),
            Err(text) => match self.number_policy {
                NumberPolicy::Reject => {
                    Err(self.error_at(ParseError::MalformedNumber(text.to_string(), String::new()), at))
                }
                NumberPolicy::Null => {
                    self.recover(RecoveryKind::MalformedNumber(text.to_string()), at);
                    Ok(Value::Null)
                }
            },
        }
    }
}
