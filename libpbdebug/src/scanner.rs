//! Scanner primitives.
//!
//! The cursor is the parser's only mutable state: a byte offset into the
//! borrowed input. It moves forward one character at a time, except for the
//! single rewind the top-level driver performs through [`Cursor::restore`].

/// Saved cursor position, produced by [`Cursor::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// A position within the input text.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The character at the cursor, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Consume and return the character at the cursor.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume the character at the cursor if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Advance past spaces, tabs, newlines and carriage returns.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            self.pos += 1;
        }
    }

    pub fn snapshot(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Input consumed between `mark` and the cursor.
    pub fn slice_from(&self, mark: Mark) -> &'a str {
        &self.input[mark.0..self.pos]
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for (i, c) in self.input.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Identifier-initial: a letter or underscore.
pub fn is_alpha(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Identifier-continuing: identifier-initial or a digit.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
