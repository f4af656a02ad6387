//! Error types for debug-string parsing.
//!
//! Structural problems (unclosed braces, unterminated strings, stray
//! characters) never produce an error; they are reported as
//! [`Recovery`](crate::Recovery) records instead. Only the conditions below
//! abort a parse.

use thiserror::Error;

/// Result type for debug-string parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying the optional filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    ///
    /// `line` and `col` are 1-based.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line, col, name),
            None => format!(" at {}:{}", line, col),
        }
    }
}

/// Error type for debug-string parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A numeric literal run that is not a valid integer or float.
    #[error("Malformed number \"{0}\"{1}")]
    MalformedNumber(String, String),

    /// Brace nesting deeper than the configured limit.
    #[error("Nesting deeper than {0} levels{1}")]
    NestingTooDeep(usize, String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::MalformedNumber(text, _) => ParseError::MalformedNumber(text, suffix),
            ParseError::NestingTooDeep(limit, _) => ParseError::NestingTooDeep(limit, suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_suffix_without_filename() {
        let ctx = ParseContext::new(None);
        assert_eq!(ctx.loc_suffix(3, 7), " at 3:7");
    }

    #[test]
    fn test_loc_suffix_with_filename() {
        let ctx = ParseContext::new(Some("user.txtpb"));
        assert_eq!(ctx.loc_suffix(1, 4), " at 1:4 of <user.txtpb>");
    }

    #[test]
    fn test_error_message() {
        let ctx = ParseContext::new(None);
        let err = ParseError::MalformedNumber("--5".into(), String::new()).with_location(&ctx, 2, 5);
        assert_eq!(err.to_string(), "Malformed number \"--5\" at 2:5");

        let err = ParseError::NestingTooDeep(4, String::new()).with_location(&ctx, 1, 9);
        assert_eq!(err.to_string(), "Nesting deeper than 4 levels at 1:9");
    }
}
