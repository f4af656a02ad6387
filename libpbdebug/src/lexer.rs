//! Lexical readers: identifiers, quoted strings and numeric literals.
//!
//! Each reader starts at the cursor and consumes exactly the characters that
//! make up its token. None of them report structural problems; the caller
//! decides what an empty identifier or an unterminated string means.

use crate::scanner::{is_alpha, is_ident_char, Cursor};
use crate::value::Value;
use num_bigint::BigInt;

/// A decoded quoted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString {
    pub text: String,
    /// Whether a closing quote was found before end of input.
    pub terminated: bool,
}

/// Read an identifier, or return an empty string if the cursor is not at an
/// identifier-initial character.
pub fn read_identifier(cursor: &mut Cursor<'_>) -> String {
    let mut result = String::new();
    if !cursor.peek().is_some_and(is_alpha) {
        return result;
    }
    while let Some(c) = cursor.peek() {
        if !is_ident_char(c) {
            break;
        }
        result.push(c);
        cursor.bump();
    }
    result
}

/// Read a double-quoted string, decoding escapes.
///
/// The cursor must be at the opening quote.
pub fn read_quoted_string(cursor: &mut Cursor<'_>) -> QuotedString {
    let mut text = String::new();
    cursor.bump();

    loop {
        match cursor.bump() {
            None => {
                return QuotedString {
                    text,
                    terminated: false,
                }
            }
            Some('"') => {
                return QuotedString {
                    text,
                    terminated: true,
                }
            }
            Some('\\') => match cursor.bump() {
                // A trailing backslash is kept as written.
                None => text.push('\\'),
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('r') => text.push('\r'),
                Some(c) => text.push(c),
            },
            Some(c) => text.push(c),
        }
    }
}

/// Whether `c` can appear in a numeric literal run.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

/// Read a numeric literal.
///
/// Consumes the longest run of digits, `.`, `+`, `-`, `e` and `E`. A run
/// containing `.`, `e` or `E` is a float, anything else an integer. On
/// failure the consumed run is returned as the error.
pub fn read_number<'a>(cursor: &mut Cursor<'a>) -> Result<Value, &'a str> {
    let start = cursor.snapshot();
    while cursor.peek().is_some_and(is_number_char) {
        cursor.bump();
    }
    let run = cursor.slice_from(start);

    if run.contains(['.', 'e', 'E']) {
        run.parse::<f64>().map(Value::Float).map_err(|_| run)
    } else {
        run.parse::<BigInt>().map(Value::Integer).map_err(|_| run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(input: &str) -> Result<Value, &str> {
        read_number(&mut Cursor::new(input))
    }

    #[test]
    fn test_read_identifier() {
        let mut cursor = Cursor::new("user_name2: x");
        assert_eq!(read_identifier(&mut cursor), "user_name2");
        assert_eq!(cursor.peek(), Some(':'));
    }

    #[test]
    fn test_read_identifier_not_at_identifier() {
        let mut cursor = Cursor::new("9lives");
        assert_eq!(read_identifier(&mut cursor), "");
        assert_eq!(cursor.offset(), 0);

        let mut cursor = Cursor::new("");
        assert_eq!(read_identifier(&mut cursor), "");
    }

    #[test]
    fn test_read_identifier_unicode() {
        let mut cursor = Cursor::new("prénom: 1");
        assert_eq!(read_identifier(&mut cursor), "prénom");
    }

    #[test]
    fn test_read_quoted_string_escapes() {
        let mut cursor = Cursor::new(r#""a\nb\t\"c\"\r\\" rest"#);
        let s = read_quoted_string(&mut cursor);
        assert_eq!(s.text, "a\nb\t\"c\"\r\\");
        assert!(s.terminated);
        assert_eq!(cursor.peek(), Some(' '));
    }

    #[test]
    fn test_read_quoted_string_unknown_escape() {
        let mut cursor = Cursor::new(r#""\x\'""#);
        assert_eq!(read_quoted_string(&mut cursor).text, "x'");
    }

    #[test]
    fn test_read_quoted_string_unterminated() {
        let mut cursor = Cursor::new("\"partial");
        let s = read_quoted_string(&mut cursor);
        assert_eq!(s.text, "partial");
        assert!(!s.terminated);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_read_quoted_string_trailing_backslash() {
        let mut cursor = Cursor::new("\"ab\\");
        let s = read_quoted_string(&mut cursor);
        assert_eq!(s.text, "ab\\");
        assert!(!s.terminated);
    }

    #[test]
    fn test_read_number_integer() {
        assert_eq!(number("5"), Ok(Value::from(5i64)));
        assert_eq!(number("-7"), Ok(Value::from(-7i64)));
        assert_eq!(
            number("123456789012345678901234567890"),
            Ok(Value::Integer("123456789012345678901234567890".parse().unwrap()))
        );
    }

    #[test]
    fn test_read_number_float() {
        assert_eq!(number("5.0"), Ok(Value::Float(5.0)));
        assert_eq!(number("1.5e-3"), Ok(Value::Float(0.0015)));
        assert_eq!(number("1E5"), Ok(Value::Float(100000.0)));
        assert_eq!(number(".5"), Ok(Value::Float(0.5)));
        assert_eq!(number("-15.5"), Ok(Value::Float(-15.5)));
    }

    #[test]
    fn test_read_number_stops_at_delimiter() {
        let mut cursor = Cursor::new("42}");
        assert_eq!(read_number(&mut cursor), Ok(Value::from(42i64)));
        assert_eq!(cursor.peek(), Some('}'));
    }

    #[test]
    fn test_read_number_malformed() {
        assert_eq!(number("-"), Err("-"));
        assert_eq!(number("--5"), Err("--5"));
        assert_eq!(number("1-2e+e"), Err("1-2e+e"));
        assert_eq!(number("."), Err("."));
    }
}
