//! Parser configuration.

/// Default limit on brace nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do when a numeric literal run is not a valid number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPolicy {
    /// Abort the parse with [`ParseError::MalformedNumber`](crate::ParseError).
    #[default]
    Reject,
    /// Store `null` in place of the value and record a recovery.
    Null,
}

/// Options controlling a parse.
///
/// ```
/// use libpbdebug::{NumberPolicy, ParseOptions};
///
/// let options = ParseOptions::new()
///     .filename("user.txtpb")
///     .number_policy(NumberPolicy::Null)
///     .max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name used in error locations.
    pub filename: Option<String>,
    pub number_policy: NumberPolicy,
    /// Maximum brace nesting. The root mapping is depth 0.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filename: None,
            number_policy: NumberPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }

    pub fn number_policy(mut self, policy: NumberPolicy) -> Self {
        self.number_policy = policy;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.filename, None);
        assert_eq!(options.number_policy, NumberPolicy::Reject);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }
}
