//! Route pattern compiler.
//!
//! A pattern is a regular expression with three recognised placeholder
//! tokens. Tokens are substituted textually before compilation, so they may
//! appear anywhere in the pattern; any other syntax reaches the regex engine
//! untouched.
//!
//! | Token | Sub-pattern |
//! |-------|-------------|
//! | `:string` | `([a-zA-Z]+)` |
//! | `:number` | `([0-9]+)` |
//! | `:alpha` | `([a-zA-Z0-9_-]+)` |
//!
//! The compiled expression is anchored at both ends and tolerates one
//! optional leading and one optional trailing slash: `^/?<pattern>/?$`.

use crate::error::RouteError;
use regex::Regex;
use std::fmt;

/// A placeholder token recognised inside route patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `:string`, one or more ASCII letters.
    String,
    /// `:number`, one or more ASCII digits.
    Number,
    /// `:alpha`, one or more ASCII letters, digits, `-` or `_`.
    Alpha,
}

impl Token {
    /// All tokens, in substitution order.
    pub const ALL: [Token; 3] = [Token::String, Token::Number, Token::Alpha];

    /// The token as written in a pattern.
    pub const fn spelling(self) -> &'static str {
        match self {
            Token::String => ":string",
            Token::Number => ":number",
            Token::Alpha => ":alpha",
        }
    }

    /// The capturing sub-pattern the token expands to.
    pub const fn expansion(self) -> &'static str {
        match self {
            Token::String => "([a-zA-Z]+)",
            Token::Number => "([0-9]+)",
            Token::Alpha => "([a-zA-Z0-9_-]+)",
        }
    }
}

/// A compiled route pattern.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Substitute tokens and compile `source`.
    pub fn compile(source: &str) -> Result<Self, RouteError> {
        let anchored = format!("^/?{}/?$", Self::expand(source));
        let regex = Regex::new(&anchored).map_err(|e| RouteError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Replace every token spelling in `source` with its sub-pattern.
    pub fn expand(source: &str) -> String {
        Token::ALL
            .iter()
            .fold(source.to_string(), |acc, token| {
                acc.replace(token.spelling(), token.expansion())
            })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole of `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and return the capture groups, left to right.
    ///
    /// The whole-match group is not included. A group that did not take part
    /// in the match yields an empty string.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Number of capture groups, not counting the whole match.
    pub fn capture_count(&self) -> usize {
        self.regex.captures_len() - 1
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(pattern: &str, path: &str) -> Option<Vec<String>> {
        Pattern::compile(pattern).unwrap().captures(path)
    }

    #[test]
    fn test_token_expansion() {
        assert_eq!(
            Pattern::expand("/:string/:number/:alpha"),
            "/([a-zA-Z]+)/([0-9]+)/([a-zA-Z0-9_-]+)"
        );
        // Not a token spelling: passed through
        assert_eq!(Pattern::expand("/:id"), "/:id");
    }

    #[test]
    fn test_captures_in_order() {
        assert_eq!(
            caps("/:string/:number", "/foo/42"),
            Some(vec!["foo".to_string(), "42".to_string()])
        );
    }

    #[test]
    fn test_string_rejects_digits() {
        assert_eq!(caps("/:string", "/abc1"), None);
        assert_eq!(caps("/:string", "/a-b"), None);
    }

    #[test]
    fn test_number_rejects_letters() {
        assert_eq!(caps("/item/:number", "/item/4a"), None);
        assert_eq!(caps("/item/:number", "/item/007"), Some(vec!["007".to_string()]));
    }

    #[test]
    fn test_alpha_accepts_dash_and_underscore() {
        assert_eq!(
            caps("/post/:alpha", "/post/hello-world_2"),
            Some(vec!["hello-world_2".to_string()])
        );
        assert_eq!(caps("/post/:alpha", "/post/hello.world"), None);
    }

    #[test]
    fn test_slashes_tolerated() {
        assert!(caps("/about", "/about/").is_some());
        assert!(caps("about", "/about").is_some());
        assert!(caps("about", "about/").is_some());
        assert!(caps("/about", "//about").is_some());
        assert!(caps("/about", "/about//").is_none());
    }

    #[test]
    fn test_anchored() {
        assert!(caps("/about", "/about/team").is_none());
        assert!(caps("/about", "/x/about").is_none());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(caps("/About", "/about").is_none());
        assert_eq!(caps("/:string", "/ABC"), Some(vec!["ABC".to_string()]));
    }

    #[test]
    fn test_raw_syntax_passthrough() {
        let pattern = Pattern::compile(r"/year/(\d{4})/:number").unwrap();
        assert_eq!(pattern.capture_count(), 2);
        assert_eq!(
            pattern.captures("/year/2024/7"),
            Some(vec!["2024".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn test_unparticipating_group_is_empty() {
        assert_eq!(
            caps("/a(/:number)?", "/a"),
            Some(vec![String::new(), String::new()])
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::compile("/broken(").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { ref pattern, .. } if pattern == "/broken("));
    }
}
