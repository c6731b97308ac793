//! Exact-match token.

use serde::Serialize;

/// A single allowed token.
///
/// A query string matches when it has the same byte length as the token and
/// the bytes are equal ignoring ASCII case. There is no prefix, substring or
/// pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rule {
    token: Box<str>,
}

impl Rule {
    pub fn new(token: impl Into<Box<str>>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns true if `query` is this token, ignoring ASCII case.
    pub fn matches(&self, query: &str) -> bool {
        self.token.len() == query.len()
            && self.token.as_bytes().eq_ignore_ascii_case(query.as_bytes())
    }
}
