//! Path matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes are compared on raw bytes, no normalization

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/v1"));
        assert!(matcher.matches("/apiary"));
        assert!(!matcher.matches("/images"));
        assert!(!matcher.matches("/API")); // Case sensitive
    }
}
