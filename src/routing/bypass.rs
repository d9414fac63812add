//! Bypass path matching.
//!
//! # Responsibilities
//! - Recognize infrastructure paths that must never be tenant-scoped
//! - Short-circuit before any host resolution
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Plain `starts_with`, so `/api` also covers `/apis` (same as the
//!   prefix list it replaces)
//! - No regex to guarantee O(n) matching

/// Prefixes excluded from tenant rewriting unless configured otherwise.
pub const DEFAULT_BYPASS_PREFIXES: &[&str] = &["/_next", "/api", "/favicon.ico", "/static"];

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
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

/// The set of bypass prefixes, combined with OR semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassSet {
    matchers: Vec<PathPrefixMatcher>,
}

impl BypassSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matchers: prefixes.into_iter().map(PathPrefixMatcher::new).collect(),
        }
    }

    /// The first matching prefix, if any.
    pub fn matching(&self, path: &str) -> Option<&PathPrefixMatcher> {
        self.matchers.iter().find(|m| m.matches(path))
    }

    pub fn is_bypassed(&self, path: &str) -> bool {
        self.matching(path).is_some()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(PathPrefixMatcher::prefix)
    }
}

impl Default for BypassSet {
    fn default() -> Self {
        Self::new(DEFAULT_BYPASS_PREFIXES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches("/api/v1"));
        assert!(matcher.matches("/api"));
        assert!(!matcher.matches("/images"));
        assert!(!matcher.matches("/API/v1")); // Case sensitive
    }

    #[test]
    fn test_default_set() {
        let set = BypassSet::default();
        for path in ["/_next/static/chunk.js", "/api/health", "/favicon.ico", "/static/logo.png"] {
            assert!(set.is_bypassed(path), "{path}");
        }
        for path in ["/", "/dashboard", "/tenant/john", "/apple/../api"] {
            assert!(!set.is_bypassed(path), "{path}");
        }
    }

    #[test]
    fn test_matching_reports_prefix() {
        let set = BypassSet::new(["/health", "/static"]);
        assert_eq!(set.matching("/static/a.css").map(|m| m.prefix()), Some("/static"));
        assert_eq!(set.matching("/api/x"), None);
        assert_eq!(set.prefixes().collect::<Vec<_>>(), vec!["/health", "/static"]);
    }

    #[test]
    fn test_empty_set_bypasses_nothing() {
        let set = BypassSet::new(Vec::<String>::new());
        assert!(!set.is_bypassed("/api"));
    }
}
