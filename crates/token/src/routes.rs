//! Route patterns and the path matching rule
//!
//! A route attaches a permission set to a path pattern. Patterns are an
//! explicit tagged variant so the matching rule stays auditable:
//!
//! - `/releases/com/x/app.jar` — exact: matches that path only
//! - `/releases/com/x/` — prefix: matches the path itself and anything
//!   below it, always at a path-segment boundary
//! - `/releases/*/snapshot` — wildcard: each `*` matches exactly one
//!   segment; matched segments are followed like a prefix
//!
//! `/` alone is the root prefix and matches every path. Partial-segment
//! matches never occur: `ab` does not match `abc`.

use crate::permission::Permission;
use depot_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One segment of a wildcard pattern
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternSegment {
    /// Matches this segment verbatim
    Literal(String),
    /// Matches any single segment
    Any,
}

/// Path pattern owned by a route
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PathPattern {
    /// Matches one path exactly
    Exact(String),
    /// Matches a subtree at a segment boundary; the empty base is the root
    Prefix(String),
    /// Matches segment-wise with `*` holes, then anything below
    Wildcard(Vec<PatternSegment>),
}

impl PathPattern {
    /// Parse a route pattern
    ///
    /// The pattern must be non-empty. A trailing `/` selects prefix
    /// semantics; a `*` anywhere selects wildcard semantics, where each
    /// `*` must stand alone in its segment.
    pub fn parse(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_route(pattern, "pattern must not be empty"));
        }

        let is_prefix = trimmed.ends_with('/');
        let base = trimmed.trim_matches('/');

        if base.contains('*') {
            let mut segments = Vec::new();
            for segment in base.split('/') {
                match segment {
                    "*" => segments.push(PatternSegment::Any),
                    s if s.contains('*') => {
                        return Err(Error::invalid_route(
                            pattern,
                            "'*' must stand alone in its segment",
                        ));
                    }
                    s if s.is_empty() => {
                        return Err(Error::invalid_route(pattern, "empty path segment"));
                    }
                    s => segments.push(PatternSegment::Literal(s.to_string())),
                }
            }
            return Ok(PathPattern::Wildcard(segments));
        }

        if !base.is_empty() && base.split('/').any(str::is_empty) {
            return Err(Error::invalid_route(pattern, "empty path segment"));
        }

        if is_prefix {
            return Ok(PathPattern::Prefix(base.to_string()));
        }

        Ok(PathPattern::Exact(base.to_string()))
    }

    /// Whether the pattern matches a request path
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = path.trim_matches('/');
        match self {
            PathPattern::Exact(p) => path == p,
            PathPattern::Prefix(base) => {
                base.is_empty()
                    || path
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            }
            PathPattern::Wildcard(segments) => {
                let mut parts = path.split('/');
                for segment in segments {
                    let Some(part) = parts.next() else {
                        return false;
                    };
                    match segment {
                        PatternSegment::Any => {}
                        PatternSegment::Literal(literal) => {
                            if part != literal {
                                return false;
                            }
                        }
                    }
                }
                true
            }
        }
    }

    /// Whether the pattern can authorize paths inside a repository
    ///
    /// Request paths are rooted at the repository name, so only the first
    /// pattern segment matters here. Used for repository visibility.
    #[must_use]
    pub fn within_repository(&self, repository: &str) -> bool {
        match self {
            PathPattern::Exact(p) | PathPattern::Prefix(p) => {
                p.is_empty() || p.split('/').next() == Some(repository)
            }
            PathPattern::Wildcard(segments) => match segments.first() {
                Some(PatternSegment::Any) | None => true,
                Some(PatternSegment::Literal(literal)) => literal == repository,
            },
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(p) => write!(f, "/{p}"),
            PathPattern::Prefix(base) if base.is_empty() => write!(f, "/"),
            PathPattern::Prefix(base) => write!(f, "/{base}/"),
            PathPattern::Wildcard(segments) => {
                for segment in segments {
                    match segment {
                        PatternSegment::Literal(literal) => write!(f, "/{literal}")?,
                        PatternSegment::Any => write!(f, "/*")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Path pattern plus the permissions it grants, owned by one access token
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Route {
    pub path: PathPattern,
    pub permissions: BTreeSet<Permission>,
}

impl Route {
    #[must_use]
    pub fn new(path: PathPattern, permissions: BTreeSet<Permission>) -> Self {
        Route { path, permissions }
    }

    /// Whether this route authorizes `required` on `path`
    ///
    /// Manager short-circuits the path check entirely.
    #[must_use]
    pub fn authorizes(&self, path: &str, required: Permission) -> bool {
        self.permissions.contains(&Permission::Manager)
            || (self.permissions.contains(&required) && self.path.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> PathPattern {
        PathPattern::parse(text).unwrap()
    }

    #[test]
    fn exact_matches_only_itself() {
        let p = pattern("/releases/a/b");
        assert!(p.matches("/releases/a/b"));
        assert!(!p.matches("/releases/a"));
        assert!(!p.matches("/releases/a/b/c"));
    }

    #[test]
    fn prefix_matches_at_segment_boundaries() {
        let p = pattern("/releases/ab/");
        assert!(p.matches("/releases/ab"));
        assert!(p.matches("/releases/ab/c"));
        assert!(!p.matches("/releases/abc"));
    }

    #[test]
    fn no_partial_segment_matches() {
        assert!(!pattern("/ab/").matches("/abc"));
        assert!(!pattern("/ab").matches("/abc"));
    }

    #[test]
    fn root_prefix_matches_everything() {
        let p = pattern("/");
        assert!(p.matches("/releases/a/b"));
        assert!(p.matches("/snapshots"));
    }

    #[test]
    fn wildcard_matches_one_segment_per_star() {
        let p = pattern("/releases/*/snapshot");
        assert!(p.matches("/releases/project-a/snapshot"));
        assert!(p.matches("/releases/project-a/snapshot/1.0/file.jar"));
        assert!(!p.matches("/releases/snapshot"));
        assert!(!p.matches("/snapshots/project-a/snapshot"));
    }

    #[test]
    fn trailing_wildcard_requires_a_segment() {
        let p = pattern("/releases/*");
        assert!(p.matches("/releases/a"));
        assert!(p.matches("/releases/a/b/c"));
        assert!(!p.matches("/releases"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(PathPattern::parse("").is_err());
        assert!(PathPattern::parse("  ").is_err());
        assert!(PathPattern::parse("/releases/ab*").is_err());
        assert!(PathPattern::parse("/releases//a").is_err());
    }

    #[test]
    fn repository_visibility_follows_the_first_segment() {
        assert!(pattern("/releases/com/x").within_repository("releases"));
        assert!(!pattern("/releases/com/x").within_repository("snapshots"));
        assert!(pattern("/").within_repository("snapshots"));
        assert!(pattern("/*/com").within_repository("anything"));
    }

    #[test]
    fn manager_route_ignores_the_path() {
        let route = Route::new(pattern("/releases/a"), Permission::parse_set("m").unwrap());
        assert!(route.authorizes("/snapshots/other", Permission::Write));
    }

    #[test]
    fn route_requires_both_permission_and_path() {
        let route = Route::new(pattern("/releases/"), Permission::parse_set("r").unwrap());
        assert!(route.authorizes("/releases/a/b", Permission::Read));
        assert!(!route.authorizes("/releases/a/b", Permission::Write));
        assert!(!route.authorizes("/snapshots/a/b", Permission::Read));
    }

    #[test]
    fn patterns_render_back_to_their_canonical_form() {
        assert_eq!(pattern("/releases/a/b").to_string(), "/releases/a/b");
        assert_eq!(pattern("/releases/").to_string(), "/releases/");
        assert_eq!(pattern("/").to_string(), "/");
        assert_eq!(pattern("/releases/*/x").to_string(), "/releases/*/x");
    }
}
