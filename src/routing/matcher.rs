//! Path pattern matching.
//!
//! # Responsibilities
//! - Normalize the request path (a single trailing slash is ignored)
//! - Match exact paths, collection paths and `<collection>/{id}` paths
//! - Extract the raw identifier segment for member routes
//!
//! # Design Decisions
//! - Path matching is case-sensitive and segment-wise
//! - A collection prefix glued to other text (`/api/usersfoo`) never matches
//! - No regex; every pattern is a handful of string comparisons

/// A path template in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    /// The path must equal the template.
    Exact(&'static str),
    /// `<base>/{id}` with exactly one non-empty trailing segment.
    Member(&'static str),
}

/// Result of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathMatch<'p> {
    /// Raw identifier segment for member routes.
    pub id: Option<&'p str>,
}

impl RoutePattern {
    pub fn matches<'p>(&self, path: &'p str) -> Option<PathMatch<'p>> {
        let path = normalize(path);
        match self {
            Self::Exact(template) => (path == *template).then_some(PathMatch { id: None }),
            Self::Member(base) => {
                let id = path.strip_prefix(base)?.strip_prefix('/')?;
                (!id.is_empty() && !id.contains('/')).then_some(PathMatch { id: Some(id) })
            }
        }
    }

    /// Template text, used in logs and metric labels.
    pub fn template(&self) -> String {
        match self {
            Self::Exact(template) => (*template).to_string(),
            Self::Member(base) => format!("{base}/{{id}}"),
        }
    }
}

/// Drop one trailing slash, keeping the root path intact.
pub fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let pattern = RoutePattern::Exact("/api/health");
        assert!(pattern.matches("/api/health").is_some());
        assert!(pattern.matches("/api/health/").is_some());
        assert!(pattern.matches("/api/Health").is_none());
        assert!(pattern.matches("/api/health/x").is_none());
        assert!(pattern.matches("/api/healthz").is_none());
    }

    #[test]
    fn root_is_not_normalized_away() {
        assert_eq!(normalize("/"), "/");
        assert!(RoutePattern::Exact("/").matches("/").is_some());
        assert!(RoutePattern::Exact("/").matches("//").is_none());
    }

    #[test]
    fn member_match_extracts_id() {
        let pattern = RoutePattern::Member("/api/users");
        assert_eq!(pattern.matches("/api/users/42").unwrap().id, Some("42"));
        assert_eq!(pattern.matches("/api/users/abc/").unwrap().id, Some("abc"));
        assert!(pattern.matches("/api/users").is_none());
        assert!(pattern.matches("/api/users/").is_none());
        assert!(pattern.matches("/api/users/1/extra").is_none());
        assert!(pattern.matches("/api/usersfoo/1").is_none());
    }

    #[test]
    fn templates() {
        assert_eq!(RoutePattern::Member("/api/posts").template(), "/api/posts/{id}");
        assert_eq!(RoutePattern::Exact("/api/stats").template(), "/api/stats");
    }
}
