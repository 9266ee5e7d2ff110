//! Dotted entity identifiers: `project[.app[.module]]`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Maximum number of dotted segments.
pub const MAX_SEGMENTS: usize = 3;

/// `true` if `token` is non-empty and matches `[A-Za-z0-9_]+`.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// How deep an identifier reaches into the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Project,
    App,
    Module,
}

impl Granularity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::App => "app",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `project[.app[.module]]` identifier.
///
/// Invariant: 1 to 3 segments, none empty, all matching `[A-Za-z0-9_]+`.
/// Segments are kept raw; prefixing and case folding belong to
/// [`NamingScheme`](crate::domain::NamingScheme).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityIdentifier {
    project: String,
    app: Option<String>,
    module: Option<String>,
}

impl EntityIdentifier {
    /// Parse a dotted identifier.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = input.split('.').collect();

        if segments.len() > MAX_SEGMENTS {
            return Err(DomainError::invalid_identifier(
                input,
                format!(
                    "expected at most {MAX_SEGMENTS} segments, found {}",
                    segments.len()
                ),
            ));
        }

        for (position, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(DomainError::invalid_identifier(
                    input,
                    format!("segment {} is empty", position + 1),
                ));
            }
            if !is_valid_token(segment) {
                return Err(DomainError::invalid_identifier(
                    input,
                    format!("segment '{segment}' contains characters outside [A-Za-z0-9_]"),
                ));
            }
        }

        let mut parts = segments.into_iter().map(str::to_owned);
        // `split` always yields at least one segment, and empty ones were
        // rejected above.
        let project = parts.next().unwrap_or_default();
        Ok(Self {
            project,
            app: parts.next(),
            module: parts.next(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Number of segments supplied.
    pub fn depth(&self) -> usize {
        1 + usize::from(self.app.is_some()) + usize::from(self.module.is_some())
    }

    pub fn granularity(&self) -> Granularity {
        match (&self.app, &self.module) {
            (None, _) => Granularity::Project,
            (Some(_), None) => Granularity::App,
            (Some(_), Some(_)) => Granularity::Module,
        }
    }
}

impl FromStr for EntityIdentifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.project)?;
        if let Some(app) = &self.app {
            write!(f, ".{app}")?;
        }
        if let Some(module) = &self.module {
            write!(f, ".{module}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_is_project() {
        let id = EntityIdentifier::parse("blog").unwrap();
        assert_eq!(id.project(), "blog");
        assert_eq!(id.app(), None);
        assert_eq!(id.granularity(), Granularity::Project);
        assert_eq!(id.depth(), 1);
    }

    #[test]
    fn three_segments_reach_module() {
        let id: EntityIdentifier = "blog.posts.comments".parse().unwrap();
        assert_eq!(id.app(), Some("posts"));
        assert_eq!(id.module(), Some("comments"));
        assert_eq!(id.granularity(), Granularity::Module);
        assert_eq!(id.to_string(), "blog.posts.comments");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            EntityIdentifier::parse(""),
            Err(DomainError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn four_segments_are_rejected() {
        let err = EntityIdentifier::parse("a.b.c.d").unwrap_err();
        assert!(err.to_string().contains("at most 3"));
    }

    #[test]
    fn empty_inner_segment_is_rejected() {
        assert!(EntityIdentifier::parse("blog..comments").is_err());
        assert!(EntityIdentifier::parse("blog.").is_err());
        assert!(EntityIdentifier::parse(".posts").is_err());
    }

    #[test]
    fn invalid_characters_are_rejected() {
        for input in ["my-blog", "blog.po sts", "blog/posts", "blög"] {
            assert!(EntityIdentifier::parse(input).is_err(), "accepted: {input}");
        }
    }

    #[test]
    fn underscores_and_digits_are_accepted() {
        assert!(EntityIdentifier::parse("blog_2.posts_v1.mod_x").is_ok());
    }

    #[test]
    fn granularity_ordering_follows_depth() {
        assert!(Granularity::Project < Granularity::App);
        assert!(Granularity::App < Granularity::Module);
    }
}
