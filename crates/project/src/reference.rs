//! Project reference resolution.
//!
//! A reference is either a bare project id (returned as-is) or a URL on the hosting domain,
//! from which the id is extracted.

use crate::error::ReferenceError;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Host accepted by [`resolve_project_id`].
pub const DEFAULT_HOST: &str = "stackblitz.com";

/// First path segments that name a site page rather than a project.
const RESERVED_SEGMENTS: &[&str] = &["edit", "fork", "github", "~"];

/// Canonical project identifier, as recognized by the project store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceResolver {
    host: String,
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl ReferenceResolver {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn resolve(&self, reference: &str) -> Result<ProjectId, ReferenceError> {
        if reference.trim().is_empty() {
            return Err(ReferenceError::Empty);
        }

        let Ok(url) = Url::parse(reference) else {
            return Ok(ProjectId::new(reference));
        };

        let host = url.host_str().unwrap_or_default();
        if host != self.host {
            return Err(ReferenceError::UnsupportedHost {
                host: host.to_string(),
                expected: self.host.clone(),
            });
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|parts| parts.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["edit", id, ..] => Ok(ProjectId::new(*id)),
            [id] if !RESERVED_SEGMENTS.contains(id) => Ok(ProjectId::new(*id)),
            _ => Err(ReferenceError::Unresolvable(reference.to_string())),
        }
    }
}

/// Resolves `reference` against the default hosting domain.
pub fn resolve_project_id(reference: &str) -> Result<ProjectId, ReferenceError> {
    ReferenceResolver::default().resolve(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "stackblitz-starters-rf7brvcm";

    #[test]
    fn plain_id_is_returned_as_is() {
        assert_eq!(resolve_project_id(ID).unwrap().as_str(), ID);
        assert_eq!(resolve_project_id("vitejs-vite-abc").unwrap().as_str(), "vitejs-vite-abc");
    }

    #[test]
    fn extracts_id_from_edit_url() {
        let url = format!("https://stackblitz.com/edit/{ID}");
        assert_eq!(resolve_project_id(&url).unwrap().as_str(), ID);

        let with_file = format!("https://stackblitz.com/edit/{ID}/src?file=src/main.ts");
        assert_eq!(resolve_project_id(&with_file).unwrap().as_str(), ID);
    }

    #[test]
    fn extracts_id_from_direct_url() {
        let url = format!("https://stackblitz.com/{ID}");
        assert_eq!(resolve_project_id(&url).unwrap().as_str(), ID);
        let trailing = format!("https://stackblitz.com/{ID}/");
        assert_eq!(resolve_project_id(&trailing).unwrap().as_str(), ID);
    }

    #[test]
    fn rejects_foreign_hosts() {
        for url in [
            "https://example.com/foo",
            "https://example.com/edit/foo",
            "https://www.stackblitz.com/edit/foo",
        ] {
            let err = resolve_project_id(url).unwrap_err();
            assert!(
                matches!(err, ReferenceError::UnsupportedHost { .. }),
                "{url}: {err:?}"
            );
            assert!(err.to_string().starts_with("Unsupported URL"));
        }
    }

    #[test]
    fn edit_url_without_id_is_unresolvable() {
        for url in [
            "https://stackblitz.com/edit/",
            "https://stackblitz.com/edit",
            "https://stackblitz.com/",
            "https://stackblitz.com/fork",
            "https://stackblitz.com/~",
            "https://stackblitz.com/github/user/repo",
            "https://stackblitz.com/some/nested/path",
        ] {
            let err = resolve_project_id(url).unwrap_err();
            assert!(matches!(err, ReferenceError::Unresolvable(_)), "{url}: {err:?}");
            assert!(err.to_string().contains("Could not extract project ID"));
        }
    }

    #[test]
    fn empty_reference_is_rejected() {
        assert_eq!(resolve_project_id(""), Err(ReferenceError::Empty));
        assert_eq!(resolve_project_id("   "), Err(ReferenceError::Empty));
    }

    #[test]
    fn custom_host_is_honored() {
        let resolver = ReferenceResolver::new("Blitz.Example.Test");
        assert_eq!(resolver.host(), "blitz.example.test");
        assert_eq!(
            resolver.resolve("https://blitz.example.test/edit/abc").unwrap().as_str(),
            "abc"
        );
        assert!(resolver.resolve("https://stackblitz.com/abc").is_err());
    }
}
