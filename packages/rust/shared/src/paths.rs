//! Filesystem path component sanitization.
//!
//! Season years and Grand Prix names come from user flags and portal markup
//! and end up as directory names. Components are normalized (spaces to
//! underscores) and rejected outright when they would escape the download
//! root.

use crate::error::{PaddockError, Result};

/// Sanitize one path component for use under the download directory.
///
/// Spaces become underscores. Empty components, `.`/`..`, and components
/// containing path separators or NUL are rejected.
pub fn sanitize_component(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PaddockError::config("empty path component"));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(PaddockError::config(format!(
            "path component '{trimmed}' is not allowed"
        )));
    }
    if trimmed.contains(['/', '\\', '\0']) {
        return Err(PaddockError::config(format!(
            "path component '{trimmed}' contains a path separator"
        )));
    }

    Ok(trimmed.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(
            sanitize_component("Australian Grand Prix").unwrap(),
            "Australian_Grand_Prix"
        );
    }

    #[test]
    fn plain_year_passes_through() {
        assert_eq!(sanitize_component("2024").unwrap(), "2024");
    }

    #[test]
    fn rejects_traversal() {
        assert!(sanitize_component("..").is_err());
        assert!(sanitize_component(".").is_err());
        assert!(sanitize_component("../etc").is_err());
        assert!(sanitize_component("a/b").is_err());
        assert!(sanitize_component("a\\b").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(sanitize_component("").is_err());
        assert!(sanitize_component("   ").is_err());
    }
}
