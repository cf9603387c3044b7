//! Security module for docsearch.
//!
//! Provides protection against path traversal: every client-supplied path
//! is resolved against the docs root (symlinks followed, `.`/`..` applied)
//! and rejected unless the result stays under the root's canonical form.
//!
//! # Design Philosophy
//!
//! Resolution mirrors what the OS would open. Paths that do not exist yet
//! are still resolved, so a traversal attempt is reported as such whether
//! or not its target exists.

use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Security-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Error: path is required")]
    EmptyPath,

    #[error("Error: path outside docs directory")]
    OutsideRoot { attempted: String },

    #[error("Error: invalid path")]
    InvalidPath { attempted: String, reason: String },
}

impl SecurityError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPath => "EMPTY_PATH",
            Self::OutsideRoot { .. } => "OUTSIDE_ROOT",
            Self::InvalidPath { .. } => "INVALID_PATH",
        }
    }
}

// ============================================================================
// Path Validation
// ============================================================================

/// Resolves a user-provided document path and checks it stays under `root`.
///
/// # Security Properties
///
/// 1. Rejects empty paths
/// 2. Resolves component by component, following every symlink that
///    exists and applying `..` to the already-resolved prefix
/// 3. Ensures the resolved path starts with the canonical root, compared
///    component-wise so `/docs-old` is not inside `/docs`
///
/// An absolute `user_path` replaces the root when joined and is rejected as
/// outside the root.
///
/// # Example
///
/// ```
/// use docsearch::security::resolve_doc_path;
/// use std::path::Path;
///
/// let root = Path::new("/srv/docs");
///
/// assert!(resolve_doc_path(root, "guide/intro.md").is_ok());
/// assert!(resolve_doc_path(root, "./guide/../intro.md").is_ok());
///
/// assert!(resolve_doc_path(root, "../etc/passwd").is_err());
/// assert!(resolve_doc_path(root, "/etc/passwd").is_err());
/// assert!(resolve_doc_path(root, "guide/../../etc/passwd").is_err());
/// ```
pub fn resolve_doc_path(root: &Path, user_path: &str) -> Result<PathBuf, SecurityError> {
    if user_path.is_empty() {
        return Err(SecurityError::EmptyPath);
    }

    let invalid = |e: io::Error| SecurityError::InvalidPath {
        attempted: user_path.to_string(),
        reason: e.to_string(),
    };

    let canonical_root = resolve_lenient(root).map_err(invalid)?;
    let resolved = resolve_lenient(&root.join(user_path)).map_err(invalid)?;

    if !resolved.starts_with(&canonical_root) {
        tracing::warn!(path = user_path, "rejected path outside docs root");
        return Err(SecurityError::OutsideRoot {
            attempted: user_path.to_string(),
        });
    }

    Ok(resolved)
}

/// Canonicalizes `path` one component at a time, tolerating missing parts.
///
/// Every prefix that exists is canonicalized through the filesystem, so a
/// symlink is followed wherever it appears, including after a `..` that
/// cancels a missing directory. A `..` pops the already-resolved prefix,
/// which holds no symlinks. Components that do not exist (or sit below a
/// regular file) are kept lexically. Any other failure is returned as-is.
fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                resolved = match dunce::canonicalize(&candidate) {
                    Ok(canonical) => canonical,
                    Err(e) if is_missing(&e) => candidate,
                    Err(e) => return Err(e),
                };
            }
        }
    }

    Ok(resolved)
}

/// Whether `err` means the path simply does not exist.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn docs_root() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("docs");
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::write(root.join("a.md"), "hello").unwrap();
        fs::write(root.join("guide/intro.md"), "intro").unwrap();
        fs::write(dir.path().join("outside.md"), "secret").unwrap();
        (dir, root)
    }

    #[test]
    fn test_valid_paths() {
        let (_dir, root) = docs_root();
        let canonical_root = dunce::canonicalize(&root).unwrap();

        let resolved = resolve_doc_path(&root, "a.md").unwrap();
        assert_eq!(resolved, canonical_root.join("a.md"));

        let resolved = resolve_doc_path(&root, "./guide/../guide/intro.md").unwrap();
        assert_eq!(resolved, canonical_root.join("guide/intro.md"));
    }

    #[test]
    fn test_missing_file_inside_root_resolves() {
        let (_dir, root) = docs_root();
        let resolved = resolve_doc_path(&root, "guide/missing.md").unwrap();
        assert!(resolved.ends_with("docs/guide/missing.md"));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let (_dir, root) = docs_root();

        assert!(matches!(
            resolve_doc_path(&root, "../outside.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
        assert!(matches!(
            resolve_doc_path(&root, "../does-not-exist.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
        assert!(matches!(
            resolve_doc_path(&root, "guide/../../outside.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
        assert!(matches!(
            resolve_doc_path(&root, "missing/../../outside.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_absolute_path_blocked() {
        let (_dir, root) = docs_root();
        assert!(matches!(
            resolve_doc_path(&root, "/etc/passwd"),
            Err(SecurityError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_sibling_prefix_is_not_inside() {
        let (dir, root) = docs_root();
        fs::create_dir_all(dir.path().join("docs-old")).unwrap();
        fs::write(dir.path().join("docs-old/a.md"), "old").unwrap();

        assert!(matches!(
            resolve_doc_path(&root, "../docs-old/a.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_empty_path_rejected() {
        let (_dir, root) = docs_root();
        assert_eq!(resolve_doc_path(&root, ""), Err(SecurityError::EmptyPath));
    }

    #[test]
    fn test_nul_byte_is_invalid() {
        let (_dir, root) = docs_root();
        assert!(matches!(
            resolve_doc_path(&root, "a\0.md"),
            Err(SecurityError::InvalidPath { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_blocked() {
        let (dir, root) = docs_root();
        std::os::unix::fs::symlink(dir.path().join("outside.md"), root.join("link.md")).unwrap();

        assert!(matches!(
            resolve_doc_path(&root, "link.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_root_allowed() {
        let (_dir, root) = docs_root();
        std::os::unix::fs::symlink(root.join("a.md"), root.join("alias.md")).unwrap();

        let resolved = resolve_doc_path(&root, "alias.md").unwrap();
        assert!(resolved.ends_with("docs/a.md"));
    }

    #[test]
    fn test_path_through_file_is_missing_not_invalid() {
        let (_dir, root) = docs_root();
        let resolved = resolve_doc_path(&root, "a.md/x").unwrap();
        assert!(resolved.ends_with("docs/a.md/x"));
        assert!(!resolved.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_after_cancelled_missing_dir_blocked() {
        let (dir, root) = docs_root();
        fs::create_dir_all(dir.path().join("secret")).unwrap();
        fs::write(dir.path().join("secret/x.md"), "secret").unwrap();
        std::os::unix::fs::symlink(dir.path().join("secret"), root.join("link")).unwrap();

        for path in [
            "link/x.md",
            "missing/../link/x.md",
            "missing/../link/missing.md",
            "guide/missing/../../link/x.md",
        ] {
            assert!(
                matches!(
                    resolve_doc_path(&root, path),
                    Err(SecurityError::OutsideRoot { .. })
                ),
                "path: {path}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_of_symlink_follows_target() {
        let (dir, root) = docs_root();
        fs::create_dir_all(dir.path().join("secret/inner")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("secret/inner"), root.join("link")).unwrap();

        // `link/..` is `secret`, not the docs root
        assert!(matches!(
            resolve_doc_path(&root, "missing/../link/../../outside.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
        assert!(matches!(
            resolve_doc_path(&root, "link/../a.md"),
            Err(SecurityError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SecurityError::EmptyPath.code(), "EMPTY_PATH");
        assert_eq!(
            SecurityError::InvalidPath {
                attempted: String::new(),
                reason: String::new()
            }
            .code(),
            "INVALID_PATH"
        );
    }
}
