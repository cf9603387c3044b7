//! Type-safe newtypes for docsearch.
//!
//! These newtypes provide compile-time safety and semantic clarity
//! for core domain concepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Path of a document relative to the docs root.
///
/// Always `/`-separated with no leading `./`, regardless of platform,
/// so it can be handed back to `read_doc` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocPath(String);

impl DocPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Builds the key for `path` relative to `root`.
    ///
    /// Returns `None` when `path` is not under `root`, is the root itself,
    /// or has a component that is not valid UTF-8.
    #[must_use]
    pub fn from_relative(root: &Path, path: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let parts = rel
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self(parts.join("/")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl AsRef<str> for DocPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The documentation root every request is scoped under.
///
/// Fixed at startup. The directory does not have to exist: a missing root
/// simply indexes as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRoot {
    path: PathBuf,
}

impl DocRoot {
    /// Makes `path` absolute, canonicalizing it when it already exists.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the current directory cannot be determined
    /// for a relative path.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let path = match dunce::canonicalize(path) {
            Ok(canonical) => canonical,
            Err(_) => std::path::absolute(path)?,
        };
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DocRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

// Compile-time assertions for thread safety.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<DocPath>();
    assert_send_sync::<DocRoot>();
};
