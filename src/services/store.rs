//! Document store: walks the docs root and loads markdown files.
//!
//! Every call to [`DocumentStore::build_index`] performs a fresh walk and
//! fresh reads. Nothing is cached between calls, so results are never more
//! than one request stale.

use crate::types::{DocPath, DocRoot};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix a file must carry to be indexed.
pub const DOC_SUFFIX: &str = ".md";

/// A loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: DocPath,
    pub content: String,
}

/// In-memory index of every document under the root, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    docs: BTreeMap<DocPath, Document>,
}

impl DocIndex {
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.docs.get(&DocPath::from(path))
    }

    /// Relative paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &DocPath> {
        self.docs.keys()
    }

    /// Documents as a parallel iterator (order preserved on `collect`).
    pub fn par_documents(&self) -> impl ParallelIterator<Item = &Document> {
        self.docs.par_iter().map(|(_, doc)| doc)
    }
}

impl FromIterator<Document> for DocIndex {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().map(|doc| (doc.path.clone(), doc)).collect(),
        }
    }
}

/// Loads documents from the docs root on demand.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: DocRoot,
}

impl DocumentStore {
    #[must_use]
    pub fn new(root: DocRoot) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &DocRoot {
        &self.root
    }

    /// Walks the root and loads every markdown file into a fresh index.
    ///
    /// A missing root yields an empty index. Files that cannot be read or
    /// are not valid UTF-8 are skipped; they never fail the build.
    #[must_use]
    pub fn build_index(&self) -> DocIndex {
        let root = self.root.path();
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "docs root missing, index is empty");
            return DocIndex::default();
        }

        let files = self.collect_files();
        let index: DocIndex = files
            .par_iter()
            .filter_map(|path| load_document(root, path))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        tracing::debug!(
            candidates = files.len(),
            documents = index.len(),
            "built docs index"
        );
        index
    }

    /// Collects candidate files under the root.
    ///
    /// Hidden files and ignore files are not honoured: everything under
    /// the root with the right suffix is a document. Directory symlinks are
    /// not followed; a file symlink counts only when its target is a
    /// regular file inside the root.
    fn collect_files(&self) -> Vec<PathBuf> {
        let root = self.root.path();
        let canonical_root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !is_doc_file(entry.path()) {
                continue;
            }
            let wanted = if entry.path_is_symlink() {
                links_inside(&canonical_root, entry.path())
            } else {
                entry.file_type().is_some_and(|ft| ft.is_file())
            };
            if wanted {
                files.push(entry.into_path());
            }
        }
        files
    }
}

/// Whether the symlink at `link` resolves to a regular file under `root`.
fn links_inside(root: &Path, link: &Path) -> bool {
    match dunce::canonicalize(link) {
        Ok(target) => target.starts_with(root) && target.is_file(),
        Err(e) => {
            tracing::debug!(path = %link.display(), "skipping broken symlink: {e}");
            false
        }
    }
}

/// Whether the file name carries the document suffix.
#[must_use]
pub fn is_doc_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(DOC_SUFFIX))
}

fn load_document(root: &Path, path: &Path) -> Option<Document> {
    let doc_path = DocPath::from_relative(root, path)?;
    match fs::read_to_string(path) {
        Ok(content) => Some(Document {
            path: doc_path,
            content,
        }),
        Err(e) => {
            tracing::debug!(path = %doc_path, "skipping document: {e}");
            None
        }
    }
}
