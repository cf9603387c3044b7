//! Literal, case-insensitive line search over loaded documents.
//!
//! There is no ranking: a line either contains the query or it doesn't.

use super::store::DocIndex;
use crate::types::DocPath;
use rayon::prelude::*;

/// Maximum matches surfaced per document in an aggregated search.
pub const MAX_MATCHES_PER_DOC: usize = 5;

/// A line containing the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Line number (1-indexed)
    pub line: usize,
    /// Full line text, without the line terminator
    pub text: String,
}

/// Matches for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHits {
    pub path: DocPath,
    /// First matches in line order, capped by the per-document limit
    pub matches: Vec<Match>,
    /// Number of matching lines before the cap was applied
    pub total_matches: usize,
}

impl DocumentHits {
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.total_matches > self.matches.len()
    }
}

/// Finds every line of `content` containing `query`, ignoring case.
///
/// Lines are split on `\n` with a trailing `\r` dropped. A line with
/// several occurrences still yields one match.
#[must_use]
pub fn search_content(query: &str, content: &str) -> Vec<Match> {
    let needle = query.to_lowercase();
    content
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.to_lowercase().contains(&needle).then(|| Match {
                line: i + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

/// Searches every document in the index.
///
/// Documents without matches are omitted. Each document keeps at most
/// `per_doc_limit` matches; the result follows the index's path order.
#[must_use]
pub fn search_index(query: &str, index: &DocIndex, per_doc_limit: usize) -> Vec<DocumentHits> {
    index
        .par_documents()
        .filter_map(|doc| {
            let mut matches = search_content(query, &doc.content);
            if matches.is_empty() {
                return None;
            }
            let total_matches = matches.len();
            matches.truncate(per_doc_limit);
            Some(DocumentHits {
                path: doc.path.clone(),
                matches,
                total_matches,
            })
        })
        .collect()
}
