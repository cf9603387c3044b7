//! Search-related MCP tools.

use super::{parse_args, JsonObject, ToolReply};
use crate::error::{ToolError, ToolResult};
use crate::services::{search_index, DocumentHits, DocumentStore, MAX_MATCHES_PER_DOC};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;

pub(super) const NAME: &str = "search_docs";

pub(super) const DESCRIPTION: &str =
    "Search documentation for a query string. Returns matching files and lines.";

/// Input for the search_docs tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchDocsInput {
    /// Text to search for in documentation
    pub query: String,
}

/// Output for the search_docs tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDocsOutput {
    /// At least one document matched
    Found { query: String, hits: Vec<DocumentHits> },
    /// The docs root holds no documents
    NoDocuments { root: String },
    /// Documents exist but none matched
    NoMatches { query: String },
}

impl fmt::Display for SearchDocsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { hits, .. } => {
                write!(f, "Found matches in {} file(s):", hits.len())?;
                for doc in hits {
                    write!(f, "\n## {}\n", doc.path)?;
                    for (i, m) in doc.matches.iter().enumerate() {
                        if i > 0 {
                            f.write_str("\n")?;
                        }
                        write!(f, "Line {}: {}", m.line, m.text.trim())?;
                    }
                }
                Ok(())
            }
            Self::NoDocuments { root } => write!(f, "No documents found in {root}"),
            Self::NoMatches { query } => write!(f, "No matches found for: {query}"),
        }
    }
}

/// Executes the search_docs tool.
///
/// Builds a fresh index, then reports up to five matching lines for each
/// matching document.
///
/// # Errors
///
/// Returns `ToolError::QueryRequired` if the query is empty or only
/// whitespace.
pub fn execute_search_docs(
    store: &DocumentStore,
    input: SearchDocsInput,
) -> ToolResult<SearchDocsOutput> {
    if input.query.trim().is_empty() {
        return Err(ToolError::QueryRequired);
    }

    let index = store.build_index();
    if index.is_empty() {
        return Ok(SearchDocsOutput::NoDocuments {
            root: store.root().to_string(),
        });
    }

    let hits = search_index(&input.query, &index, MAX_MATCHES_PER_DOC);
    if hits.is_empty() {
        return Ok(SearchDocsOutput::NoMatches { query: input.query });
    }

    Ok(SearchDocsOutput::Found {
        query: input.query,
        hits,
    })
}

pub(super) fn handle(store: &DocumentStore, arguments: &JsonObject) -> ToolReply {
    match parse_args::<SearchDocsInput>(arguments) {
        Some(input) => execute_search_docs(store, input).into(),
        None => ToolError::QueryRequired.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Match;
    use crate::types::DocPath;

    #[test]
    fn test_found_report_format() {
        let output = SearchDocsOutput::Found {
            query: "world".to_string(),
            hits: vec![
                DocumentHits {
                    path: DocPath::from("a.md"),
                    matches: vec![Match {
                        line: 1,
                        text: "  hello world  ".to_string(),
                    }],
                    total_matches: 1,
                },
                DocumentHits {
                    path: DocPath::from("b.md"),
                    matches: vec![
                        Match {
                            line: 2,
                            text: "world".to_string(),
                        },
                        Match {
                            line: 4,
                            text: "World!".to_string(),
                        },
                    ],
                    total_matches: 2,
                },
            ],
        };

        assert_eq!(
            output.to_string(),
            "Found matches in 2 file(s):\n## a.md\nLine 1: hello world\n## b.md\nLine 2: world\nLine 4: World!"
        );
    }

    #[test]
    fn test_informational_messages() {
        let no_docs = SearchDocsOutput::NoDocuments {
            root: "/srv/docs".to_string(),
        };
        assert_eq!(no_docs.to_string(), "No documents found in /srv/docs");

        let no_matches = SearchDocsOutput::NoMatches {
            query: "xyz".to_string(),
        };
        assert_eq!(no_matches.to_string(), "No matches found for: xyz");
    }
}
