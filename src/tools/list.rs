//! Document listing MCP tool.

use super::{JsonObject, ToolReply};
use crate::services::DocumentStore;
use crate::types::DocPath;
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;

pub(super) const NAME: &str = "list_docs";

pub(super) const DESCRIPTION: &str = "List all available documentation files.";

/// Input for the list_docs tool (takes no arguments).
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListDocsInput {}

/// Output for the list_docs tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDocsOutput {
    /// Sorted relative paths of every document
    Listed { paths: Vec<DocPath> },
    /// The docs root holds no documents
    NoDocuments { root: String },
}

impl fmt::Display for ListDocsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed { paths } => {
                f.write_str("Documentation files:")?;
                for path in paths {
                    write!(f, "\n- {path}")?;
                }
                Ok(())
            }
            Self::NoDocuments { root } => write!(f, "No documents found in {root}"),
        }
    }
}

/// Executes the list_docs tool.
#[must_use]
pub fn execute_list_docs(store: &DocumentStore, _input: ListDocsInput) -> ListDocsOutput {
    let index = store.build_index();
    if index.is_empty() {
        return ListDocsOutput::NoDocuments {
            root: store.root().to_string(),
        };
    }

    ListDocsOutput::Listed {
        paths: index.paths().cloned().collect(),
    }
}

pub(super) fn handle(store: &DocumentStore, _arguments: &JsonObject) -> ToolReply {
    ToolReply::success(execute_list_docs(store, ListDocsInput::default()).to_string())
}
