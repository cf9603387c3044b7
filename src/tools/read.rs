//! Document content MCP tool.
//!
//! # Security
//!
//! Every path is resolved through [`crate::security::resolve_doc_path`]
//! before anything is read, so symlinks and `..` cannot leave the root.

use super::{parse_args, JsonObject, ToolReply};
use crate::error::{ToolError, ToolResult};
use crate::security;
use crate::services::DocumentStore;
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use std::fs;

pub(super) const NAME: &str = "read_doc";

pub(super) const DESCRIPTION: &str = "Read the full content of a specific documentation file.";

/// Input for the read_doc tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadDocInput {
    /// Relative path to the documentation file
    pub path: String,
}

/// Output for the read_doc tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadDocOutput {
    /// Path as requested
    pub path: String,
    /// File content, unmodified
    pub content: String,
}

impl fmt::Display for ReadDocOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Executes the read_doc tool.
///
/// Any file under the root can be read, not only indexed documents.
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - The path resolves outside the root or cannot be resolved
/// - The file does not exist
/// - The file cannot be read as UTF-8 text
pub fn execute_read_doc(store: &DocumentStore, input: ReadDocInput) -> ToolResult<ReadDocOutput> {
    if input.path.is_empty() {
        return Err(ToolError::PathRequired);
    }

    let full_path = security::resolve_doc_path(store.root().path(), &input.path)?;

    if !full_path.exists() {
        return Err(ToolError::NotFound { path: input.path });
    }

    let content = fs::read_to_string(&full_path).map_err(|source| ToolError::Read { source })?;

    Ok(ReadDocOutput {
        path: input.path,
        content,
    })
}

pub(super) fn handle(store: &DocumentStore, arguments: &JsonObject) -> ToolReply {
    match parse_args::<ReadDocInput>(arguments) {
        Some(input) => execute_read_doc(store, input).into(),
        None => ToolError::PathRequired.into(),
    }
}
