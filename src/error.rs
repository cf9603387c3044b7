//! Error types for docsearch.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation. Tool-facing errors render as the exact
//! text returned to the MCP client.

use crate::security::SecurityError;
use thiserror::Error;

/// Top-level server error.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Failures a tool call reports back to the caller.
///
/// The `Display` output of each variant is the reply text.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Error: query is required")]
    QueryRequired,

    #[error("Error: path is required")]
    PathRequired,

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error("Error: file not found: {path}")]
    NotFound { path: String },

    #[error("Error reading file: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

// Error code implementations for machine-readable error responses
impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "JSON_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Task(_) => "TASK_ERROR",
        }
    }
}

impl ToolError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::QueryRequired => "QUERY_REQUIRED",
            Self::PathRequired => "PATH_REQUIRED",
            Self::Security(e) => e.code(),
            Self::NotFound { .. } => "FILE_NOT_FOUND",
            Self::Read { .. } => "FILE_READ_ERROR",
        }
    }
}

// Conversion to rmcp protocol errors
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        rmcp::ErrorData::internal_error(err.to_string(), None)
    }
}
