//! docsearch: MCP server for a local markdown documentation tree.
//!
//! This library serves three tools over the Model Context Protocol:
//! - `search_docs`: literal, case-insensitive line search
//! - `list_docs`: every documentation file under the root
//! - `read_doc`: one file's full content, confined to the root
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              MCP Server (rmcp)              │
//! │         JSON-RPC over stdin/stdout          │
//! └─────────────────┬───────────────────────────┘
//!                   │ spawn_blocking
//! ┌─────────────────▼───────────────────────────┐
//! │              Tool Dispatcher                 │
//! │     search_docs, list_docs, read_doc        │
//! └───────┬─────────────────┬───────────────────┘
//!         │                 │
//!    ┌────▼─────────┐  ┌────▼──────┐
//!    │ Document     │  │ Path      │
//!    │ Store+Search │  │ Guard     │
//!    └────┬─────────┘  └────┬──────┘
//!         │                 │
//!    ┌────▼─────────────────▼──────┐
//!    │     docs root (read-only)    │
//!    └──────────────────────────────┘
//! ```
//!
//! The index is rebuilt from disk on every search or list call and thrown
//! away afterwards; there is no shared mutable state between requests.

pub mod error;
pub mod fmt;
pub mod security;
pub mod server;
pub mod services;
pub mod tools;
pub mod types;

pub use error::{Result, ServerError, ToolError};
pub use types::{DocPath, DocRoot};

use std::path::PathBuf;

/// Environment variable naming the docs root.
pub const DOCS_PATH_ENV: &str = "DOCS_PATH";

/// Docs root used when neither `--root` nor `DOCS_PATH` is given.
#[must_use]
pub fn default_docs_root() -> PathBuf {
    PathBuf::from("docs")
}
