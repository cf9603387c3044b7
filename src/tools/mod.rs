//! MCP tool implementations and the dispatcher that routes calls to them.
//!
//! The dispatcher is transport-agnostic: it takes a tool name plus a JSON
//! argument object and always produces a [`ToolReply`]. Nothing here panics
//! on bad input or lets an error escape to the transport.

mod list;
mod read;
mod search;

use crate::error::{Result, ServerError, ToolError, ToolResult};
use crate::services::DocumentStore;
use crate::types::DocRoot;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;

// list
pub use list::{execute_list_docs, ListDocsInput, ListDocsOutput};

// read
pub use read::{execute_read_doc, ReadDocInput, ReadDocOutput};

// search
pub use search::{execute_search_docs, SearchDocsInput, SearchDocsOutput};

/// JSON object carrying tool arguments or an input schema.
pub type JsonObject = serde_json::Map<String, Value>;

/// Text reply to a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    /// Set for bad input, rejected paths and read failures. Informational
    /// outcomes such as "no matches" are not errors.
    pub is_error: bool,
}

impl ToolReply {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<ToolError> for ToolReply {
    fn from(err: ToolError) -> Self {
        tracing::debug!(code = err.code(), "tool call failed: {err}");
        Self::error(err.to_string())
    }
}

impl<T: Display> From<ToolResult<T>> for ToolReply {
    fn from(result: ToolResult<T>) -> Self {
        match result {
            Ok(output) => Self::success(output.to_string()),
            Err(err) => err.into(),
        }
    }
}

type Handler = fn(&DocumentStore, &JsonObject) -> ToolReply;

/// A registered tool: its descriptor plus the function that serves it.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
    handler: Handler,
}

impl ToolSpec {
    fn new<I: JsonSchema>(
        name: &'static str,
        description: &'static str,
        handler: Handler,
    ) -> Result<Self> {
        Ok(Self {
            name,
            description,
            input_schema: Arc::new(input_schema::<I>()?),
            handler,
        })
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Routes tool calls by name to their handlers.
///
/// Built once with the docs root. Holds no per-request state: every call
/// builds whatever it needs from scratch.
#[derive(Debug)]
pub struct ToolDispatcher {
    store: DocumentStore,
    tools: Vec<ToolSpec>,
}

impl ToolDispatcher {
    /// Creates the dispatcher with `search_docs`, `list_docs` and `read_doc`.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Json` or `ServerError::Config` if an input
    /// schema cannot be generated.
    pub fn new(root: DocRoot) -> Result<Self> {
        let tools = vec![
            ToolSpec::new::<SearchDocsInput>(
                search::NAME,
                search::DESCRIPTION,
                search::handle,
            )?,
            ToolSpec::new::<ListDocsInput>(list::NAME, list::DESCRIPTION, list::handle)?,
            ToolSpec::new::<ReadDocInput>(read::NAME, read::DESCRIPTION, read::handle)?,
        ];

        Ok(Self {
            store: DocumentStore::new(root),
            tools,
        })
    }

    /// Registered tools, in advertised order.
    #[must_use]
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Runs the named tool. Unknown names get an error reply.
    #[must_use]
    pub fn call(&self, name: &str, arguments: &JsonObject) -> ToolReply {
        match self.tools.iter().find(|tool| tool.name == name) {
            Some(tool) => {
                tracing::debug!(tool = name, "dispatching tool call");
                (tool.handler)(&self.store, arguments)
            }
            None => {
                tracing::warn!(tool = name, "unknown tool requested");
                ToolReply::error(format!("Unknown tool: {name}"))
            }
        }
    }
}

/// Generates the JSON schema object advertised for a tool input type.
fn input_schema<T: JsonSchema>() -> Result<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T))? {
        Value::Object(schema) => Ok(schema),
        other => Err(ServerError::Config(format!(
            "input schema is not an object: {other}"
        ))),
    }
}

/// Decodes tool arguments, returning `None` when required fields are
/// missing or have the wrong type.
fn parse_args<T: DeserializeOwned>(arguments: &JsonObject) -> Option<T> {
    serde_json::from_value(Value::Object(arguments.clone())).ok()
}
