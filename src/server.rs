//! MCP server implementation using rmcp.
//!
//! `tools/list` and `tools/call` are answered by hand rather than through
//! the rmcp tool macros: the dispatcher must turn unknown tool names and
//! missing arguments into ordinary text replies, never protocol errors.

use crate::error::ServerError;
use crate::tools::{JsonObject, ToolDispatcher, ToolReply};
use crate::types::DocRoot;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use std::sync::Arc;

/// MCP server for documentation search.
#[derive(Clone)]
pub struct DocSearchServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl DocSearchServer {
    /// Creates a server scoped to `root`.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if the tool table cannot be built.
    pub fn new(root: DocRoot) -> Result<Self, ServerError> {
        Ok(Self {
            dispatcher: Arc::new(ToolDispatcher::new(root)?),
        })
    }

    #[must_use]
    pub fn root(&self) -> &DocRoot {
        self.dispatcher.store().root()
    }

    /// Tool descriptors advertised on `tools/list`.
    #[must_use]
    pub fn tool_descriptors(&self) -> Vec<Tool> {
        self.dispatcher
            .tools()
            .iter()
            .map(|tool| Tool::new(tool.name, tool.description, Arc::clone(&tool.input_schema)))
            .collect()
    }

    /// Runs a tool call on the blocking pool.
    ///
    /// Index builds walk the filesystem, so they stay off the async
    /// executor. Each call gets its own index; nothing is shared but the
    /// dispatcher itself, which is immutable.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Task` if the worker panicked.
    pub async fn run_tool(
        &self,
        name: String,
        arguments: JsonObject,
    ) -> Result<ToolReply, ServerError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let reply =
            tokio::task::spawn_blocking(move || dispatcher.call(&name, &arguments)).await?;
        Ok(reply)
    }
}

impl From<ToolReply> for CallToolResult {
    fn from(reply: ToolReply) -> Self {
        let content = vec![Content::text(reply.text)];
        if reply.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

impl ServerHandler for DocSearchServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!(
            "docsearch: search and read the markdown documentation under {}.\n\n\
             TOOLS:\n\
             1. list_docs -> every documentation file (relative paths)\n\
             2. search_docs(query) -> case-insensitive substring matches, \
             up to 5 lines per file\n\
             3. read_doc(path) -> full content of one file, path relative to the docs root\n\n\
             The index is rebuilt on every call, so edits show up immediately.",
            self.root()
        );

        ServerInfo {
            instructions: Some(instructions),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_descriptors()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.into_owned();
        let arguments = request.arguments.unwrap_or_default();
        let reply = self.run_tool(name, arguments).await?;
        Ok(reply.into())
    }
}
