//! Common test utilities for docsearch integration tests.
//!
//! Provides `TestEnv` for setting up an isolated docs root with a
//! dispatcher wired to it.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use docsearch::tools::{JsonObject, ToolDispatcher, ToolReply};
use docsearch::DocRoot;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A docs root inside a temp directory, plus a dispatcher scoped to it.
///
/// The docs root is `<tmp>/docs`, so tests can place files next to it
/// (`<tmp>/outside.md`) to probe the path guard.
pub struct TestEnv {
    pub dir: TempDir,
    pub dispatcher: ToolDispatcher,
}

impl TestEnv {
    /// Creates a new environment with an empty docs root.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("docs")).expect("Failed to create docs root");
        Self::with_dir(dir)
    }

    /// Creates an environment whose docs root does not exist.
    pub fn missing_root() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self::with_dir(dir)
    }

    fn with_dir(dir: TempDir) -> Self {
        let root = DocRoot::new(dir.path().join("docs")).expect("Failed to resolve docs root");
        let dispatcher = ToolDispatcher::new(root).expect("Failed to build dispatcher");
        Self { dir, dispatcher }
    }

    /// Writes a file relative to the docs root.
    pub fn write_doc(&self, name: &str, content: impl AsRef<[u8]>) {
        write(&self.root().join(name), content);
    }

    /// Writes a file relative to the temp directory, outside the docs root.
    pub fn write_outside(&self, name: &str, content: impl AsRef<[u8]>) {
        write(&self.dir.path().join(name), content);
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("docs")
    }

    /// Calls a tool with JSON arguments.
    pub fn call(&self, tool: &str, arguments: Value) -> ToolReply {
        self.dispatcher.call(tool, &args(arguments))
    }

    pub fn search(&self, query: &str) -> ToolReply {
        self.call("search_docs", serde_json::json!({ "query": query }))
    }

    pub fn list(&self) -> ToolReply {
        self.call("list_docs", serde_json::json!({}))
    }

    pub fn read(&self, path: &str) -> ToolReply {
        self.call("read_doc", serde_json::json!({ "path": path }))
    }

    /// Root as the dispatcher reports it in replies.
    pub fn root_display(&self) -> String {
        self.dispatcher.store().root().to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a JSON value into a tool argument object.
pub fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("arguments must be an object, got {other}"),
    }
}

fn write(path: &Path, content: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write test file");
}

/// Creates an environment with a small, realistic documentation tree.
pub fn sample_docs() -> TestEnv {
    let env = TestEnv::new();

    env.write_doc(
        "README.md",
        "# Project\n\nSee the guides for installation and configuration.\n",
    );

    env.write_doc(
        "guides/install.md",
        r#"# Installation

Run the installer:

    ./install.sh --prefix /usr/local

The installer reads its configuration from `install.toml`.
"#,
    );

    env.write_doc(
        "guides/config.md",
        r#"# Configuration

Set `DOCS_PATH` to change the documentation root.
Configuration is read once at startup.
"#,
    );

    env.write_doc("notes.txt", "configuration notes that are not markdown\n");

    env
}
