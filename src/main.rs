//! docsearch: MCP server for searching markdown documentation.
//!
//! Usage:
//!   docsearch --mcp [--root <path>]   # Start MCP server on stdin/stdout
//!   docsearch search <query>          # CLI search mode
//!   docsearch list                    # List documentation files
//!   docsearch read <path>             # Print one documentation file

use clap::{CommandFactory, Parser, Subcommand};
use docsearch::error::ToolError;
use docsearch::fmt as out;
use docsearch::server::DocSearchServer;
use docsearch::services::DocumentStore;
use docsearch::tools::{
    execute_list_docs, execute_read_doc, execute_search_docs, ListDocsInput, ReadDocInput,
    SearchDocsInput,
};
use docsearch::DocRoot;
use rmcp::ServiceExt;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "MCP server for searching markdown documentation")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Documentation root directory
    #[arg(long, env = docsearch::DOCS_PATH_ENV, default_value_os_t = docsearch::default_docs_root())]
    root: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search documentation for a string (case-insensitive)
    Search {
        /// Text to search for
        query: String,
    },

    /// List documentation files
    List,

    /// Print a documentation file
    Read {
        /// Path relative to the documentation root
        path: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Log to stderr only (stdout is JSON-RPC for MCP)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docsearch=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "docsearch", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let root = DocRoot::new(&cli.root)?;

    if cli.mcp {
        run_mcp_server(root).await?;
        Ok(ExitCode::SUCCESS)
    } else if let Some(cmd) = cli.command {
        let color = !cli.no_color && io::stdout().is_terminal();
        run_cli(root, cmd, color)
    } else {
        eprintln!("Use --mcp to start MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        Ok(ExitCode::FAILURE)
    }
}

async fn run_mcp_server(root: DocRoot) -> anyhow::Result<()> {
    if !root.path().is_dir() {
        tracing::warn!("Docs root {root} is not a directory; tools will report no documents");
    }
    tracing::info!("Starting MCP server for root: {root}");

    let server = DocSearchServer::new(root)?;

    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    tracing::info!("MCP client disconnected, shutting down");
    Ok(())
}

fn run_cli(root: DocRoot, cmd: Commands, color: bool) -> anyhow::Result<ExitCode> {
    let store = DocumentStore::new(root);
    let mut stdout = io::stdout().lock();

    let failure = match cmd {
        Commands::Search { query } => {
            match execute_search_docs(&store, SearchDocsInput { query }) {
                Ok(result) => {
                    out::fmt_search(&mut stdout, &result, color)?;
                    None
                }
                Err(e) => Some(e),
            }
        }

        Commands::List => {
            let result = execute_list_docs(&store, ListDocsInput::default());
            out::fmt_list(&mut stdout, &result, color)?;
            None
        }

        Commands::Read { path } => match execute_read_doc(&store, ReadDocInput { path }) {
            Ok(result) => {
                out::fmt_read(&mut stdout, &result)?;
                None
            }
            Err(e) => Some(e),
        },

        Commands::Completions { .. } => None,
    };

    stdout.flush()?;
    report(failure)
}

fn report(failure: Option<ToolError>) -> anyhow::Result<ExitCode> {
    let Some(err) = failure else {
        return Ok(ExitCode::SUCCESS);
    };

    let color = io::stderr().is_terminal();
    out::fmt_error(&mut io::stderr().lock(), &err, color)?;
    Ok(ExitCode::FAILURE)
}
