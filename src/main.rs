//! Binary entry point for trello-mcp.
//!
//! This binary provides the MCP server plus a few operator conveniences
//! for poking at a board from the command line.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stdout/print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use trello_mcp::config::TrelloConfig;
use trello_mcp::mcp::McpServer;
use trello_mcp::trello::TrelloClient;

/// trello-mcp - A Model Context Protocol server for the Trello API.
#[derive(Parser)]
#[command(name = "trello-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio.
    Serve,

    /// Print the tool catalogue as JSON.
    Tools,

    /// List boards accessible to the configured credentials.
    Boards,

    /// List cards on a board.
    Cards {
        /// The ID of the board.
        board_id: String,

        /// Only cards carrying this label (case-insensitive).
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Poll a board once for cards carrying a label.
    Watch {
        /// The ID of the board.
        board_id: String,

        /// The label name to watch for.
        label: String,

        /// Only cards active after this RFC 3339 instant.
        #[arg(short, long)]
        since: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Initializes tracing to stderr; stdout is reserved for the protocol.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected command.
fn run(command: Commands) -> trello_mcp::Result<()> {
    // Credentials are loaded once, before anything else runs.
    let config = TrelloConfig::from_env()?;
    let client = TrelloClient::new(config);

    match command {
        Commands::Serve => {
            tracing::info!("Starting Trello MCP server");
            McpServer::new(client).serve()
        },
        Commands::Tools => {
            let server = McpServer::new(client);
            let response = server.handle_request(
                r#"{"jsonrpc":"2.0","id":0,"method":"tools/list"}"#,
            );
            println!("{}", pretty_result(&response));
            Ok(())
        },
        Commands::Boards => {
            let boards = client.list_boards()?;
            println!("{}", pretty(&boards));
            Ok(())
        },
        Commands::Cards { board_id, label } => {
            let cards = match label {
                Some(label) => client.get_cards_by_label(&board_id, &label)?,
                None => client.list_cards(&board_id)?,
            };
            println!("{}", pretty(&cards));
            Ok(())
        },
        Commands::Watch {
            board_id,
            label,
            since,
        } => {
            let result = client.watch_label(&board_id, &label, since.as_deref())?;
            println!("{}", pretty(&result));
            Ok(())
        },
    }
}

/// Pretty-prints a serializable value.
fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Extracts and pretty-prints the result of a raw JSON-RPC response.
fn pretty_result(response: &str) -> String {
    serde_json::from_str::<serde_json::Value>(response)
        .ok()
        .and_then(|v| v.get("result").cloned())
        .map_or_else(|| response.to_string(), |result| pretty(&result))
}
