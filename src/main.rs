//! Personal Assistant CLI (`pa`).
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pa serve` | Run the MCP server on stdio (default) |
//! | `pa call <function> [json]` | Dispatch one function call and print the result |
//! | `pa functions` | Print the function-calling schemas as JSON |
//! | `pa stats` | Print contact and note statistics |
//!
//! Logs go to stderr only so stdout stays clean for MCP and JSON output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use personal_assistant::server::{run_server, AssistantMcpServer};
use personal_assistant::tools::{function_schemas, Dispatcher};
use personal_assistant::{Config, Operations};
use serde_json::Value;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Contacts and notes manager with an AI function-calling front end.
#[derive(Parser)]
#[command(name = "pa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve every function as an MCP tool over stdio.
    Serve,

    /// Dispatch a single function call.
    ///
    /// Exits with status 1 when the call reports `success: false`.
    Call {
        /// Function name, e.g. `add_contact`
        function: String,

        /// Arguments as a JSON object, e.g. '{"name": "Alice"}'
        arguments: Option<String>,
    },

    /// Print the function table as OpenAI-style schemas.
    Functions,

    /// Print counts of contacts and notes.
    Stats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;

    // RUST_LOG wins; otherwise use the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Data files: {} and {}",
        config.contacts_path().display(),
        config.notes_path().display()
    );

    if let Some(Commands::Functions) = cli.command {
        println!("{}", serde_json::to_string_pretty(&function_schemas())?);
        return Ok(ExitCode::SUCCESS);
    }

    let operations = match Operations::open(config) {
        Ok(ops) => ops,
        Err(e) => {
            error!("Failed to load data: {}", e);
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = AssistantMcpServer::new(Dispatcher::new(operations));
            info!("Starting MCP server with stdio transport");
            run_server(server).await?;
            info!("MCP server shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Call {
            function,
            arguments,
        } => {
            let arguments = match arguments {
                Some(text) => serde_json::from_str(&text)
                    .with_context(|| format!("Arguments for {} are not valid JSON", function))?,
                None => Value::Null,
            };
            let result = Dispatcher::new(operations).dispatch(&function, arguments);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Stats => {
            let result = operations.statistics();
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Functions => Ok(ExitCode::SUCCESS),
    }
}
