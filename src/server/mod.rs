//! MCP server for the personal assistant.
//!
//! Exposes the function table as MCP tools over stdio.

pub mod handlers;

pub use handlers::AssistantMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the MCP server with stdio transport until the client disconnects.
pub async fn run_server(server: AssistantMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
