//! MCP server for the outreach ledger.
//!
//! Exposes lookup, logging, and history to assistant clients through the
//! Model Context Protocol.

pub mod handlers;

pub use handlers::OutreachMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the MCP server with stdio transport until the client disconnects.
pub async fn run_server(server: OutreachMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
