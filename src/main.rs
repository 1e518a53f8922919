//! Outreach Ledger MCP server - main entry point
//!
//! Serves the shared outreach log to MCP clients over stdio.

use anyhow::Result;
use outreach_ledger::client::{AsyncLedgerClient, AsyncLedgerClientImpl};
use outreach_ledger::repositories::{OutreachRepository, StoreOutreachRepository};
use outreach_ledger::{Config, LedgerClient, OutreachMcpServer};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let loaded = Config::from_env();

    // Logging goes to stderr; stdout carries MCP traffic
    let filter = match &loaded {
        Ok(config) => config.log_filter(),
        Err(_) => Config::default().log_filter(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting outreach ledger with store: {} (table: {})",
        config.store_url, config.table
    );

    let sync_client = LedgerClient::new(&config);
    let async_client = AsyncLedgerClientImpl::new(sync_client);
    let metrics = async_client.metrics();
    let client = Arc::new(async_client) as Arc<dyn AsyncLedgerClient>;
    let repository =
        Arc::new(StoreOutreachRepository::new(client)) as Arc<dyn OutreachRepository>;

    let server = OutreachMcpServer::new(repository);

    info!("Starting MCP server with stdio transport");
    let served = outreach_ledger::server::run_server(server).await;

    info!(metrics = %metrics.snapshot(), "Store traffic for this session");
    served?;

    info!("Outreach ledger shutdown complete");
    Ok(())
}
