//! MCP tool handlers for the outreach ledger.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::LedgerError;
use crate::models::OutreachRecord;
use crate::repositories::OutreachRepository;
use crate::services::{LedgerService, LedgerServiceImpl};
use crate::session::{LogOutcome, OutreachSession, SessionError, ADDED_MESSAGE};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the outreach ledger.
#[derive(Clone)]
pub struct OutreachMcpServer {
    session: Arc<OutreachSession>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for OutreachMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "outreach-ledger".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Shared cold-outreach log. Check a phone number or email before reaching out, then log it so nobody contacts the same person twice.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckContactParams {
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LogOutreachParams {
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    /// Insert even if the contact is already in the log
    #[serde(default)]
    allow_duplicate: Option<bool>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn session_error(e: SessionError) -> McpError {
    let code = match e.ledger_error() {
        LedgerError::InvalidInput(_) => ErrorCode::INVALID_PARAMS,
        _ => ErrorCode::INTERNAL_ERROR,
    };
    McpError {
        code,
        message: Cow::from(e.message().to_string()),
        data: None,
    }
}

fn record_json(record: &OutreachRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "phone": record.phone,
        "email": record.email,
        "created_at": record.created_at.to_rfc3339(),
        "contact": record.contact_summary(),
    })
}

fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl OutreachMcpServer {
    /// Create a new server over the given repository.
    pub fn new(repository: Arc<dyn OutreachRepository>) -> Self {
        let service = Arc::new(LedgerServiceImpl::new(repository)) as Arc<dyn LedgerService>;
        Self::with_service(service)
    }

    /// Create a server over an already-built ledger service.
    pub fn with_service(service: Arc<dyn LedgerService>) -> Self {
        Self {
            session: Arc::new(OutreachSession::new(service)),
            tool_router: Self::tool_router(),
        }
    }

    /// The caller-side session behind the tools.
    pub fn session(&self) -> &Arc<OutreachSession> {
        &self.session
    }

    #[tool(
        description = "Check whether a phone number and/or email is already in the outreach log. A record matching either value counts as already contacted. Matching is exact."
    )]
    async fn check_contact(
        &self,
        params: Parameters<CheckContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let outcome = self
            .session
            .check(params.phone.as_deref(), params.email.as_deref())
            .await
            .map_err(session_error)?;

        json_result(serde_json::json!({
            "found": outcome.found,
            "match_count": outcome.entries.len(),
            "entries": outcome.entries.iter().map(record_json).collect::<Vec<_>>(),
        }))
    }

    #[tool(
        description = "Log a phone number and/or email as contacted. Checks the log first and only inserts if nothing matches, unless allow_duplicate is true."
    )]
    async fn log_outreach(
        &self,
        params: Parameters<LogOutreachParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: log_outreach called");

        let outcome = self
            .session
            .check_and_add(
                params.phone.as_deref(),
                params.email.as_deref(),
                params.allow_duplicate.unwrap_or(false),
            )
            .await
            .map_err(session_error)?;

        match outcome {
            LogOutcome::Added(record) => json_result(serde_json::json!({
                "added": true,
                "message": ADDED_MESSAGE,
                "record": record_json(&record),
            })),
            LogOutcome::AlreadyContacted(existing) => json_result(serde_json::json!({
                "added": false,
                "message": "Already contacted. Nothing was added.",
                "entries": existing.entries.iter().map(record_json).collect::<Vec<_>>(),
            })),
        }
    }

    #[tool(description = "List every logged outreach, most recent first")]
    async fn list_outreaches(&self) -> Result<CallToolResult, McpError> {
        let records = self.session.history().await.map_err(session_error)?;

        json_result(serde_json::json!({
            "total": records.len(),
            "records": records.iter().map(record_json).collect::<Vec<_>>(),
        }))
    }
}
