//! MCP transport adapter.
//!
//! GatewayServer -> rmcp `ServerHandler` (tools/list, tools/call)
//! Tool calls go through `Gateway::invoke`; every gateway failure except an
//! unknown tool becomes a `CallToolResult` with `is_error = true`.
//!
use anyhow::{Context, Result};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::gateway::{CommandSpec, Gateway, InvocationError, InvocationSuccess};

const INSTRUCTIONS: &str = "Tools wrapping the cursor-tools CLI. Call set_working_directory \
before workspace-dependent tools (plan, repo, doc, github_*, xcode_*); relative paths are \
resolved against that directory.";

#[derive(Debug, Clone)]
pub struct GatewayServer {
    gateway: Gateway,
}

impl GatewayServer {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Catalog entries as MCP tools, in catalog order.
    pub fn tools(&self) -> Vec<Tool> {
        self.gateway.catalog().iter().map(tool_for).collect()
    }

    /// Handle one `tools/call` without the request context.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = name, "tools/call");
        match self.gateway.invoke(name, arguments).await {
            Err(InvocationError::UnknownOperation(op)) => Err(McpError::invalid_params(
                format!("Unknown tool: {op}"),
                None,
            )),
            other => Ok(render_call_result(other)),
        }
    }
}

pub fn tool_for(spec: &CommandSpec) -> Tool {
    Tool::new(spec.name, spec.description, Arc::new(spec.input_schema()))
}

/// Map an invocation outcome to MCP content blocks.
pub fn render_call_result(result: Result<InvocationSuccess, InvocationError>) -> CallToolResult {
    match result {
        Ok(success) => {
            let text = match success.command {
                Some(_) => format!("Command successful:\n{}", success.output),
                None => success.output,
            };
            let mut content = vec![Content::text(text)];
            if let Some(saved) = success.saved_to {
                content.push(Content::text(format!("Output saved to: {}", saved.display())));
            }
            CallToolResult::success(content)
        }
        Err(InvocationError::Execution {
            code,
            stdout,
            stderr,
        }) => {
            let head = match code {
                Some(c) => format!("Command failed with code {c}"),
                None => "Command terminated by signal".to_string(),
            };
            CallToolResult::error(vec![Content::text(format!(
                "{head}:\nStdout:\n{stdout}\nStderr:\n{stderr}"
            ))])
        }
        Err(e @ InvocationError::Spawn { .. }) => {
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
        Err(e) => CallToolResult::error(vec![Content::text(format!("Error: {e}"))]),
    }
}

impl ServerHandler for GatewayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = request.arguments.unwrap_or_default();
            self.dispatch(&request.name, &arguments).await
        }
    }
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(gateway: Gateway) -> Result<()> {
    info!(
        workspace = %gateway.workspace().snapshot().display(),
        tools = gateway.catalog().len(),
        "serving MCP over stdio"
    );
    let service = GatewayServer::new(gateway)
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to initialise MCP session on stdio")?;
    let reason = service.waiting().await.context("MCP service task failed")?;
    info!(?reason, "MCP session closed");
    Ok(())
}
