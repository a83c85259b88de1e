//! HTTP/JSON transport adapter.
//!
//! Routes:
//!   GET  /                         liveness banner
//!   GET  /health                   "OK"
//!   GET  /mcp/tools                catalog listing
//!   GET  /mcp/working-directory    current working directory
//!   POST /mcp/tools/{*operation}   invoke (`browser/act`, `ask`, ...)

pub mod error;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, http::StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::gateway::Gateway;
pub use error::HttpError;

pub const BANNER: &str = "MCP Server for cursor-tools is running.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolListing {
    pub name: String,
    pub path: String,
    pub description: String,
    pub input_schema: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeResponse {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDirectory {
    pub working_directory: String,
}

pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/mcp/tools", get(list_tools))
        .route("/mcp/working-directory", get(working_directory))
        .route("/mcp/tools/{*operation}", post(invoke))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

async fn root() -> &'static str {
    BANNER
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

async fn list_tools(State(gateway): State<Gateway>) -> Json<Vec<ToolListing>> {
    let tools = gateway
        .catalog()
        .iter()
        .map(|spec| ToolListing {
            name: spec.name.to_string(),
            path: format!("/mcp/tools/{}", spec.http_path),
            description: spec.description.to_string(),
            input_schema: spec.input_schema(),
        })
        .collect();
    Json(tools)
}

async fn working_directory(State(gateway): State<Gateway>) -> Json<WorkingDirectory> {
    Json(WorkingDirectory {
        working_directory: gateway.workspace().snapshot().display().to_string(),
    })
}

async fn invoke(
    State(gateway): State<Gateway>,
    Path(operation): Path<String>,
    body: Bytes,
) -> Result<Json<InvokeResponse>, HttpError> {
    let spec = gateway
        .catalog()
        .by_http_path(&operation)
        .ok_or_else(|| HttpError::NotFound(format!("Unknown operation: {operation}")))?;
    let params = parse_params(&body)?;
    debug!(operation = spec.name, "http invoke");

    let success = gateway.invoke_spec(spec, &params).await?;
    Ok(Json(InvokeResponse {
        success: true,
        output: success.output,
        saved_to: success.saved_to.map(|p| p.display().to_string()),
    }))
}

/// A missing or blank body is an empty parameter object.
fn parse_params(body: &[u8]) -> Result<Map<String, Value>, HttpError> {
    if body.trim_ascii().is_empty() {
        return Ok(Map::new());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Serve the HTTP API on `addr` until ctrl-c.
pub async fn serve_http(gateway: Gateway, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr().unwrap_or(addr);
    info!(
        addr = %local,
        workspace = %gateway.workspace().snapshot().display(),
        "serving HTTP API"
    );
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
