//! Runtime configuration: flags first, then environment, then defaults.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::gateway::{Catalog, CommandRunner, Gateway, WorkspaceStore};

pub const PROGRAM_ENV: &str = "CURSOR_TOOLS_PATH";
pub const WORKSPACE_ENV: &str = "CURSOR_TOOLS_WORKSPACE";
pub const BIND_ENV: &str = "CURSOR_TOOLS_HTTP_BIND";

pub const DEFAULT_PROGRAM: &str = "cursor-tools";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub program: PathBuf,
    /// Initial working directory for workspace-dependent operations.
    pub workspace: PathBuf,
    /// Where non-workspace operations run.
    pub own_dir: PathBuf,
}

impl GatewayConfig {
    /// Resolve from CLI flags and the process environment.
    pub fn resolve(program: Option<PathBuf>, workspace: Option<PathBuf>) -> Result<Self> {
        let own_dir = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::resolve_with(program, workspace, own_dir, |k| {
            std::env::var(k).ok()
        }))
    }

    /// Same precedence as `resolve`, with the environment supplied by `env`.
    pub fn resolve_with(
        program: Option<PathBuf>,
        workspace: Option<PathBuf>,
        own_dir: PathBuf,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self {
            program: program
                .or_else(|| from_env(PROGRAM_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM)),
            workspace: workspace
                .or_else(|| from_env(WORKSPACE_ENV))
                .unwrap_or_else(|| own_dir.clone()),
            own_dir,
        }
    }

    /// Wire the catalog, store and runner into a gateway.
    pub fn build_gateway(&self) -> Result<Gateway> {
        let store = WorkspaceStore::open(&self.workspace).with_context(|| {
            format!("Invalid initial working directory '{}'", self.workspace.display())
        })?;
        Ok(Gateway::new(
            Arc::new(Catalog::builtin()),
            Arc::new(store),
            Arc::new(CommandRunner::new(&self.program)),
            self.own_dir.clone(),
        ))
    }
}

/// HTTP bind address: flag, then `CURSOR_TOOLS_HTTP_BIND`, then the default.
pub fn resolve_bind(
    flag: Option<SocketAddr>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SocketAddr> {
    if let Some(addr) = flag {
        return Ok(addr);
    }
    let raw = env(BIND_ENV)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid bind address '{raw}' ({BIND_ENV})"))
}
