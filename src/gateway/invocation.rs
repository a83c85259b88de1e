//! The invocation gateway shared by the MCP and HTTP transports.

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::catalog::{Catalog, CommandKind, CommandSpec};
use super::encoder::encode;
use super::error::InvocationError;
use super::process::{ProcessOutcome, ProcessRunner};
use super::workspace::WorkspaceStore;

/// Successful result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSuccess {
    pub output: String,
    /// Where the program was asked to save its output, if anywhere.
    pub saved_to: Option<PathBuf>,
    /// Command line that produced `output`; `None` for in-process operations.
    pub command: Option<String>,
}

#[derive(Clone)]
pub struct Gateway {
    catalog: Arc<Catalog>,
    workspace: Arc<WorkspaceStore>,
    runner: Arc<dyn ProcessRunner>,
    own_dir: PathBuf,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("commands", &self.catalog.len())
            .field("workspace", &self.workspace.snapshot())
            .field("program", &self.runner.program())
            .field("own_dir", &self.own_dir)
            .finish()
    }
}

impl Gateway {
    pub fn new(
        catalog: Arc<Catalog>,
        workspace: Arc<WorkspaceStore>,
        runner: Arc<dyn ProcessRunner>,
        own_dir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            workspace,
            runner,
            own_dir,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn workspace(&self) -> &WorkspaceStore {
        &self.workspace
    }

    /// Look up `operation` by tool name and invoke it.
    pub async fn invoke(
        &self,
        operation: &str,
        raw: &Map<String, Value>,
    ) -> Result<InvocationSuccess, InvocationError> {
        let spec = self
            .catalog
            .get(operation)
            .ok_or_else(|| InvocationError::UnknownOperation(operation.to_string()))?;
        self.invoke_spec(spec, raw).await
    }

    /// Validate, encode and run one operation.
    pub async fn invoke_spec(
        &self,
        spec: &CommandSpec,
        raw: &Map<String, Value>,
    ) -> Result<InvocationSuccess, InvocationError> {
        let params = spec.validate(raw).inspect_err(|e| {
            debug!(operation = spec.name, error = %e, "rejected parameters");
        })?;

        match spec.kind {
            CommandKind::Echo => {
                let message = params.text("message").unwrap_or_default();
                Ok(InvocationSuccess {
                    output: format!("Test successful! Your message: {message}"),
                    saved_to: None,
                    command: None,
                })
            }
            CommandKind::SetWorkingDirectory => {
                let candidate = params.text("directoryPath").unwrap_or_default();
                let dir = self.workspace.set(candidate).await?;
                Ok(InvocationSuccess {
                    output: format!("Working directory successfully set to: {}", dir.display()),
                    saved_to: None,
                    command: None,
                })
            }
            CommandKind::External => {
                // One snapshot per invocation; a concurrent set does not split it.
                let snapshot = self.workspace.snapshot();
                let encoded = encode(spec, &params, &snapshot, &self.own_dir);
                let command = encoded.args.command_line(self.runner.program());
                debug!(operation = spec.name, dir = %encoded.execution_dir.display(), "{command}");

                match self.runner.run(&encoded.args, &encoded.execution_dir).await {
                    ProcessOutcome::Completed {
                        code: Some(0),
                        stdout,
                        ..
                    } => {
                        info!(operation = spec.name, bytes = stdout.len(), "command succeeded");
                        Ok(InvocationSuccess {
                            output: stdout,
                            saved_to: encoded.saved_to,
                            command: Some(command),
                        })
                    }
                    ProcessOutcome::Completed {
                        code,
                        stdout,
                        stderr,
                    } => {
                        warn!(operation = spec.name, ?code, "command failed");
                        Err(InvocationError::Execution {
                            code,
                            stdout,
                            stderr,
                        })
                    }
                    ProcessOutcome::SpawnFailed(message) => {
                        warn!(operation = spec.name, %message, "spawn failed");
                        Err(InvocationError::Spawn { message })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::{DirectoryError, ValidationError};
    use crate::gateway::process::testing::ScriptedRunner;
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        root: PathBuf,
        runner: Arc<ScriptedRunner>,
        gateway: Gateway,
    }

    fn fixture(runner: ScriptedRunner) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::create_dir(root.join("sub")).unwrap();
        let runner = Arc::new(runner);
        let gateway = Gateway::new(
            Arc::new(Catalog::builtin()),
            Arc::new(WorkspaceStore::open(&root).unwrap()),
            runner.clone(),
            PathBuf::from("/opt/gateway"),
        );
        Fixture {
            _dir: dir,
            root,
            runner,
            gateway,
        }
    }

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn echo_does_not_spawn() {
        let fx = fixture(ScriptedRunner::ok(""));
        let out = fx
            .gateway
            .invoke("test", &obj(json!({"message": "ping"})))
            .await
            .unwrap();
        assert_eq!(out.output, "Test successful! Your message: ping");
        assert!(fx.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn ask_runs_with_encoded_args() {
        let fx = fixture(ScriptedRunner::ok("answer\n"));
        let out = fx
            .gateway
            .invoke("ask", &obj(json!({"query": "hello world", "model": "m1"})))
            .await
            .unwrap();
        assert_eq!(out.output, "answer\n");
        assert!(
            out.command
                .as_deref()
                .is_some_and(|c| c.starts_with("cursor-tools ask 'hello world' "))
        );
        let calls = fx.runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec!["ask", "\"hello world\"", "--model=m1"]);
        assert_eq!(calls[0].1, PathBuf::from("/opt/gateway"));
    }

    #[tokio::test]
    async fn missing_parameter_never_spawns() {
        let fx = fixture(ScriptedRunner::ok(""));
        let err = fx
            .gateway
            .invoke("ask", &obj(json!({"model": "m1"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvocationError::Validation(ValidationError::MissingParameter("query"))
        ));
        assert!(fx.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_operation() {
        let fx = fixture(ScriptedRunner::ok(""));
        let err = fx.gateway.invoke("nope", &Map::new()).await.unwrap_err();
        assert!(matches!(err, InvocationError::UnknownOperation(ref n) if n == "nope"));
    }

    #[tokio::test]
    async fn set_directory_then_repo_runs_there() {
        let fx = fixture(ScriptedRunner::ok("ctx"));
        let out = fx
            .gateway
            .invoke("set_working_directory", &obj(json!({"directoryPath": "sub"})))
            .await
            .unwrap();
        assert_eq!(
            out.output,
            format!("Working directory successfully set to: {}", fx.root.join("sub").display())
        );

        fx.gateway
            .invoke("repo", &obj(json!({"query": "q"})))
            .await
            .unwrap();
        assert_eq!(fx.runner.calls()[0].1, fx.root.join("sub"));
    }

    #[tokio::test]
    async fn set_directory_failure_keeps_workspace() {
        let fx = fixture(ScriptedRunner::ok(""));
        let err = fx
            .gateway
            .invoke("set_working_directory", &obj(json!({"directoryPath": "missing"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvocationError::Directory(DirectoryError::NotFound(_))
        ));
        assert_eq!(*fx.gateway.workspace().snapshot(), fx.root);
    }

    #[tokio::test]
    async fn doc_reports_saved_path() {
        let fx = fixture(ScriptedRunner::ok("done"));
        let out = fx
            .gateway
            .invoke("doc", &obj(json!({"output": "docs/repo.md"})))
            .await
            .unwrap();
        assert_eq!(out.saved_to, Some(fx.root.join("docs/repo.md")));
        let (args, dir) = &fx.runner.calls()[0];
        assert_eq!(args[1], format!("--save-to={}", fx.root.join("docs/repo.md").display()));
        assert_eq!(dir, &fx.root);
    }

    #[tokio::test]
    async fn nonzero_exit_is_execution_error() {
        let fx = fixture(ScriptedRunner::new(ProcessOutcome::Completed {
            code: Some(1),
            stdout: "partial".into(),
            stderr: "bad".into(),
        }));
        let err = fx
            .gateway
            .invoke("web", &obj(json!({"query": "q"})))
            .await
            .unwrap_err();
        match err {
            InvocationError::Execution {
                code,
                stdout,
                stderr,
            } => {
                assert_eq!(code, Some(1));
                assert_eq!(stdout, "partial");
                assert_eq!(stderr, "bad");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let fx = fixture(ScriptedRunner::new(ProcessOutcome::SpawnFailed(
            "cursor-tools: not found".into(),
        )));
        let err = fx
            .gateway
            .invoke("ask", &obj(json!({"query": "q"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to start subprocess: cursor-tools: not found");
    }
}
