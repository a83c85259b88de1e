//! External program execution.
//!
//! The gateway never goes through a shell: the literal argument tokens are
//! handed to the program as-is, with stdin closed and both output streams
//! captured in full. A started child always runs to completion, even when the
//! caller stops waiting for it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, trace, warn};

use super::encoder::ArgumentVector;

/// What happened when the program was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process ran to completion. `code` is `None` when killed by a signal.
    Completed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process never started.
    SpawnFailed(String),
}

/// Seam between the gateway and the operating system.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, args: &ArgumentVector, dir: &Path) -> ProcessOutcome;

    /// Program path shown in logs and command lines.
    fn program(&self) -> &Path;
}

/// Runs a real executable (`cursor-tools` by default).
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, args: &ArgumentVector, dir: &Path) -> ProcessOutcome {
        debug!(
            program = %self.program.display(),
            dir = %dir.display(),
            argc = args.len(),
            args = %args,
            "spawning"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(args.literal())
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => return ProcessOutcome::SpawnFailed(spawn_failure(&self.program, dir, &e)),
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (out, err, status) = tokio::join!(
            drain(stdout, "stdout"),
            drain(stderr, "stderr"),
            child.wait()
        );

        match status {
            Ok(status) => {
                debug!(code = ?status.code(), "process exited");
                ProcessOutcome::Completed {
                    code: status.code(),
                    stdout: out,
                    stderr: err,
                }
            }
            Err(e) => ProcessOutcome::SpawnFailed(format!("failed waiting for process: {e}")),
        }
    }

    fn program(&self) -> &Path {
        &self.program
    }
}

/// Spawn errors do not say whether the program or the directory was missing.
fn spawn_failure(program: &Path, dir: &Path, err: &std::io::Error) -> String {
    if !dir.is_dir() {
        return format!(
            "{}: working directory {} is not available: {err}",
            program.display(),
            dir.display()
        );
    }
    let mut message = format!("{}: {err}", program.display());
    if err.kind() == std::io::ErrorKind::NotFound {
        message.push_str(" (is cursor-tools installed? set CURSOR_TOOLS_PATH to its location)");
    }
    message
}

async fn drain<R>(stream: Option<R>, label: &'static str) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return String::new();
    };
    let mut reader = BufReader::new(stream);
    let mut collected = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                trace!(stream = label, "{}", String::from_utf8_lossy(&line).trim_end());
                collected.extend_from_slice(&line);
            }
            Err(e) => {
                warn!(stream = label, error = %e, "read failed, output truncated");
                collected.extend_from_slice(format!("\n[{label} truncated: {e}]\n").as_bytes());
                break;
            }
        }
    }
    String::from_utf8_lossy(&collected).into_owned()
}
