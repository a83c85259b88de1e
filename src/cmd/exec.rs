/*!
`exec.rs`

Implements the `exec` subcommand: runs one catalog operation through the same
gateway the transports use, without an MCP client in between.

  cursor-tools-mcp exec ask --param query="what is rust" --param maxTokens=200
  cursor-tools-mcp exec browser_open --param-file params.yaml --json

Parameter injection:
  --param KEY=VALUE              (repeatable; coerced by the field's declared kind)
  --param-file params.(json|yaml) (merged; --param overrides file entries)

JSON Success Output:
{
  "status": "ok",
  "operation": "ask",
  "command": "cursor-tools ask 'what is rust' ...",
  "elapsed_ms": 1234,
  "output": "...",
  "savedTo": "/abs/path"          (only when a save path was given)
}

JSON Error Output:
{
  "status": "error",
  "error": "Command failed with code 1",
  "stdout": "...", "stderr": "..." (execution failures only)
}
*/

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Instant;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji};
use crate::cmd::shared::{build_arguments, load_param_file, parse_params};
use crate::config::GatewayConfig;
use crate::gateway::{InvocationError, InvocationSuccess};

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Operation to run (tool name, e.g. ask, browser_open)
    #[arg(value_name = "OPERATION")]
    pub operation: String,

    /// Provide parameter (KEY=VALUE), repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Load parameters from file (JSON or YAML). CLI --param overrides file entries
    #[arg(long = "param-file", value_name = "PATH")]
    pub param_file: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute_exec(args: ExecArgs, config: &GatewayConfig) -> Result<()> {
    let gateway = config.build_gateway()?;
    let operation = args.operation.trim().to_string();
    let Some(spec) = gateway.catalog().get(&operation) else {
        return output_error(
            args.json,
            &InvocationError::UnknownOperation(operation.clone()),
        );
    };

    let cli = parse_params(&args.params)?;
    let file = match &args.param_file {
        Some(p) => load_param_file(p)?,
        None => Default::default(),
    };
    let arguments = build_arguments(spec, file, &cli);

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let started = Instant::now();
    let result = rt.block_on(gateway.invoke_spec(spec, &arguments));
    let elapsed_ms = started.elapsed().as_millis();

    match result {
        Ok(success) if args.json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&success_json(&operation, elapsed_ms, &success))?
            );
            Ok(())
        }
        Ok(success) => {
            print_success(&operation, elapsed_ms, &success);
            Ok(())
        }
        Err(e) => output_error(args.json, &e),
    }
}

fn success_json(operation: &str, elapsed_ms: u128, success: &InvocationSuccess) -> Value {
    let mut v = json!({
        "status": "ok",
        "operation": operation,
        "command": success.command,
        "elapsed_ms": elapsed_ms,
        "output": success.output,
    });
    if let (Some(saved), Value::Object(map)) = (&success.saved_to, &mut v) {
        map.insert("savedTo".into(), json!(saved.display().to_string()));
    }
    v
}

fn error_json(err: &InvocationError) -> Value {
    match err {
        InvocationError::Execution { stdout, stderr, .. } => json!({
            "status": "error",
            "error": err.to_string(),
            "stdout": stdout,
            "stderr": stderr,
        }),
        _ => json!({"status": "error", "error": err.to_string()}),
    }
}

fn print_success(operation: &str, elapsed_ms: u128, success: &InvocationSuccess) {
    let style = StyleOptions::detect();
    let subtitle = success
        .command
        .as_deref()
        .map(|c| format!("{c} • {elapsed_ms} ms"));
    println!(
        "{}",
        box_header(
            format!("{} {operation}", emoji("success", &style)),
            subtitle,
            &style
        )
    );
    println!("{}", success.output.trim_end());
    if let Some(saved) = &success.saved_to {
        println!(
            "\n{} {}",
            emoji("folder", &style),
            color(
                Role::Success,
                format!("Output saved to: {}", saved.display()),
                &style
            )
        );
    }
}

fn output_error(json: bool, err: &InvocationError) -> Result<()> {
    if json {
        let v = error_json(err);
        println!(
            "{}",
            serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Exec Error", emoji("error", &style));
        println!(
            "{}",
            box_header(title, Some(color(Role::Error, err.to_string(), &style)), &style)
        );
        if let InvocationError::Execution { stdout, stderr, .. } = err {
            for (label, body) in [("stdout", stdout), ("stderr", stderr)] {
                if !body.trim().is_empty() {
                    println!("{}", color(Role::Accent, format!("{label}:"), &style));
                    println!("{}", body.trim_end());
                }
            }
        }
    }
    anyhow::bail!(err.to_string())
}
