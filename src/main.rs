use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod config;
mod gateway;
mod http;
mod mcp;
mod utils;

use cmd::{ExecArgs, ListArgs, ServeArgs};
use config::GatewayConfig;
use utils::LogLevel;

/// cursor-tools MCP - exposes the cursor-tools CLI as MCP tools and an HTTP/JSON API
///
/// Command layout:
///   cursor-tools-mcp [serve] [--transport stdio|http] [--bind ADDR]
///   cursor-tools-mcp list [--json]
///   cursor-tools-mcp exec <operation> [--param k=v ...] [--param-file FILE] [--json]
///
/// Running without a subcommand serves MCP over stdio, which is what an MCP
/// client expects when it launches the binary.
///
/// Global flags / env:
///   -v / -vv          Increase verbosity (DEBUG=true forces at least -v)
///   -q / --quiet      Errors only
///   --program PATH    External program (or CURSOR_TOOLS_PATH, default cursor-tools)
///   --workspace DIR   Initial working directory (or CURSOR_TOOLS_WORKSPACE)
///   RUST_LOG          Overrides the derived log filter
///
/// Examples:
///   cursor-tools-mcp serve --transport http --bind 127.0.0.1:3000
///   cursor-tools-mcp exec ask --param query="what is a monad" --param maxTokens=200
///   cursor-tools-mcp exec set_working_directory --param directoryPath=/tmp/project --json
#[derive(Parser, Debug)]
#[command(
    name = "cursor-tools-mcp",
    version,
    author,
    about = "cursor-tools MCP - MCP and HTTP/JSON gateway for the cursor-tools CLI",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// External program to run (falls back to CURSOR_TOOLS_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    program: Option<PathBuf>,

    /// Initial working directory (falls back to CURSOR_TOOLS_WORKSPACE)
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the operations over MCP (stdio) or HTTP/JSON
    Serve(ServeArgs),

    /// List the operation catalog
    List(ListArgs),

    /// Execute (invoke) one operation
    Exec(ExecArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug_env = std::env::var("DEBUG").ok();
    let level: LogLevel = utils::derive_level(cli.verbose, cli.quiet, debug_env.as_deref());
    utils::init_logging(level);

    let config = GatewayConfig::resolve(cli.program, cli.workspace)?;

    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd::execute_serve(args, &config),
        Commands::List(args) => cmd::execute_list(args),
        Commands::Exec(args) => cmd::execute_exec(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["cursor-tools-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cursor-tools-mcp",
            "exec",
            "test",
            "--param",
            "message=hi",
            "--program",
            "/opt/ct",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.program, Some(PathBuf::from("/opt/ct")));
        assert!(matches!(cli.command, Some(Commands::Exec(ref a)) if a.operation == "test"));
    }

    #[test]
    fn help_examples_use_catalog_fields() {
        use clap::CommandFactory;
        let help = Cli::command().render_long_help().to_string();
        let catalog = gateway::Catalog::builtin();

        let mut op = None;
        let mut checked = 0;
        let mut words = help.split_whitespace();
        while let Some(word) = words.next() {
            match word {
                "exec" => op = words.next().and_then(|name| catalog.get(name)),
                "cursor-tools-mcp" => op = None,
                "--param" => {
                    let (Some(spec), Some(kv)) = (op, words.next()) else {
                        continue;
                    };
                    let key = kv.split('=').next().unwrap();
                    assert!(
                        spec.field_named(key).is_some(),
                        "{} has no field {key}",
                        spec.name
                    );
                    checked += 1;
                }
                _ => {}
            }
        }
        assert!(checked >= 3);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
