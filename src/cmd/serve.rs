/*!
`serve.rs`

Runs one transport in front of the gateway:

  cursor-tools-mcp serve                       MCP over stdio
  cursor-tools-mcp serve --transport http      HTTP/JSON on CURSOR_TOOLS_HTTP_BIND
  cursor-tools-mcp serve --transport http --bind 0.0.0.0:8080

Both transports share one `Gateway`, so they see the same catalog and the
same working-directory store.
*/

use anyhow::{Context, Result};
use clap::Args;
use std::net::SocketAddr;
use tracing::debug;

use super::transport::Transport;
use crate::config::{GatewayConfig, resolve_bind};
use crate::{http, mcp};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Transport to serve (stdio|http)
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Bind address for the HTTP transport (falls back to CURSOR_TOOLS_HTTP_BIND)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,
}

pub fn execute_serve(args: ServeArgs, config: &GatewayConfig) -> Result<()> {
    let gateway = config.build_gateway()?;
    debug!(?config, transport = %args.transport, "starting");

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(async {
        match args.transport {
            Transport::Stdio => mcp::serve_stdio(gateway).await,
            Transport::Http => {
                let addr = resolve_bind(args.bind, |k| std::env::var(k).ok())?;
                http::serve_http(gateway, addr).await
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Serve(ServeArgs),
    }

    #[test]
    fn clap_parses_http_transport() {
        let cli =
            TestCli::try_parse_from(["t", "serve", "--transport", "http", "--bind", "0.0.0.0:9"])
                .unwrap();
        let TestSub::Serve(a) = cli.cmd;
        assert_eq!(a.transport, Transport::Http);
        assert_eq!(a.bind, Some("0.0.0.0:9".parse().unwrap()));
    }

    #[test]
    fn stdio_is_default() {
        let cli = TestCli::try_parse_from(["t", "serve"]).unwrap();
        let TestSub::Serve(a) = cli.cmd;
        assert_eq!(a.transport, Transport::Stdio);
        assert!(a.bind.is_none());
    }
}
