/*!
`list.rs`

Implements the `list` subcommand: prints the operation catalog without
spawning anything.

JSON Output Shape:
{
  "status": "ok",
  "count": 20,
  "tools": [
    { "name": "ask", "path": "/mcp/tools/ask", "workspace": false,
      "description": "...", "inputSchema": { ... } }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::{Value, json};

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, table, truncate_ellipsis};
use crate::gateway::{Catalog, CommandSpec};

/// CLI arguments for `cursor-tools-mcp list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
    let catalog = Catalog::builtin();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog_json(&catalog))?);
    } else {
        println!("{}", render_catalog(&catalog, &StyleOptions::detect()));
    }
    Ok(())
}

fn catalog_json(catalog: &Catalog) -> Value {
    let tools: Vec<Value> = catalog
        .iter()
        .map(|spec| {
            json!({
                "name": spec.name,
                "path": format!("/mcp/tools/{}", spec.http_path),
                "workspace": spec.workspace_dependent,
                "description": spec.description,
                "inputSchema": spec.input_schema(),
            })
        })
        .collect();
    json!({
        "status": "ok",
        "count": tools.len(),
        "tools": tools,
    })
}

/// Parameter summary: required names first, optional ones bracketed.
fn param_summary(spec: &CommandSpec) -> String {
    if spec.fields.is_empty() {
        return "-".to_string();
    }
    let (req, opt): (Vec<_>, Vec<_>) = spec.fields.iter().partition(|f| f.required);
    req.iter()
        .map(|f| f.name.to_string())
        .chain(opt.iter().map(|f| format!("[{}]", f.name)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_catalog(catalog: &Catalog, style: &StyleOptions) -> String {
    let header = box_header(
        format!("{} Operations ({})", emoji("list", style), catalog.len()),
        Some("POST /mcp/tools/<path> or MCP tools/call <name>"),
        style,
    );

    let rows: Vec<Vec<String>> = catalog
        .iter()
        .map(|spec| {
            vec![
                spec.name.to_string(),
                spec.http_path.to_string(),
                (if spec.workspace_dependent { "yes" } else { "" }).to_string(),
                truncate_ellipsis(&param_summary(spec), 48),
                spec.description.to_string(),
            ]
        })
        .collect();
    let tbl = table(&["NAME", "PATH", "WS", "PARAMS", "DESCRIPTION"], &rows, style);

    format!(
        "{header}\n{tbl}\n\n{} {}",
        emoji("info", style),
        color(
            Role::Dim,
            "WS = runs in the working directory (see set_working_directory)",
            style
        )
    )
}
