//! Shared helpers for CLI subcommands: `--param` parsing, parameter files,
//! and catalog-driven coercion of raw strings into JSON values.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::gateway::CommandSpec;

/* ---- Parameter Parsing ---- */

/// Split repeated `KEY=VALUE` arguments. Later keys win.
pub fn parse_params(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for kv in raw {
        let Some((k, v)) = kv.split_once('=') else {
            bail!("invalid --param (expected KEY=VALUE): {kv}");
        };
        let key = k.trim();
        if key.is_empty() {
            bail!("invalid --param (empty key): {kv}");
        }
        out.insert(key.to_string(), v.trim().to_string());
    }
    Ok(out)
}

/// Load a JSON or YAML object from `path` (YAML when the extension says so).
pub fn load_param_file(path: &Path) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read param file: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        let yaml_v: serde_yaml::Value =
            serde_yaml::from_str(&raw).context("failed to parse YAML param file")?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON param file")?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("param file root must be an object"),
    }
}

/// Merge file values with `--param` values (CLI wins), coercing the CLI
/// strings with the field kinds declared for `spec`.
pub fn build_arguments(
    spec: &CommandSpec,
    file: Map<String, Value>,
    cli: &BTreeMap<String, String>,
) -> Map<String, Value> {
    let mut args = file;
    for (k, v) in cli {
        let hint = spec
            .field_named(k)
            .map(|f| f.kind.json_type())
            .unwrap_or("string");
        args.insert(k.clone(), coerce_value(v, hint));
    }
    args
}

/// Attempt to coerce a raw string into a JSON value using a primitive type hint.
/// Unparseable input stays a string so validation can report it by name.
pub fn coerce_value(raw: &str, type_hint: &str) -> Value {
    match type_hint {
        "number" => raw
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .ok()
            .or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
            })
            .unwrap_or_else(|| Value::String(raw.to_string())),
        "boolean" => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Value::Bool(true),
            "false" | "0" | "no" | "n" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Catalog;
    use serde_json::json;

    #[test]
    fn coerce_number() {
        assert_eq!(coerce_value("42", "number"), json!(42));
        assert_eq!(coerce_value("1.5", "number"), json!(1.5));
        assert_eq!(coerce_value("x42", "number"), json!("x42"));
    }

    #[test]
    fn coerce_boolean() {
        assert_eq!(coerce_value("true", "boolean"), json!(true));
        assert_eq!(coerce_value("No", "boolean"), json!(false));
        assert_eq!(coerce_value("maybe", "boolean"), json!("maybe"));
    }

    #[test]
    fn parse_params_rejects_malformed() {
        let ok = parse_params(&["query=hello world".into(), "maxTokens = 10".into()]).unwrap();
        assert_eq!(ok.get("query").map(String::as_str), Some("hello world"));
        assert_eq!(ok.get("maxTokens").map(String::as_str), Some("10"));

        assert!(parse_params(&["novalue".into()]).is_err());
        assert!(parse_params(&["=x".into()]).is_err());
    }

    #[test]
    fn build_arguments_uses_field_kinds() {
        let catalog = Catalog::builtin();
        let spec = catalog.get("browser_open").unwrap();
        let cli = parse_params(&[
            "url=https://example.com".into(),
            "headless=no".into(),
            "timeout=3000".into(),
            "viewport=1280x720".into(),
        ])
        .unwrap();
        let file = json!({"console": true, "timeout": 10}).as_object().cloned().unwrap();
        let args = build_arguments(spec, file, &cli);
        assert_eq!(args["headless"], json!(false));
        assert_eq!(args["timeout"], json!(3000));
        assert_eq!(args["console"], json!(true));
        assert_eq!(args["viewport"], json!("1280x720"));
    }

    #[test]
    fn param_file_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("p.json");
        std::fs::write(&json_path, r#"{ "query": "q", "maxTokens": 5 }"#).unwrap();
        let m = load_param_file(&json_path).unwrap();
        assert_eq!(m["maxTokens"], json!(5));

        let yaml_path = dir.path().join("p.YML");
        std::fs::write(&yaml_path, "query: from yaml\nhtml: true\n").unwrap();
        let m = load_param_file(&yaml_path).unwrap();
        assert_eq!(m["query"], json!("from yaml"));
        assert_eq!(m["html"], json!(true));

        let list_path = dir.path().join("bad.json");
        std::fs::write(&list_path, "[1,2]").unwrap();
        assert!(load_param_file(&list_path).is_err());
    }
}
