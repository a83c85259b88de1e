//! Command catalog: per-operation argument shapes.
//!
//! Each `CommandSpec` declares the subcommand tokens of the external program
//! and, field by field, how a parameter becomes an argument (positional,
//! `--flag`, or bare `name=value`), whether it is a path resolved against the
//! working directory, and how it is quoted. The encoder and the gateway read
//! this table and nothing else; there is no per-operation logic outside it.

use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use super::error::ValidationError;

/* ---- Field Declarations ---- */

/// Value type accepted for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Bool,
    /// Resolved against the working-directory snapshot before encoding.
    Path,
    /// Text that must parse as an absolute URL.
    Url,
}

impl ValueKind {
    /// JSON-schema type name (also used as the coercion hint for CLI input).
    pub fn json_type(self) -> &'static str {
        match self {
            ValueKind::Text | ValueKind::Path | ValueKind::Url => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "boolean",
        }
    }
}

/// Where a field lands in the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Bare value token, in declaration order after the subcommand tokens.
    Positional,
    /// `--kebab-name=value`, or `--kebab-name` / `--no-kebab-name` for booleans.
    Flag,
    /// `name=value` without dashes (xcode build settings).
    Assignment,
}

/// Quoting policy applied to the rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Quote when the value contains whitespace or shell metacharacters.
    WhenNeeded,
    /// Numeric exemption: never quoted.
    Never,
    /// Always quoted (script payloads).
    Always,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    pub placement: Placement,
    pub required: bool,
    pub quoting: Quoting,
    /// Presence redirects execution to the gateway's own directory.
    pub remote_source: bool,
    /// The resolved value is reported back as the saved-file path.
    pub saves_output: bool,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl FieldSpec {
    fn new(
        name: &'static str,
        kind: ValueKind,
        placement: Placement,
        description: &'static str,
    ) -> Self {
        let quoting = match kind {
            ValueKind::Number => Quoting::Never,
            _ => Quoting::WhenNeeded,
        };
        Self {
            name,
            kind,
            placement,
            required: false,
            quoting,
            remote_source: false,
            saves_output: false,
            aliases: &[],
            description,
        }
    }

    pub fn positional(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Text, Placement::Positional, description)
    }

    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Text, Placement::Flag, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Number, Placement::Flag, description)
    }

    pub fn toggle(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Bool, Placement::Flag, description)
    }

    pub fn path(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Path, Placement::Flag, description)
    }

    pub fn url(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ValueKind::Url, Placement::Flag, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn of_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        if kind == ValueKind::Number {
            self.quoting = Quoting::Never;
        }
        self
    }

    pub fn assignment(mut self) -> Self {
        self.placement = Placement::Assignment;
        self
    }

    pub fn always_quoted(mut self) -> Self {
        self.quoting = Quoting::Always;
        self
    }

    pub fn remote_source(mut self) -> Self {
        self.remote_source = true;
        self
    }

    pub fn saves_output(mut self) -> Self {
        self.saves_output = true;
        self
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Flag name as emitted on the command line (`maxTokens` -> `max-tokens`).
    pub fn flag_name(&self) -> String {
        kebab_case(self.name)
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

/// camelCase / snake_case -> kebab-case.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/* ---- Command Declarations ---- */

/// What the gateway does with a validated parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Spawn the external program.
    External,
    /// Mutate the working-directory store.
    SetWorkingDirectory,
    /// Echo the message back without spawning (connectivity check).
    Echo,
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Tool name on MCP (`browser_act`).
    pub name: &'static str,
    /// Route suffix on HTTP (`browser/act`).
    pub http_path: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
    /// Leading subcommand tokens of the external program.
    pub tokens: &'static [&'static str],
    pub fields: Vec<FieldSpec>,
    pub workspace_dependent: bool,
}

impl CommandSpec {
    fn external(
        name: &'static str,
        http_path: &'static str,
        tokens: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            http_path,
            description,
            kind: CommandKind::External,
            tokens,
            fields: Vec::new(),
            workspace_dependent: false,
        }
    }

    fn internal(name: &'static str, kind: CommandKind, description: &'static str) -> Self {
        Self {
            name,
            http_path: name,
            description,
            kind,
            tokens: &[],
            fields: Vec::new(),
            workspace_dependent: false,
        }
    }

    fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    fn with(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    fn in_workspace(mut self) -> Self {
        self.workspace_dependent = true;
        self
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a raw JSON object into a typed parameter set.
    ///
    /// `null` and empty strings count as absent. Unknown keys are rejected.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<ParameterSet, ValidationError> {
        for key in raw.keys() {
            if !self.fields.iter().any(|f| f.matches(key)) {
                return Err(ValidationError::UnknownParameter(key.clone()));
            }
        }

        let mut values = BTreeMap::new();
        for field in &self.fields {
            let supplied = std::iter::once(field.name)
                .chain(field.aliases.iter().copied())
                .filter_map(|k| raw.get(k))
                .find(|v| !is_absent(v));

            match supplied {
                Some(v) => {
                    values.insert(field.name, coerce_field(field, v)?);
                }
                None if field.required => {
                    return Err(ValidationError::MissingParameter(field.name));
                }
                None => {}
            }
        }
        Ok(ParameterSet { values })
    }

    /// JSON schema advertised to MCP clients and listed over HTTP.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut props = Map::new();
        let mut required = Vec::new();
        for f in &self.fields {
            let prop = if f.kind == ValueKind::Url {
                json!({
                    "type": f.kind.json_type(),
                    "format": "uri",
                    "description": f.description,
                })
            } else {
                json!({
                    "type": f.kind.json_type(),
                    "description": f.description,
                })
            };
            props.insert(f.name.to_string(), prop);
            if f.required {
                required.push(Value::String(f.name.to_string()));
            }
        }
        let mut schema = Map::new();
        schema.insert("type".into(), Value::String("object".into()));
        schema.insert("properties".into(), Value::Object(props));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema
    }
}

fn is_absent(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_field(field: &FieldSpec, v: &Value) -> Result<ParamValue, ValidationError> {
    let invalid = |expected| ValidationError::InvalidType {
        name: field.name,
        expected,
    };
    match field.kind {
        ValueKind::Bool => v.as_bool().map(ParamValue::Bool).ok_or(invalid("boolean")),
        ValueKind::Number => match v {
            Value::Number(n) => Ok(ParamValue::Number(n.clone())),
            Value::String(s) => s
                .trim()
                .parse::<serde_json::Number>()
                .map(ParamValue::Number)
                .map_err(|_| invalid("number")),
            _ => Err(invalid("number")),
        },
        ValueKind::Text | ValueKind::Path => match v {
            Value::String(s) => Ok(ParamValue::Text(s.clone())),
            Value::Number(n) => Ok(ParamValue::Text(n.to_string())),
            _ => Err(invalid("string")),
        },
        ValueKind::Url => {
            let s = v.as_str().ok_or(invalid("string"))?;
            url::Url::parse(s).map_err(|e| ValidationError::InvalidUrl {
                name: field.name,
                reason: e.to_string(),
            })?;
            Ok(ParamValue::Text(s.to_string()))
        }
    }
}

/* ---- Parameter Set ---- */

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Validated, immutable parameters of one invocation, keyed by canonical field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<&'static str, ParamValue>,
}

impl ParameterSet {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/* ---- Catalog ---- */

/// Read-only table of every operation, built once at start-up.
#[derive(Debug, Clone)]
pub struct Catalog {
    commands: Vec<CommandSpec>,
}

impl Catalog {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn by_http_path(&self, path: &str) -> Option<&CommandSpec> {
        let path = path.trim_matches('/');
        self.commands.iter().find(|c| c.http_path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// The cursor-tools command surface.
    pub fn builtin() -> Self {
        Self::new(vec![
            CommandSpec::internal(
                "set_working_directory",
                CommandKind::SetWorkingDirectory,
                "Set the working directory for subsequent context-aware commands",
            )
            .field(
                FieldSpec::text(
                    "directoryPath",
                    "Absolute path, or path relative to the current working directory",
                )
                .required(),
            ),
            CommandSpec::internal(
                "test",
                CommandKind::Echo,
                "Test tool that simply echoes back the input message",
            )
            .field(FieldSpec::text("message", "Test message to echo back").required()),
            CommandSpec::external(
                "ask",
                "ask",
                &["ask"],
                "Ask any model from any provider a direct question",
            )
            .field(FieldSpec::positional("query", "The question to ask").required())
            .with(provider_options())
            .field(FieldSpec::text(
                "reasoningEffort",
                "Reasoning depth (low, medium, high)",
            ))
            .field(save_to()),
            CommandSpec::external(
                "plan",
                "plan",
                &["plan"],
                "Generate a focused implementation plan for the workspace",
            )
            .field(FieldSpec::positional("query", "The implementation task to plan").required())
            .field(FieldSpec::text("fileProvider", "Provider for file identification"))
            .field(FieldSpec::text("thinkingProvider", "Provider for plan generation"))
            .field(FieldSpec::text("fileModel", "Model for file identification"))
            .field(FieldSpec::text("thinkingModel", "Model for plan generation"))
            .field(FieldSpec::number("maxTokens", "Maximum tokens for response"))
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "web",
                "web",
                &["web"],
                "Get answers from the web using search-capable providers",
            )
            .field(FieldSpec::positional("query", "The search query").required())
            .with(provider_options())
            .field(FieldSpec::number(
                "maxSearchResults",
                "Maximum search results to consider",
            ))
            .field(save_to()),
            CommandSpec::external(
                "repo",
                "repo",
                &["repo"],
                "Get context-aware answers about the repository",
            )
            .field(FieldSpec::positional("query", "The repository query").required())
            .field(FieldSpec::path("subdir", "Subdirectory to analyze"))
            .field(from_github())
            .with(provider_options())
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "doc",
                "doc",
                &["doc"],
                "Generate comprehensive documentation for the repository",
            )
            .field(FieldSpec::positional("query", "Optional focus for the documentation"))
            .field(FieldSpec::text("hint", "Hint for documentation focus"))
            .field(from_github())
            .with(provider_options())
            .field(save_to().required().aliases(&["output"]))
            .in_workspace(),
            CommandSpec::external(
                "youtube",
                "youtube",
                &["youtube"],
                "Analyze a YouTube video and generate a report",
            )
            .field(
                FieldSpec::positional("url", "YouTube video URL")
                    .of_kind(ValueKind::Url)
                    .required(),
            )
            .field(FieldSpec::positional("query", "Optional question about the video"))
            .field(FieldSpec::text(
                "type",
                "Report type (summary, transcript, plan, review, custom)",
            ))
            .field(save_to()),
            CommandSpec::external(
                "github_pr",
                "github/pr",
                &["github", "pr"],
                "Get the last pull requests or a specific one by number",
            )
            .field(FieldSpec::positional("number", "Pull request number").of_kind(ValueKind::Number))
            .field(from_github())
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "github_issue",
                "github/issue",
                &["github", "issue"],
                "Get the last issues or a specific one by number",
            )
            .field(FieldSpec::positional("number", "Issue number").of_kind(ValueKind::Number))
            .field(from_github())
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "clickup_task",
                "clickup/task",
                &["clickup", "task"],
                "Get detailed information about a ClickUp task",
            )
            .field(FieldSpec::positional("taskId", "ClickUp task id").required())
            .field(save_to()),
            CommandSpec::external(
                "mcp_search",
                "mcp/search",
                &["mcp", "search"],
                "Search the MCP marketplace for available servers",
            )
            .field(FieldSpec::positional("query", "Search query").required())
            .field(FieldSpec::text("provider", "AI provider to use"))
            .field(save_to()),
            CommandSpec::external(
                "mcp_run",
                "mcp/run",
                &["mcp", "run"],
                "Execute MCP server tools using natural language",
            )
            .field(FieldSpec::positional("query", "Natural language request").required())
            .field(FieldSpec::text("provider", "AI provider to use"))
            .field(save_to()),
            CommandSpec::external(
                "browser_open",
                "browser/open",
                &["browser", "open"],
                "Open a URL and capture page content, logs, and network activity",
            )
            .field(
                FieldSpec::positional("url", "URL to open")
                    .of_kind(ValueKind::Url)
                    .required(),
            )
            .with(browser_options()),
            browser(
                "browser_act",
                "browser/act",
                &["browser", "act"],
                "Execute actions on a webpage using natural language instructions",
            ),
            browser(
                "browser_observe",
                "browser/observe",
                &["browser", "observe"],
                "Observe interactive elements on a webpage and suggest actions",
            ),
            browser(
                "browser_extract",
                "browser/extract",
                &["browser", "extract"],
                "Extract data from a webpage using natural language instructions",
            ),
            CommandSpec::external(
                "xcode_build",
                "xcode/build",
                &["xcode", "build"],
                "Build the Xcode project and report errors",
            )
            .field(FieldSpec::path("buildPath", "Custom build directory").assignment())
            .field(FieldSpec::text("destination", "Build destination").assignment())
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "xcode_run",
                "xcode/run",
                &["xcode", "run"],
                "Build and run the Xcode project on a simulator",
            )
            .field(FieldSpec::text("destination", "Run destination").assignment())
            .field(save_to())
            .in_workspace(),
            CommandSpec::external(
                "xcode_lint",
                "xcode/lint",
                &["xcode", "lint"],
                "Run static analysis on the Xcode project",
            )
            .field(save_to())
            .in_workspace(),
        ])
    }
}

fn browser(
    name: &'static str,
    http_path: &'static str,
    tokens: &'static [&'static str],
    description: &'static str,
) -> CommandSpec {
    CommandSpec::external(name, http_path, tokens, description)
        .field(FieldSpec::positional("instruction", "Natural language instruction").required())
        .field(FieldSpec::url("url", "URL to navigate to").required())
        .with(browser_options())
}

fn provider_options() -> [FieldSpec; 3] {
    [
        FieldSpec::text("provider", "AI provider to use"),
        FieldSpec::text("model", "Model to use"),
        FieldSpec::number("maxTokens", "Maximum tokens for response"),
    ]
}

fn save_to() -> FieldSpec {
    FieldSpec::path("save_to", "Path to save output").saves_output()
}

fn from_github() -> FieldSpec {
    FieldSpec::text("from_github", "GitHub username/repo[@branch]").remote_source()
}

fn browser_options() -> Vec<FieldSpec> {
    vec![
        FieldSpec::toggle("html", "Capture page HTML content"),
        FieldSpec::toggle("console", "Capture browser console logs"),
        FieldSpec::toggle("network", "Capture network activity"),
        FieldSpec::path("screenshot", "Path to save a screenshot"),
        FieldSpec::number("timeout", "Navigation timeout in ms"),
        FieldSpec::text("viewport", "Viewport size, e.g. 1280x720"),
        FieldSpec::toggle("headless", "Run browser in headless mode"),
        FieldSpec::text("connectTo", "Connect to an existing Chrome instance"),
        FieldSpec::text("wait", "Wait condition after page load"),
        FieldSpec::path("video", "Directory to save a video recording"),
        FieldSpec::text("evaluate", "JavaScript code to execute").always_quoted(),
        save_to(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn kebab_case_forms() {
        assert_eq!(kebab_case("maxTokens"), "max-tokens");
        assert_eq!(kebab_case("save_to"), "save-to");
        assert_eq!(kebab_case("query"), "query");
        assert_eq!(kebab_case("maxSearchResults"), "max-search-results");
    }

    #[test]
    fn flag_names_unique_per_command() {
        let catalog = Catalog::builtin();
        for cmd in catalog.iter() {
            let mut seen = HashSet::new();
            for f in &cmd.fields {
                assert!(
                    seen.insert(f.flag_name()),
                    "{}: duplicate flag {}",
                    cmd.name,
                    f.flag_name()
                );
            }
        }
    }

    #[test]
    fn names_and_paths_unique() {
        let catalog = Catalog::builtin();
        let names: HashSet<_> = catalog.iter().map(|c| c.name).collect();
        let paths: HashSet<_> = catalog.iter().map(|c| c.http_path).collect();
        assert_eq!(names.len(), catalog.len());
        assert_eq!(paths.len(), catalog.len());
    }

    #[test]
    fn booleans_are_never_positional() {
        for cmd in Catalog::builtin().iter() {
            for f in &cmd.fields {
                if f.kind == ValueKind::Bool {
                    assert_eq!(f.placement, Placement::Flag, "{}.{}", cmd.name, f.name);
                }
            }
        }
    }

    #[test]
    fn lookup_by_http_path() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.by_http_path("browser/act").map(|c| c.name),
            Some("browser_act")
        );
        assert_eq!(
            catalog.by_http_path("/xcode/build/").map(|c| c.name),
            Some("xcode_build")
        );
        assert!(catalog.by_http_path("nope").is_none());
    }

    #[test]
    fn validate_rejects_missing_required() {
        let catalog = Catalog::builtin();
        let ask = catalog.get("ask").unwrap();
        let err = ask.validate(&obj(json!({"model": "m1"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingParameter("query"));
    }

    #[test]
    fn validate_treats_empty_and_null_as_absent() {
        let catalog = Catalog::builtin();
        let ask = catalog.get("ask").unwrap();
        let params = ask
            .validate(&obj(json!({"query": "q", "model": "", "provider": null})))
            .unwrap();
        assert!(!params.contains("model"));
        assert!(!params.contains("provider"));
        assert_eq!(params.text("query"), Some("q"));
    }

    #[test]
    fn validate_rejects_unknown_and_mistyped() {
        let catalog = Catalog::builtin();
        let ask = catalog.get("ask").unwrap();
        assert_eq!(
            ask.validate(&obj(json!({"query": "q", "bogus": 1}))).unwrap_err(),
            ValidationError::UnknownParameter("bogus".into())
        );
        assert!(matches!(
            ask.validate(&obj(json!({"query": "q", "maxTokens": "lots"}))),
            Err(ValidationError::InvalidType { name: "maxTokens", .. })
        ));
        let open = catalog.get("browser_open").unwrap();
        assert!(matches!(
            open.validate(&obj(json!({"url": "https://x.test", "html": "yes"}))),
            Err(ValidationError::InvalidType { name: "html", .. })
        ));
    }

    #[test]
    fn validate_accepts_numeric_strings() {
        let catalog = Catalog::builtin();
        let ask = catalog.get("ask").unwrap();
        let params = ask
            .validate(&obj(json!({"query": "q", "maxTokens": "100"})))
            .unwrap();
        assert_eq!(
            params.get("maxTokens"),
            Some(&ParamValue::Number(serde_json::Number::from(100)))
        );
    }

    #[test]
    fn validate_checks_urls() {
        let catalog = Catalog::builtin();
        let open = catalog.get("browser_open").unwrap();
        assert!(matches!(
            open.validate(&obj(json!({"url": "not a url"}))),
            Err(ValidationError::InvalidUrl { name: "url", .. })
        ));
        assert!(open.validate(&obj(json!({"url": "https://example.com"}))).is_ok());
    }

    #[test]
    fn doc_output_alias_fills_save_to() {
        let catalog = Catalog::builtin();
        let doc = catalog.get("doc").unwrap();
        assert_eq!(
            doc.validate(&Map::new()).unwrap_err(),
            ValidationError::MissingParameter("save_to")
        );
        let params = doc.validate(&obj(json!({"output": "docs/out.md"}))).unwrap();
        assert_eq!(params.text("save_to"), Some("docs/out.md"));

        let both = doc
            .validate(&obj(json!({"output": "a.md", "save_to": "b.md"})))
            .unwrap();
        assert_eq!(both.text("save_to"), Some("b.md"));
    }

    #[test]
    fn input_schema_lists_required() {
        let catalog = Catalog::builtin();
        let schema = catalog.get("browser_act").unwrap().input_schema();
        assert_eq!(schema.get("type"), Some(&json!("object")));
        assert_eq!(
            schema.get("required"),
            Some(&json!(["instruction", "url"]))
        );
        let props = schema.get("properties").and_then(Value::as_object).unwrap();
        assert_eq!(props["timeout"]["type"], json!("number"));
        assert_eq!(props["headless"]["type"], json!("boolean"));
        assert_eq!(props["url"]["format"], json!("uri"));

        let lint = catalog.get("xcode_lint").unwrap().input_schema();
        assert!(lint.get("required").is_none());
    }
}
