//! Parameter set -> argument vector.
//!
//! Encoding is a pure function of the command spec, the validated parameters
//! and the working-directory snapshot taken when the invocation began. Each
//! token carries two forms: the `literal` value handed to the process (no shell
//! is involved) and the `rendered` shell-quoted form used for logs and display.

use std::fmt;
use std::path::{Path, PathBuf};

use super::catalog::{CommandSpec, FieldSpec, ParamValue, ParameterSet, Placement, Quoting, ValueKind};
use super::workspace::resolve;

/* ---- Argument Tokens ---- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    literal: String,
    rendered: String,
}

impl Arg {
    /// Token with identical literal and rendered forms.
    pub fn bare(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            rendered: token.clone(),
            literal: token,
        }
    }

    fn with_value(prefix: &str, value: &str, quoting: Quoting) -> Self {
        let shown = match quoting {
            Quoting::Never => value.to_string(),
            Quoting::Always => quote(value),
            Quoting::WhenNeeded if needs_quoting(value) => quote(value),
            Quoting::WhenNeeded => value.to_string(),
        };
        Self {
            literal: format!("{prefix}{value}"),
            rendered: format!("{prefix}{shown}"),
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Ordered argument list for one external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector(Vec<Arg>);

impl ArgumentVector {
    pub fn push(&mut self, arg: Arg) {
        self.0.push(arg);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values exactly as passed to the process.
    pub fn literal(&self) -> Vec<&str> {
        self.0.iter().map(Arg::literal).collect()
    }

    /// Shell-quoted display forms.
    pub fn rendered(&self) -> Vec<&str> {
        self.0.iter().map(Arg::rendered).collect()
    }

    /// A copy-pasteable command line for `program`.
    pub fn command_line(&self, program: &Path) -> String {
        let program = program.to_string_lossy();
        shell_words::join(std::iter::once(program.as_ref()).chain(self.0.iter().map(Arg::literal)))
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered().join(" "))
    }
}

/* ---- Quoting ---- */

const SHELL_META: &[char] = &[
    '"', '\'', '\\', '$', '`', '&', '|', ';', '<', '>', '(', ')', '*', '?', '[', ']', '{', '}',
    '#', '~', '!',
];

pub fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.chars().any(|c| c.is_whitespace() || SHELL_META.contains(&c))
}

/// Double-quote `value`, escaping the characters a shell would still interpret.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/* ---- Encoding ---- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCommand {
    pub args: ArgumentVector,
    /// Directory the external process runs in.
    pub execution_dir: PathBuf,
    /// Resolved location of the `save_to` style field, when supplied.
    pub saved_to: Option<PathBuf>,
}

/// Build the argument vector for `spec`.
///
/// Order: subcommand tokens, positionals, then flags and assignments, each in
/// declaration order. Relative paths resolve against `workspace`.
pub fn encode(
    spec: &CommandSpec,
    params: &ParameterSet,
    workspace: &Path,
    own_dir: &Path,
) -> EncodedCommand {
    let mut args = ArgumentVector::default();
    for token in spec.tokens {
        args.push(Arg::bare(*token));
    }

    for (field, value) in spec
        .fields
        .iter()
        .filter(|f| f.placement == Placement::Positional)
        .filter_map(|f| params.get(f.name).map(|v| (f, v)))
    {
        args.push(Arg::with_value("", &literal_value(field, value, workspace), field.quoting));
    }

    for (field, value) in spec
        .fields
        .iter()
        .filter(|f| f.placement != Placement::Positional)
        .filter_map(|f| params.get(f.name).map(|v| (f, v)))
    {
        args.push(option_arg(field, value, workspace));
    }

    let remote = spec
        .fields
        .iter()
        .any(|f| f.remote_source && params.contains(f.name));
    let execution_dir = if spec.workspace_dependent && !remote {
        workspace.to_path_buf()
    } else {
        own_dir.to_path_buf()
    };

    let saved_to = spec
        .fields
        .iter()
        .filter(|f| f.saves_output)
        .find_map(|f| params.text(f.name))
        .map(|p| resolve(workspace, Path::new(p)));

    EncodedCommand {
        args,
        execution_dir,
        saved_to,
    }
}

fn option_arg(field: &FieldSpec, value: &ParamValue, workspace: &Path) -> Arg {
    if let ParamValue::Bool(on) = value {
        let flag = field.flag_name();
        return Arg::bare(if *on {
            format!("--{flag}")
        } else {
            format!("--no-{flag}")
        });
    }
    let prefix = match field.placement {
        Placement::Assignment => format!("{}=", field.name),
        _ => format!("--{}=", field.flag_name()),
    };
    Arg::with_value(&prefix, &literal_value(field, value, workspace), field.quoting)
}

fn literal_value(field: &FieldSpec, value: &ParamValue, workspace: &Path) -> String {
    match value {
        ParamValue::Text(s) if field.kind == ValueKind::Path => {
            resolve(workspace, Path::new(s)).to_string_lossy().into_owned()
        }
        ParamValue::Text(s) => s.clone(),
        ParamValue::Number(n) => n.to_string(),
        ParamValue::Bool(b) => b.to_string(),
    }
}
