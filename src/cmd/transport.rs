/*!
Transport selector for `serve`.

Variants:
  stdio (MCP over stdin/stdout, the default an MCP client launches)
  http  (HTTP/JSON API)
*/

use std::fmt;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Transport {
    /// MCP over stdin/stdout
    #[default]
    Stdio,
    /// HTTP/JSON API
    Http,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Transport;

    #[test]
    fn stdio_is_default() {
        assert_eq!(Transport::default(), Transport::Stdio);
        assert_eq!(Transport::Http.to_string(), "http");
    }

    #[test]
    fn value_enum_names() {
        use clap::ValueEnum;
        let names: Vec<_> = Transport::value_variants()
            .iter()
            .filter_map(|t| t.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, ["stdio", "http"]);
    }
}
