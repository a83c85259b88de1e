//! Utilities: logging setup (tracing to stderr) and verbosity derivation.
//!
//! Key items:
//!   derive_level  (-q / -v / -vv / DEBUG=true -> LogLevel)
//!   init_logging  (installs the global tracing subscriber)
//!
//! stdout carries the MCP stdio channel, so nothing here ever writes to it.

/// Logging helpers.
pub mod logging {
    use tracing_subscriber::EnvFilter;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Info = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "error",
                LogLevel::Info => "info",
                LogLevel::Debug => "debug",
                LogLevel::Trace => "trace",
            }
        }
    }

    /// `debug_env` is the value of `DEBUG`; `true`/`1` forces at least debug.
    pub fn derive_level(verbose: u8, quiet: bool, debug_env: Option<&str>) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        let level = match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        let forced = debug_env
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);
        if forced {
            level.max(LogLevel::Debug)
        } else {
            level
        }
    }

    /// Directive used when `RUST_LOG` is unset: our crate at `level`, dependencies at warn.
    pub fn default_directive(level: LogLevel) -> String {
        let ours = env!("CARGO_CRATE_NAME");
        match level {
            LogLevel::Error => "error".to_string(),
            _ => format!("warn,{ours}={},tower_http={}", level.as_str(), level.as_str()),
        }
    }

    /// Install the global subscriber. `RUST_LOG` overrides the derived level.
    pub fn init_logging(level: LogLevel) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
        // try_init: a second call (tests) keeps the first subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(level >= LogLevel::Debug)
            .try_init();
    }
}

pub use logging::{LogLevel, derive_level, init_logging};
