//! Error taxonomy for the invocation gateway.
//!
//! Every expected failure is a value: the transports receive a
//! `Result<InvocationSuccess, InvocationError>` and render it, nothing is
//! raised across the gateway boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Parameter set rejected at the boundary, before encoding or spawning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid value for parameter {name}: expected {expected}")]
    InvalidType {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Invalid URL for parameter {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
}

/// Working-directory transition refused; the stored value is left untouched.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to set working directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure outcome of a single invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The external program could not be started at all.
    #[error("Failed to start subprocess: {message}")]
    Spawn { message: String },

    /// The external program ran and exited unsuccessfully.
    #[error("{}", execution_summary(.code))]
    Execution {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn execution_summary(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("Command failed with code {c}"),
        None => "Command terminated by signal".to_string(),
    }
}
