//! HTTP rendering of gateway failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::gateway::{DirectoryError, InvocationError};

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    /// External program exited non-zero; both streams are passed through.
    #[error("{message}")]
    Execution {
        message: String,
        stdout: String,
        stderr: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, error, stdout, stderr) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None, None),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None, None),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None, None),
            HttpError::Execution {
                message,
                stdout,
                stderr,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message,
                Some(stdout),
                Some(stderr),
            ),
        };
        let body = ErrorBody {
            success: false,
            error,
            stdout,
            stderr,
        };
        (status, Json(body)).into_response()
    }
}

impl From<InvocationError> for HttpError {
    fn from(err: InvocationError) -> Self {
        let message = err.to_string();
        match err {
            InvocationError::UnknownOperation(_) => HttpError::NotFound(message),
            InvocationError::Validation(_) => HttpError::BadRequest(message),
            InvocationError::Directory(DirectoryError::NotFound(_)) => HttpError::NotFound(message),
            InvocationError::Directory(DirectoryError::NotADirectory(_)) => {
                HttpError::BadRequest(message)
            }
            InvocationError::Directory(DirectoryError::Io { .. }) | InvocationError::Spawn { .. } => {
                HttpError::Internal(message)
            }
            InvocationError::Execution { stdout, stderr, .. } => HttpError::Execution {
                message,
                stdout,
                stderr,
            },
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::BadRequest(format!("Invalid JSON body: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::ValidationError;
    use std::path::PathBuf;

    fn status_of(err: InvocationError) -> StatusCode {
        HttpError::from(err).into_response().status()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_of(InvocationError::UnknownOperation("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ValidationError::MissingParameter("query").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DirectoryError::NotFound(PathBuf::from("/nope")).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DirectoryError::NotADirectory(PathBuf::from("/etc/hosts")).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(InvocationError::Spawn {
                message: "no such file".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(InvocationError::Execution {
                code: Some(1),
                stdout: String::new(),
                stderr: String::new(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
