// src/errors.rs

//! Crate-wide error type and result alias.

use std::fmt;

use thiserror::Error;

/// Operations of the list contract that the backend does not support.
///
/// Calling any of them fails immediately with
/// [`AmplifyError::NotImplemented`] and never touches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetMany,
    GetManyReference,
    Update,
    UpdateMany,
    Delete,
    DeleteMany,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetMany => "get_many",
            Operation::GetManyReference => "get_many_reference",
            Operation::Update => "update",
            Operation::UpdateMany => "update_many",
            Operation::Delete => "delete",
            Operation::DeleteMany => "delete_many",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind reported for errors the client synthesizes on behalf of the API.
pub const API_ERROR_KIND: &str = "API Error";

/// Status code carried by [`AmplifyError::NotImplemented`].
pub const NOT_IMPLEMENTED_STATUS: u16 = 500;

#[derive(Error, Debug)]
pub enum AmplifyError {
    /// Network failure, non-2xx status or an undecodable body.
    ///
    /// `status` is `None` when no response was received at all.
    #[error("HTTP error{}: {message}", .status.map(|s| format!(" {s}")).unwrap_or_default())]
    Http { status: Option<u16>, message: String },

    #[error("API Error: {operation} not implemented")]
    NotImplemented { operation: Operation },

    #[error("Cycle detected in graph: {0}")]
    CycleDetected(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AmplifyError {
    /// Build the error returned for a response body that could not be decoded.
    pub fn malformed(status: Option<u16>, err: impl fmt::Display) -> Self {
        AmplifyError::Http {
            status,
            message: format!("malformed response body: {err}"),
        }
    }

    /// HTTP-style status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AmplifyError::Http { status, .. } => *status,
            AmplifyError::NotImplemented { .. } => Some(NOT_IMPLEMENTED_STATUS),
            _ => None,
        }
    }

    /// Short classification used when presenting the error.
    pub fn kind(&self) -> &'static str {
        match self {
            AmplifyError::Http { .. } | AmplifyError::NotImplemented { .. } => API_ERROR_KIND,
            AmplifyError::CycleDetected(_) => "Graph Error",
            AmplifyError::ConfigError(_) | AmplifyError::TomlError(_) => "Config Error",
            AmplifyError::IoError(_) | AmplifyError::JsonError(_) | AmplifyError::Other(_) => {
                "Internal Error"
            }
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, AmplifyError::NotImplemented { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AmplifyError>;
