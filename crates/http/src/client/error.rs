//! Client error types

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Client error types
///
/// Server rejections display as the bare server message so callers can show
/// `error.to_string()` to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the credential (HTTP 401)
    #[error("{message}")]
    Unauthorized { message: String },

    /// Any other 4xx response
    #[error("{message}")]
    Client { status: u16, message: String },

    /// 5xx or any other unsuccessful status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Network or request error
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Input rejected before anything was sent
    #[error("{0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local state could not be read or written
    #[error(transparent)]
    Storage(#[from] saleorder_core::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Build the error for an unsuccessful response
    ///
    /// The message comes from the body's `error` field, then `message`, then
    /// falls back to `Request failed (<status>)`.
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let code = status.as_u16();
        let message = server_message(body).unwrap_or_else(|| format!("Request failed ({code})"));

        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized { message }
        } else if status.is_client_error() {
            Self::Client {
                status: code,
                message,
            }
        } else {
            Self::Server {
                status: code,
                message,
            }
        }
    }

    /// Whether the server rejected the stored credential
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status of a server rejection
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn server_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .into_iter()
        .filter_map(|field| body.get(field).and_then(Value::as_str))
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
