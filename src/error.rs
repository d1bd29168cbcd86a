//! Error types for the db_query client.
//!
//! Failures are carried to the caller as they happened: transport errors keep
//! the original `reqwest::Error`, and non-success responses keep their status
//! and body untouched.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for client operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or protocol failures (connection refused, reset, invalid response).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code returned by the backend.
        status: StatusCode,
        /// Raw response body, unmodified.
        body: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration errors (invalid config file, malformed base URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the HTTP status if the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Parses the backend's error envelope out of a failed response body.
    ///
    /// Returns `None` for non-status errors or bodies that are not an envelope.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Status { .. } => "API Error",
            Self::Decode(_) => "Decode Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Error envelope returned by the backend on 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: serde_json::Value,

    /// Optional machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Optional structured payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Returns `detail` as text; validation errors carry a list instead of a string.
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;
