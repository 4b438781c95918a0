//! Scanner error types.
//!
//! One enum per boundary: transport (`ApiError`), storage (`StoreError`),
//! decoder (`DecoderError`) and the engine's own API (`ScannerError`).

use thiserror::Error;

use super::config::ConfigError;

/// Errors from the check-in REST client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// No response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

/// Errors from a counter store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage is disabled")]
    Disabled,
}

/// Camera or decoder fault. Halts scanning, never touches counters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecoderError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera error: {0}")]
    Device(String),
}

impl DecoderError {
    /// Operator-facing message.
    pub fn operator_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Camera access was denied. Grant permission and restart the scanner.".to_string()
            }
            Self::Device(reason) => format!("Camera unavailable: {}", reason),
        }
    }
}

/// Errors returned by the scanner engine API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScannerError {
    #[error("token is empty")]
    EmptyToken,

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("ticket lookup failed: {0}")]
    Lookup(#[from] ApiError),

    #[error("scanner session has been shut down")]
    TornDown,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
