//! Unified error type hierarchy for ScanMatch
//!
//! Provides structured error handling with ValidationError, TransportError,
//! FetchError, ConfigError and AudioError. None of these is fatal: each
//! component catches at its own boundary and degrades locally.

use std::io;
use thiserror::Error;

/// Generic notification text used when the backend gave no usable detail.
pub const GENERIC_TRANSPORT_MESSAGE: &str = "Verification request failed. Please try again.";

/// Which barcode input a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeField {
    First,
    Second,
    Both,
}

/// Operator input rejected before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing barcode input: {0:?}")]
    MissingField(BarcodeField),
}

impl ValidationError {
    /// Message shown in the notification stack
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField(BarcodeField::First) => {
                "Please scan the first barcode.".to_string()
            }
            ValidationError::MissingField(BarcodeField::Second) => {
                "Please scan the second barcode.".to_string()
            }
            ValidationError::MissingField(BarcodeField::Both) => {
                "Please scan both barcodes.".to_string()
            }
        }
    }
}

/// Network-level failure or non-2xx status from the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },
}

impl TransportError {
    /// Server-provided detail when present, otherwise the generic message
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Status {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_TRANSPORT_MESSAGE.to_string(),
        }
    }
}

/// A refresh call failed. Never surfaced as a notification; the affected
/// display degrades to its safe state and the error is logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Fetch transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed payload from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Configuration file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Audio cue playback failure. Always swallowed by the feedback channel.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio player '{player}' could not be started: {reason}")]
    PlayerUnavailable { player: String, reason: String },

    #[error("Sound file not found: {0}")]
    SoundMissing(String),
}

/// Top-level result type for bootstrap operations that may fail.
/// Example: `fn risky_operation() -> Result<String>`
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
