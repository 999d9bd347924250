// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard workspace.
//!
//! Fragment parsing and classification never fail; these variants cover the
//! outer surfaces (configuration, transcript decoding, file I/O).

use thiserror::Error;

/// The primary error type used across Switchboard crates.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// Configuration errors that were not reported as rich diagnostics.
    #[error("configuration error: {0}")]
    Config(String),

    /// A payload or transcript line could not be decoded.
    #[error("payload error: {message}")]
    Payload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwitchboardError {
    /// Wraps a JSON decoding failure with a short description of what was being decoded.
    pub fn payload(message: impl Into<String>, source: serde_json::Error) -> Self {
        SwitchboardError::Payload {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
