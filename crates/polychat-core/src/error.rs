//! Error types for PolyChat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the PolyChat crates.
///
/// Service implementations (knowledge source, translation backend, config
/// loading) return this type. The application layer never lets it reach the
/// end user: every variant is degraded to a default value or a localized
/// message before a turn completes.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PolychatError {
    /// The request to an external service could not be delivered
    /// (connection refused, DNS failure, timeout).
    #[error("{service} request failed: {message}")]
    Transport { service: String, message: String },

    /// The external service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {message}")]
    Http {
        service: String,
        status: u16,
        message: String,
    },

    /// The external service answered with a body we could not interpret.
    #[error("Failed to parse {service} response: {message}")]
    Parse { service: String, message: String },

    /// A language code outside the known set was requested or configured.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PolychatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates an Http error
    pub fn http(service: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            service: service.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a Parse error
    pub fn parse(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from talking to a remote service.
    ///
    /// Returns true for `Transport`, `Http` and `Parse` errors.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Http { .. } | Self::Parse { .. }
        )
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PolychatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PolychatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PolychatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PolychatError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PolychatError>`.
pub type Result<T> = std::result::Result<T, PolychatError>;
