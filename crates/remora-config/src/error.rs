//! Error types for settings operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: String,
        /// Field that failed validation.
        field: String,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A server profile with the same name already exists.
    #[error("duplicate server profile")]
    DuplicateServer {
        /// Name that collided.
        name: String,
    },
    /// No server profile with the given name exists.
    #[error("unknown server profile")]
    UnknownServer {
        /// Name that failed to resolve.
        name: String,
    },
    /// Filesystem access failed.
    #[error("settings file operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Settings payload could not be encoded or decoded.
    #[error("settings serialization failed")]
    Serde {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for settings operation results.
pub type ConfigResult<T> = Result<T, ConfigError>;
