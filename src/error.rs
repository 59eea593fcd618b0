//! Error types raised while configuring a Harbor client.
//!
//! Everything here is produced synchronously by
//! [`ClientConfigBuilder::build`](crate::ClientConfigBuilder::build) or
//! [`HttpClient::new`](crate::HttpClient::new), before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use harbor_api::{ClientConfig, ConfigError};
//!
//! let result = ClientConfig::builder().url("https://harbor.example.com").build();
//! assert!(matches!(result, Err(ConfigError::NoCredentials)));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// None of username/secret, token, or credentials file was usable.
    #[error("No credentials supplied. Provide a username and secret, a basic auth token, or a credentials file.")]
    NoCredentials,

    /// The root URL could not be understood.
    #[error("Invalid Harbor URL '{url}'. Expected a URL with scheme (e.g., 'https://harbor.example.com').")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The credentials file could not be loaded.
    #[error(transparent)]
    CredentialsFile(#[from] CredentialsFileError),

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors raised when reading or writing a credentials file.
///
/// IO and JSON errors are passed through unchanged so callers can inspect
/// the original failure.
#[derive(Debug, Error)]
pub enum CredentialsFileError {
    /// The file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON or does not match the expected layout.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// A required field is absent or empty.
    #[error("Field '{field}' is required")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// The destination exists and overwriting was not requested.
    #[error("File {} already exists", path.display())]
    AlreadyExists {
        /// The destination path.
        path: PathBuf,
    },
}
