//! Resolution of the authorization token used for every request.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::auth::credentials_file::load_credentials_file;
use crate::error::ConfigError;

/// The resolved authorization token for a client.
///
/// Credentials are immutable once a client is built. The `Debug`
/// implementation masks the token so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use harbor_api::Credentials;
///
/// let credentials = Credentials::from_username_secret("username", "secret");
/// assert_eq!(credentials.token(), "dXNlcm5hbWU6c2VjcmV0");
/// assert_eq!(credentials.header_value(), "Basic dXNlcm5hbWU6c2VjcmV0");
/// assert_eq!(format!("{credentials:?}"), "Credentials::Basic(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A base64-encoded `username:secret` pair, sent as `Basic <token>`.
    Basic(String),
    /// An opaque token, sent as `Bearer <token>`.
    Bearer(String),
}

impl Credentials {
    /// Encodes a username and secret as Basic auth credentials.
    #[must_use]
    pub fn from_username_secret(username: &str, secret: &str) -> Self {
        Self::Basic(STANDARD.encode(format!("{username}:{secret}")))
    }

    /// Uses a pre-encoded Basic auth token verbatim.
    #[must_use]
    pub fn basic(token: impl Into<String>) -> Self {
        Self::Basic(token.into())
    }

    /// Uses a bearer token verbatim.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Returns the raw token without the scheme prefix.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Basic(token) | Self::Bearer(token) => token,
        }
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(token) => format!("Basic {token}"),
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }

    /// Picks exactly one credential source.
    ///
    /// Precedence: a non-empty username and secret, then a non-empty
    /// explicit token, then the credentials file. The file is only read when
    /// the other sources are absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCredentials`] when no source is usable, or
    /// [`ConfigError::CredentialsFile`] when the credentials file cannot be
    /// loaded.
    pub fn resolve(
        username: Option<&str>,
        secret: Option<&str>,
        token: Option<&Self>,
        credentials_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let (Some(username), Some(secret)) = (username, secret) {
            if !username.is_empty() && !secret.is_empty() {
                return Ok(Self::from_username_secret(username, secret));
            }
        }

        if let Some(token) = token.filter(|t| !t.token().is_empty()) {
            return Ok(token.clone());
        }

        if let Some(path) = credentials_file {
            let file = load_credentials_file(path)?;
            return Ok(Self::from_username_secret(&file.name, &file.secret));
        }

        Err(ConfigError::NoCredentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("Credentials::Basic(*****)"),
            Self::Bearer(_) => f.write_str("Credentials::Bearer(*****)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_secret_is_base64_encoded() {
        let credentials = Credentials::from_username_secret("username", "secret");
        assert_eq!(credentials, Credentials::basic("dXNlcm5hbWU6c2VjcmV0"));
    }

    #[test]
    fn test_username_secret_takes_precedence_over_token() {
        let token = Credentials::basic("explicit-token");
        let credentials =
            Credentials::resolve(Some("user"), Some("secret"), Some(&token), None).unwrap();
        assert_eq!(credentials, Credentials::from_username_secret("user", "secret"));
    }

    #[test]
    fn test_username_secret_takes_precedence_over_missing_file() {
        let path = Path::new("/nonexistent/credentials.json");
        let credentials =
            Credentials::resolve(Some("user"), Some("secret"), None, Some(path)).unwrap();
        assert_eq!(credentials, Credentials::from_username_secret("user", "secret"));
    }

    #[test]
    fn test_empty_username_falls_back_to_token() {
        let token = Credentials::basic("explicit-token");
        let credentials = Credentials::resolve(Some(""), Some(""), Some(&token), None).unwrap();
        assert_eq!(credentials, token);
    }

    #[test]
    fn test_username_without_secret_is_not_usable() {
        let result = Credentials::resolve(Some("user"), None, None, None);
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn test_empty_token_is_not_usable() {
        let token = Credentials::basic("");
        let result = Credentials::resolve(None, None, Some(&token), None);
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn test_no_sources_fails() {
        let result = Credentials::resolve(None, None, None, None);
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn test_header_values() {
        assert_eq!(Credentials::basic("abc").header_value(), "Basic abc");
        assert_eq!(Credentials::bearer("abc").header_value(), "Bearer abc");
    }

    #[test]
    fn test_debug_masks_token() {
        let debug = format!("{:?}", Credentials::bearer("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "Credentials::Bearer(*****)");
    }
}
