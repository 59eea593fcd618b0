//! Configuration types for the Harbor API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The resolved settings a client is built from
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: The normalized versioned API root
//! - [`ApiVersion`]: The Harbor API version to use
//! - [`RetryPolicy`]: The bounded retry policy for connection failures
//!
//! # Example
//!
//! ```rust
//! use harbor_api::{ApiVersion, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .url("https://harbor.example.com")
//!     .username("admin")
//!     .secret("Harbor12345")
//!     .version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://harbor.example.com/api/v2.0");
//! ```

mod newtypes;
mod retry;
mod version;

use std::path::PathBuf;
use std::time::Duration;

pub use newtypes::BaseUrl;
pub use retry::RetryPolicy;
pub use version::ApiVersion;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for a Harbor API client.
///
/// Built once through [`ClientConfigBuilder`] and immutable afterwards.
/// Credentials are already resolved, so building a client from a config
/// never touches the filesystem.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    api_version: ApiVersion,
    credentials: Credentials,
    retry: RetryPolicy,
    max_pages: Option<usize>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the normalized API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the resolved credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the retry policy for connection failures.
    #[must_use]
    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the maximum number of pages to collect, if capped.
    #[must_use]
    pub const fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the connection establishment timeout, if configured.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `url` is required, as is one credential source.
///
/// # Defaults
///
/// - `version`: [`ApiVersion::latest`]
/// - `retry`: [`RetryPolicy::default`] (5 attempts)
/// - `max_pages`: `None` (follow every continuation link)
/// - `timeout`: `None`
/// - `connect_timeout`: `None`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use harbor_api::{ClientConfig, RetryPolicy};
///
/// let config = ClientConfig::builder()
///     .url("http://localhost:8080/api/")
///     .basic_token("YWRtaW46SGFyYm9yMTIzNDU=")
///     .retry(RetryPolicy::no_retry())
///     .max_pages(10)
///     .timeout(Duration::from_secs(30))
///     .user_agent_prefix("registry-sync/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_pages(), Some(10));
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    url: Option<String>,
    version: Option<ApiVersion>,
    username: Option<String>,
    secret: Option<String>,
    token: Option<Credentials>,
    credentials_file: Option<PathBuf>,
    retry: Option<RetryPolicy>,
    max_pages: Option<usize>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Harbor root URL (required).
    ///
    /// The URL may omit the `/api` and version segments.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the username for Basic auth.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the secret for Basic auth.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets a pre-encoded Basic auth token, used verbatim.
    #[must_use]
    pub fn basic_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Credentials::basic(token));
        self
    }

    /// Sets a bearer token, used verbatim.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Credentials::bearer(token));
        self
    }

    /// Sets the path of a robot credentials file.
    #[must_use]
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Sets the retry policy for connection failures.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Caps the number of pages collected by a single list call.
    ///
    /// The first page counts toward the cap.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Sets the per-request timeout.
    ///
    /// A request that hits this timeout after being sent is not retried.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout for establishing a connection.
    ///
    /// Hitting it counts as a connection failure and is retried.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], normalizing the URL and resolving
    /// credentials.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `url` is not set
    /// - [`ConfigError::InvalidUrl`] if `url` cannot be parsed
    /// - [`ConfigError::NoCredentials`] if no credential source is usable
    /// - [`ConfigError::CredentialsFile`] if the credentials file is needed
    ///   but cannot be loaded
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let api_version = self.version.unwrap_or_else(ApiVersion::latest);
        let base_url = BaseUrl::new(&url, &api_version)?;

        let credentials = Credentials::resolve(
            self.username.as_deref(),
            self.secret.as_deref(),
            self.token.as_ref(),
            self.credentials_file.as_deref(),
        )?;

        Ok(ClientConfig {
            base_url,
            api_version,
            credentials,
            retry: self.retry.unwrap_or_default(),
            max_pages: self.max_pages,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
