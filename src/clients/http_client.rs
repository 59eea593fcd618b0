//! HTTP client for Harbor API communication.
//!
//! This module provides the [`HttpClient`] type, which sends authenticated
//! requests, retries connection-level failures, and maps error statuses to
//! typed errors.

use std::collections::HashMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::clients::errors::{is_transient, HttpError, InvalidHttpRequestError, StatusError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, ClientConfig, RetryPolicy};
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Harbor API.
///
/// The client handles:
/// - URL construction from the normalized [`BaseUrl`]
/// - Default headers including User-Agent, Accept and Authorization
/// - Bounded retries with backoff when no connection could be established
/// - Mapping of status codes >= 400 to [`StatusError`]
///
/// A response that was received is never retried, whatever its status.
///
/// # Cancellation
///
/// Dropping the future returned by [`request`](Self::request) cancels the
/// call, including any pending retry delay.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use harbor_api::{ClientConfig, HttpClient};
/// use harbor_api::clients::{HttpMethod, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .url("https://harbor.example.com")
///     .username("admin")
///     .secret("Harbor12345")
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/systeminfo").build()?;
/// let response = client.request(&request).await?;
/// ```
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Normalized API base URL (e.g., `https://harbor.example.com/api/v2.0`).
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Retry policy for connection-level failures.
    retry: RetryPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header_names: Vec<&str> = self.default_headers.keys().map(String::as_str).collect();
        header_names.sort_unstable();
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &header_names)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Harbor API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.credentials().header_value(),
        );

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            retry: config.retry(),
        })
    }

    /// Returns the normalized API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy for connection failures.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends an HTTP request to the Harbor API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response could be obtained after all attempts (`Transport`)
    /// - A status >= 400 was received (`Status`), unless the status is 404
    ///   and the request sets `missing_ok`
    pub async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join_path(&request.path);
        self.dispatch(request.http_method, &url, request, true).await
    }

    /// Fetches a continuation page of `request` at an absolute URL.
    ///
    /// The method and headers of the original request are reused; its body
    /// and query parameters are not, since the link carries its own query.
    ///
    /// # Errors
    ///
    /// Fails like [`request`](Self::request).
    pub async fn follow(&self, request: &HttpRequest, url: Url) -> Result<HttpResponse, HttpError> {
        self.dispatch(request.http_method, url.as_str(), request, false)
            .await
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        request: &HttpRequest,
        first_page: bool,
    ) -> Result<HttpResponse, HttpError> {
        let headers = self.merge_headers(request, first_page)?;

        let build = || {
            let mut req_builder = self
                .client
                .request(method.into(), url)
                .headers(headers.clone());
            if first_page {
                if let Some(query) = &request.query {
                    req_builder = req_builder.query(query);
                }
                if let Some(body) = &request.body {
                    req_builder = req_builder.body(body.to_string());
                }
            }
            req_builder
        };

        let res = self.send_with_retry(method, url, build).await?;

        let code = res.status().as_u16();
        let final_url = res.url().to_string();
        let cause = res.error_for_status_ref().err();
        let res_headers = Self::parse_response_headers(res.headers());
        let text = res.text().await?;
        let response = HttpResponse::new(code, res_headers, text, final_url);

        tracing::debug!(%method, url = %response.url, status = code, "Harbor API response");

        if response.code < 400 {
            return Ok(response);
        }

        if response.code == 404 && request.missing_ok {
            tracing::debug!(url = %response.url, "resource not found, ignoring");
            return Ok(response);
        }

        let error = StatusError::from_response(&response, cause);
        tracing::debug!(
            url = %error.url,
            status = error.code,
            kind = %error.kind,
            errors = error.errors.len(),
            "Harbor API returned an error status"
        );
        Err(error.into())
    }

    /// Sends a request, retrying while no response can be obtained.
    ///
    /// Only failures to connect are retried, since nothing was sent. The
    /// last transport error is returned unchanged once the attempts are
    /// exhausted.
    async fn send_with_retry<F>(
        &self,
        method: HttpMethod,
        url: &str,
        build: F,
    ) -> Result<reqwest::Response, HttpError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let max_attempts = self.retry.max_attempts();
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            tracing::debug!(%method, url, attempt, "sending Harbor API request");

            match build().send().await {
                Ok(res) => return Ok(res),
                Err(err) if is_transient(&err) && attempt < max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        %method,
                        url,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::error!(%method, url, attempt, error = %err, "Harbor API request failed");
                    return Err(HttpError::Transport(err));
                }
            }
        }
    }

    /// Merges the default headers with the request's extra headers.
    ///
    /// Header names are case-insensitive, so an extra header replaces a
    /// default of the same name whatever its spelling.
    fn merge_headers(
        &self,
        request: &HttpRequest,
        first_page: bool,
    ) -> Result<HeaderMap, InvalidHttpRequestError> {
        let mut headers = HeaderMap::new();
        let content_type = (first_page && request.body.is_some())
            .then_some(("Content-Type", "application/json"));
        let defaults = self
            .default_headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(content_type);
        let extras = request
            .extra_headers
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()));

        for (name, value) in defaults.chain(extras) {
            let invalid = || InvalidHttpRequestError::InvalidHeader {
                name: name.to_string(),
            };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
