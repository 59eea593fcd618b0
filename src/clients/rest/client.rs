//! REST client implementation for the Harbor API.
//!
//! This module provides the [`RestClient`] type, which combines the
//! [`HttpClient`] with pagination and typed validation.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::pagination::PaginationFollower;
use crate::clients::validation::{validate_list, validate_record, ExpectedShape, Shaped};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, BaseUrl, ClientConfig};
use crate::error::ConfigError;

/// REST API client for Harbor.
///
/// Provides raw verbs (`get`, `post`, `put`, `patch`, `delete`, `head`) and
/// typed helpers (`get_one`, `get_all`, [`execute`](Self::execute)). List
/// GETs follow `rel="next"` links unless told otherwise.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
/// Concurrent calls share nothing but the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use harbor_api::{ClientConfig, RestClient};
/// use harbor_api::models::UserResp;
///
/// let config = ClientConfig::builder()
///     .url("https://harbor.example.com")
///     .username("admin")
///     .secret("Harbor12345")
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let users: Vec<UserResp> = client.get_all("/users", None, true).await?;
/// let health = client.get_text("/health", None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
    /// Page cap for list calls, counting the first page.
    max_pages: Option<usize>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// created.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(
            base_url = %config.base_url(),
            version = %config.api_version(),
            "created Harbor REST client"
        );

        Ok(Self {
            http_client,
            api_version: config.api_version().clone(),
            max_pages: config.max_pages(),
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the normalized API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.http_client.base_url()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a request and validates the body against `shape`.
    ///
    /// For [`ExpectedShape::List`] GET requests with `follow_links`, all
    /// continuation pages are collected before validation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status, validation or request
    /// errors. Validation errors are never retried.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        shape: ExpectedShape,
    ) -> Result<Shaped<T>, HttpError> {
        match shape {
            ExpectedShape::Empty => {
                self.http_client.request(&request).await?;
                Ok(Shaped::Empty)
            }
            ExpectedShape::Record => self.fetch_record(&request).await.map(Shaped::Record),
            ExpectedShape::List { follow_links } => self
                .fetch_list(&request, follow_links)
                .await
                .map(Shaped::List),
        }
    }

    /// Sends a request and returns the response without interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.http_client.request(request).await
    }

    /// Sends a GET request and returns the JSON body, following links.
    ///
    /// List bodies are collected across all pages. Other bodies are returned
    /// as-is; `None` means the body was empty or not JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<Option<Value>, HttpError> {
        self.get_with_links(path, query, true).await
    }

    /// Sends a GET request and returns the JSON body.
    ///
    /// With `follow_links` set to `false`, only the first page is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn get_with_links(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
        follow_links: bool,
    ) -> Result<Option<Value>, HttpError> {
        let request = Self::build(HttpMethod::Get, path, None, query, false)?;
        self.collect_body(&request, follow_links).await
    }

    /// Sends a GET request with `Accept: text/plain` and returns the body
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn get_text(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<String, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path).header("Accept", "text/plain");
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let request = builder.build()?;
        let response = self.http_client.request(&request).await?;
        Ok(response.text)
    }

    /// Sends a GET request and validates the body as one `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Validation`] if the body does not match `T`, or
    /// any error of [`get`](Self::get).
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<T, HttpError> {
        let request = Self::build(HttpMethod::Get, path, None, query, false)?;
        self.fetch_record(&request).await
    }

    /// Sends a GET request and validates the body as a list of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Validation`] with the failing element index if
    /// any element does not match `T`, or any error of [`get`](Self::get).
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
        follow_links: bool,
    ) -> Result<Vec<T>, HttpError> {
        let request = Self::build(HttpMethod::Get, path, None, query, false)?;
        self.fetch_list(&request, follow_links).await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = Self::build(HttpMethod::Post, path, body, None, false)?;
        self.http_client.request(&request).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn put(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        let request = Self::build(HttpMethod::Put, path, Some(body), None, false)?;
        self.http_client.request(&request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn patch(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        let request = Self::build(HttpMethod::Patch, path, Some(body), None, false)?;
        self.http_client.request(&request).await
    }

    /// Sends a DELETE request.
    ///
    /// With `missing_ok`, a 404 response is returned instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn delete(&self, path: &str, missing_ok: bool) -> Result<HttpResponse, HttpError> {
        let request = Self::build(HttpMethod::Delete, path, None, None, missing_ok)?;
        self.http_client.request(&request).await
    }

    /// Sends a HEAD request.
    ///
    /// With `missing_ok`, a 404 response is returned instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport, status or request errors.
    pub async fn head(&self, path: &str, missing_ok: bool) -> Result<HttpResponse, HttpError> {
        let request = Self::build(HttpMethod::Head, path, None, None, missing_ok)?;
        self.http_client.request(&request).await
    }

    /// Serializes a model into a request body.
    pub(crate) fn to_body<B: Serialize>(body: &B) -> Result<Value, HttpError> {
        serde_json::to_value(body).map_err(|e| {
            InvalidHttpRequestError::InvalidBody {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn build(
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<HashMap<String, String>>,
        missing_ok: bool,
    ) -> Result<HttpRequest, HttpError> {
        let mut builder = HttpRequest::builder(method, path)
            .maybe_body(body)
            .missing_ok(missing_ok);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        Ok(builder.build()?)
    }

    async fn collect_body(
        &self,
        request: &HttpRequest,
        follow_links: bool,
    ) -> Result<Option<Value>, HttpError> {
        let response = self.http_client.request(request).await?;
        if follow_links && request.http_method == HttpMethod::Get {
            PaginationFollower::new(&self.http_client, self.max_pages)
                .collect(request, response)
                .await
        } else {
            Ok(response.body)
        }
    }

    pub(crate) async fn fetch_record<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, HttpError> {
        let response = self.http_client.request(request).await?;
        Ok(validate_record(response.body)?)
    }

    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        follow_links: bool,
    ) -> Result<Vec<T>, HttpError> {
        let body = self.collect_body(request, follow_links).await?;
        Ok(validate_list(body)?)
    }
}
