//! HTTP-specific error types for the Harbor API client.
//!
//! # Error Handling
//!
//! Each call through [`HttpClient`](crate::clients::HttpClient) or
//! [`RestClient`](crate::clients::RestClient) fails with exactly one
//! [`HttpError`] variant:
//!
//! - [`HttpError::Transport`]: no response could be obtained. Failures to
//!   connect are retried up to the configured bound first; a request that
//!   timed out after being sent is not.
//! - [`HttpError::Status`]: a response with status >= 400 was received. Never
//!   retried.
//! - [`HttpError::Validation`]: the body did not match the expected shape.
//!   Never retried.
//! - [`HttpError::InvalidRequest`]: the request was rejected before sending.
//!
//! # Example
//!
//! ```rust,ignore
//! use harbor_api::{HttpError, StatusErrorKind};
//!
//! match client.get_user(42).await {
//!     Ok(user) => println!("{:?}", user.username),
//!     Err(HttpError::Status(e)) if e.kind == StatusErrorKind::NotFound => {
//!         println!("no such user");
//!     }
//!     Err(HttpError::Status(e)) => {
//!         for error in &e.errors {
//!             println!("{:?}: {:?}", error.code, error.message);
//!         }
//!     }
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::http_response::HttpResponse;
use crate::models::{ErrorEntry, Errors};

/// The concrete kind of a [`StatusError`], selected by exact status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusErrorKind {
    /// 400 Bad Request.
    BadRequest,
    /// 401 Unauthorized.
    Unauthorized,
    /// 403 Forbidden.
    Forbidden,
    /// 404 Not Found.
    NotFound,
    /// 405 Method Not Allowed.
    MethodNotAllowed,
    /// 409 Conflict.
    Conflict,
    /// 412 Precondition Failed.
    PreconditionFailed,
    /// 415 Unsupported Media Type.
    UnsupportedType,
    /// 500 Internal Server Error.
    InternalServerError,
    /// Any other 5xx status code.
    ServerError,
    /// Any other status code >= 400.
    Other,
}

impl StatusErrorKind {
    /// Maps a status code to its error kind.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            409 => Self::Conflict,
            412 => Self::PreconditionFailed,
            415 => Self::UnsupportedType,
            500 => Self::InternalServerError,
            501..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StatusErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Conflict => "Conflict",
            Self::PreconditionFailed => "Precondition Failed",
            Self::UnsupportedType => "Unsupported Type",
            Self::InternalServerError => "Internal Server Error",
            Self::ServerError => "Server Error",
            Self::Other => "HTTP Error",
        };
        f.write_str(name)
    }
}

/// Error returned when Harbor answers with a status code >= 400.
///
/// `errors` holds the server-reported `(code, message)` entries when the
/// body matched Harbor's error schema, and is empty otherwise. The reqwest
/// status error is kept as the [`source`](std::error::Error::source).
///
/// # Example
///
/// ```rust
/// use harbor_api::clients::{StatusError, StatusErrorKind};
///
/// let error = StatusError::new(404, "https://harbor.example.com/api/v2.0/users/7", vec![]);
/// assert_eq!(error.kind, StatusErrorKind::NotFound);
/// assert_eq!(error.code, 404);
/// ```
#[derive(Debug, Error)]
#[error("{kind} ({code}) for {url}{}", describe_errors(.errors))]
pub struct StatusError {
    /// The error kind selected from the status code.
    pub kind: StatusErrorKind,
    /// The HTTP status code.
    pub code: u16,
    /// The URL of the failed request.
    pub url: String,
    /// Server-reported errors, in server order.
    pub errors: Vec<ErrorEntry>,
    /// The raw response body.
    pub body: String,
    /// The `X-Request-Id` header, if present.
    pub request_id: Option<String>,
    #[source]
    cause: Option<reqwest::Error>,
}

impl StatusError {
    /// Creates a status error without a response body or cause.
    #[must_use]
    pub fn new(code: u16, url: impl Into<String>, errors: Vec<ErrorEntry>) -> Self {
        Self {
            kind: StatusErrorKind::from_code(code),
            code,
            url: url.into(),
            errors,
            body: String::new(),
            request_id: None,
            cause: None,
        }
    }

    /// Maps a received error response to a typed status error.
    ///
    /// The body is decoded as Harbor's `{"errors": [...]}` envelope, or as a
    /// bare list of entries. When neither matches, the error list is empty
    /// but the error is still produced.
    #[must_use]
    pub fn from_response(response: &HttpResponse, cause: Option<reqwest::Error>) -> Self {
        Self {
            kind: StatusErrorKind::from_code(response.code),
            code: response.code,
            url: response.url.clone(),
            errors: parse_error_entries(response.body.as_ref()),
            body: response.text.clone(),
            request_id: response.request_id().map(String::from),
            cause,
        }
    }

    /// Returns the underlying reqwest status error, if any.
    #[must_use]
    pub const fn cause(&self) -> Option<&reqwest::Error> {
        self.cause.as_ref()
    }
}

fn parse_error_entries(body: Option<&serde_json::Value>) -> Vec<ErrorEntry> {
    let Some(body) = body else {
        return Vec::new();
    };
    if body.is_array() {
        return serde_json::from_value::<Vec<ErrorEntry>>(body.clone()).unwrap_or_default();
    }
    serde_json::from_value::<Errors>(body.clone())
        .map(|e| e.errors)
        .unwrap_or_default()
}

fn describe_errors(errors: &[ErrorEntry]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.message.as_deref().or(e.code.as_deref()))
        .collect();
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

/// Error returned when a response body does not match the expected shape.
///
/// For list responses `index` identifies the offending element and `path` is
/// relative to that element.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to construct {type_name}{}: {message} (at '{path}')", element(*.index))]
pub struct ValidationError {
    /// The Rust type the body was decoded into.
    pub type_name: &'static str,
    /// The index of the failing element for list responses.
    pub index: Option<usize>,
    /// The path of the offending field (e.g. `username`).
    pub path: String,
    /// Description of the violation.
    pub message: String,
}

fn element(index: Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!(" (element {i})"))
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// The request body could not be serialized.
    #[error("Invalid request body: {reason}")]
    InvalidBody {
        /// The serialization failure.
        reason: String,
    },

    /// Query parameters could not be serialized.
    #[error("Invalid query parameters: {reason}")]
    InvalidParams {
        /// The serialization failure.
        reason: String,
    },

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A continuation link could not be resolved to a URL.
    #[error("Invalid pagination link '{link}'")]
    InvalidLink {
        /// The link as found in the response header.
        link: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No HTTP response could be obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response with status >= 400 was received.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The response body did not match the expected shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl HttpError {
    /// Returns `true` for connection-level failures that may succeed on retry.
    ///
    /// Only failures to establish a connection qualify, including a connect
    /// timeout. A request that timed out after being sent, and any received
    /// response, are never retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => is_transient(e),
            Self::Status(_) | Self::Validation(_) | Self::InvalidRequest(_) => false,
        }
    }

    /// Returns the HTTP status code for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the status error kind for status errors.
    #[must_use]
    pub const fn status_kind(&self) -> Option<StatusErrorKind> {
        match self {
            Self::Status(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// Returns `true` if the request never reached the server.
pub(crate) fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect()
}
