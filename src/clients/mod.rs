//! HTTP client types for Harbor API communication.
//!
//! This module provides the client layer for making authenticated requests
//! to the Harbor v2 REST API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: Sends requests, retries connection failures and maps
//!   error statuses
//! - [`RestClient`]: Verbs plus pagination and typed validation
//! - [`PaginationFollower`]: Walks `rel="next"` continuation links
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A received response
//! - [`HttpError`]: The error taxonomy shared by all calls
//!
//! # Retry Behavior
//!
//! Only failures to connect (connection refused, DNS failure, connect
//! timeout) are retried, with exponential backoff bounded by the
//! configured [`RetryPolicy`](crate::RetryPolicy). Any received response,
//! including 5xx, is returned or mapped to a [`StatusError`] immediately,
//! and a request that timed out after being sent is never re-sent.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod pagination;
pub mod rest;
mod validation;

pub use errors::{
    HttpError, InvalidHttpRequestError, StatusError, StatusErrorKind, ValidationError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, PaginationInfo};
pub use pagination::PaginationFollower;
pub use validation::{validate_list, validate_record, ExpectedShape, Shaped};

pub use rest::RestClient;
