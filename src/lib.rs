//! # Harbor API Rust Client
//!
//! An async client for the Harbor container registry v2 REST API, providing
//! typed configuration, credential resolution, resilient request execution,
//! continuation-link pagination and typed response validation.
//!
//! ## Overview
//!
//! This crate provides:
//! - Typed configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Credential resolution from a username/secret pair, a token, or a robot
//!   credentials file ([`auth`])
//! - An async HTTP client that retries connection failures only
//!   ([`HttpClient`])
//! - Pagination over `Link: <...>; rel="next"` headers
//! - Field-level validation errors for response bodies
//! - A distinct error kind per Harbor error status ([`StatusErrorKind`])
//! - Typed endpoints for users, permissions and robot accounts ([`rest`])
//!
//! ## Quick Start
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
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use harbor_api::{ClientConfig, HttpError, RestClient, StatusErrorKind};
//!
//! let config = ClientConfig::builder()
//!     .url("https://harbor.example.com")
//!     .credentials_file("robot-ci.json")
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! // All pages are collected and every user is validated
//! let users = client.get_users(None).await?;
//!
//! match client.get_user(42).await {
//!     Ok(user) => println!("{:?}", user.username),
//!     Err(HttpError::Status(e)) if e.kind == StatusErrorKind::NotFound => {}
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (request attempts, retries, followed
//! pages, pagination anomalies) and never installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Misconfiguration fails when the config is built
//! - **Thread-safe**: Clients are `Send + Sync` and share only their
//!   connection pool
//! - **Async-first**: Designed for use with the Tokio runtime; dropping a
//!   call's future cancels it

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{Credentials, CredentialsFile};
pub use config::{ApiVersion, BaseUrl, ClientConfig, ClientConfigBuilder, RetryPolicy};
pub use error::{ConfigError, CredentialsFileError};

// Re-export HTTP client types
pub use clients::{
    ExpectedShape, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError, PaginationInfo, RestClient, Shaped, StatusError,
    StatusErrorKind, ValidationError,
};
