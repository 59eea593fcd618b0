//! REST API client for Harbor.
//!
//! [`RestClient`] builds on [`HttpClient`](crate::clients::HttpClient) and
//! adds continuation-link pagination and typed validation of response
//! bodies. Endpoint wrappers for users, permissions and robot accounts are
//! implemented on it in [`crate::rest`].
//!
//! # Example
//!
//! ```rust,ignore
//! use harbor_api::{ClientConfig, RestClient};
//! use harbor_api::clients::{ExpectedShape, HttpMethod, HttpRequest};
//! use harbor_api::models::UserResp;
//!
//! let client = RestClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/users").build()?;
//! let users = client
//!     .execute::<UserResp>(request, ExpectedShape::List { follow_links: true })
//!     .await?
//!     .into_list();
//! ```

mod client;

pub use client::RestClient;
