//! HTTP response types for the Harbor API client.
//!
//! This module provides the [`HttpResponse`] type and [`PaginationInfo`],
//! which parses Harbor's `Link` continuation header.

use std::collections::HashMap;

/// Continuation links parsed from the `Link` header.
///
/// Harbor returns list pages with a header such as
/// `</api/v2.0/users?page=2&page_size=10>; rel="next"`. Links are kept as
/// sent and are usually relative to the server root.
///
/// # Example
///
/// ```rust
/// use harbor_api::clients::PaginationInfo;
///
/// let info = PaginationInfo::parse_link_header(
///     r#"</api/v2.0/users?page=1>; rel="prev" , </api/v2.0/users?page=3>; rel="next""#,
/// );
/// assert_eq!(info.next.as_deref(), Some("/api/v2.0/users?page=3"));
/// assert_eq!(info.prev.as_deref(), Some("/api/v2.0/users?page=1"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// The link to the previous page, if available.
    pub prev: Option<String>,
    /// The link to the next page, if available.
    pub next: Option<String>,
}

impl PaginationInfo {
    /// Parses pagination links from a Link header value.
    ///
    /// The Link header format is:
    /// `<url>; rel="next", <url>; rel="prev"`
    ///
    /// Entries without a `rel` parameter are ignored.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',') {
            let mut parts = link.split(';');

            let url = parts
                .next()
                .map(|s| s.trim().trim_start_matches('<').trim_end_matches('>'))
                .filter(|s| !s.is_empty());

            let rel = parts.find_map(|part| {
                part.trim()
                    .strip_prefix("rel=")
                    .map(|rel| rel.trim_matches('"'))
            });

            if let (Some(rel), Some(url)) = (rel, url) {
                match rel {
                    "prev" | "previous" => result.prev = Some(url.to_string()),
                    "next" => result.next = Some(url.to_string()),
                    _ => {}
                }
            }
        }

        result
    }

    /// Merges several Link header values, keeping the first of each relation.
    fn from_values(values: &[String]) -> Self {
        values.iter().fold(Self::default(), |acc, value| {
            let parsed = Self::parse_link_header(value);
            Self {
                prev: acc.prev.or(parsed.prev),
                next: acc.next.or(parsed.next),
            }
        })
    }
}

/// An HTTP response from the Harbor API.
///
/// The raw body is always kept in `text`. When it is valid JSON the parsed
/// value is available in `body`; empty and non-JSON bodies leave `body` as
/// `None`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub text: String,
    /// The parsed JSON body, if the body was JSON.
    pub body: Option<serde_json::Value>,
    /// The URL the response was received from.
    pub url: String,
    /// Continuation links (from the `Link` header).
    pub pagination: PaginationInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the body and `Link` header.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        text: String,
        url: String,
    ) -> Self {
        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        let pagination = headers
            .get("link")
            .map(|values| PaginationInfo::from_values(values))
            .unwrap_or_default();

        Self {
            code,
            headers,
            text,
            body,
            url,
            pagination,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the parsed JSON body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Returns the continuation link for the next page, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.pagination.next.as_deref()
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the URL-decoded `Location` header.
    ///
    /// Harbor answers create calls with the location of the new resource,
    /// e.g. `/api/v2.0/users/7`.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.header("location").map(|value| {
            urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
        })
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Total-Count` header value, if present and numeric.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.header("x-total-count").and_then(|v| v.trim().parse().ok())
    }
}
