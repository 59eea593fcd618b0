//! Validated newtype wrappers for configuration values.
//!
//! This module provides [`BaseUrl`], the canonical Harbor API root that every
//! request path is appended to.

use std::fmt;

use reqwest::Url;

use crate::config::ApiVersion;
use crate::error::ConfigError;

/// A normalized Harbor API base URL.
///
/// The root URL supplied by the caller may or may not already contain the
/// `/api` segment and/or a version segment. Normalization always produces
/// `<scheme>://<host>[:port]/api/<version>` with no trailing slash.
///
/// A version segment that is already present is never corrected, even when
/// it is malformed.
///
/// # Example
///
/// ```rust
/// use harbor_api::{ApiVersion, BaseUrl};
///
/// let version = ApiVersion::latest();
/// let url = BaseUrl::new("https://harbor.example.com/", &version).unwrap();
/// assert_eq!(url.as_ref(), "https://harbor.example.com/api/v2.0");
///
/// let url = BaseUrl::new("https://harbor.example.com/api", &version).unwrap();
/// assert_eq!(url.as_ref(), "https://harbor.example.com/api/v2.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
}

impl BaseUrl {
    /// Normalizes a root URL into the canonical versioned API base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: &str, version: &ApiVersion) -> Result<Self, ConfigError> {
        let trimmed = url.trim().trim_matches('/');
        let invalid = || ConfigError::InvalidUrl {
            url: url.to_string(),
        };

        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        if parsed.host_str().is_none() {
            return Err(invalid());
        }

        let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();
        let api_position = segments.iter().position(|segment| *segment == "api");

        let normalized = match api_position {
            Some(i) if segments.get(i + 1).is_some_and(|s| s.starts_with('v')) => {
                trimmed.to_string()
            }
            Some(_) => format!("{trimmed}/{version}"),
            None => format!("{trimmed}/api/{version}"),
        };

        Ok(Self {
            url: normalized.trim_end_matches('/').to_string(),
        })
    }

    /// Appends an API path (e.g. `/users/1`) to this base URL.
    #[must_use]
    pub fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    /// Resolves a continuation link against this base URL.
    ///
    /// Absolute links are returned unchanged; relative links such as
    /// `/api/v2.0/users?page=2` are resolved against the scheme and host.
    #[must_use]
    pub fn resolve_link(&self, link: &str) -> Option<Url> {
        Url::parse(&self.url).ok()?.join(link).ok()
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(url: &str) -> String {
        BaseUrl::new(url, &ApiVersion::latest())
            .unwrap()
            .as_ref()
            .to_string()
    }

    #[test]
    fn test_bare_host_gets_api_and_version() {
        assert_eq!(
            normalize("https://harbor.example.com"),
            "https://harbor.example.com/api/v2.0"
        );
    }

    #[test]
    fn test_api_segment_gets_version() {
        assert_eq!(
            normalize("https://harbor.example.com/api"),
            "https://harbor.example.com/api/v2.0"
        );
        assert_eq!(
            normalize("https://harbor.example.com/api/"),
            "https://harbor.example.com/api/v2.0"
        );
    }

    #[test]
    fn test_trailing_slash_is_removed() {
        assert_eq!(
            normalize("https://harbor.example.com/api/v2.0/"),
            "https://harbor.example.com/api/v2.0"
        );
    }

    #[test]
    fn test_malformed_version_is_passed_through() {
        assert_eq!(
            normalize("https://harbor.example.com/api/v"),
            "https://harbor.example.com/api/v"
        );
    }

    #[test]
    fn test_port_is_preserved() {
        assert_eq!(
            normalize("http://localhost:8080"),
            "http://localhost:8080/api/v2.0"
        );
    }

    #[test]
    fn test_host_starting_with_api_is_not_mistaken_for_segment() {
        assert_eq!(
            normalize("https://api.harbor.example.com"),
            "https://api.harbor.example.com/api/v2.0"
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for url in [
            "https://harbor.example.com",
            "https://harbor.example.com/api/",
            "http://localhost:8080/api/v2.0/",
            "https://harbor.example.com/api/v",
        ] {
            let once = normalize(url);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_custom_version_is_used() {
        let url = BaseUrl::new("https://harbor.example.com", &ApiVersion::new("2.1")).unwrap();
        assert_eq!(url.as_ref(), "https://harbor.example.com/api/v2.1");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = BaseUrl::new("harbor.example.com", &ApiVersion::latest());
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));

        let result = BaseUrl::new("", &ApiVersion::latest());
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_join_path() {
        let url = BaseUrl::new("https://harbor.example.com", &ApiVersion::latest()).unwrap();
        assert_eq!(
            url.join_path("/users/1"),
            "https://harbor.example.com/api/v2.0/users/1"
        );
        assert_eq!(
            url.join_path("users"),
            "https://harbor.example.com/api/v2.0/users"
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute_links() {
        let url = BaseUrl::new("http://localhost:8080", &ApiVersion::latest()).unwrap();

        let next = url.resolve_link("/api/v2.0/users?page=2").unwrap();
        assert_eq!(next.as_str(), "http://localhost:8080/api/v2.0/users?page=2");

        let next = url
            .resolve_link("https://other.example.com/api/v2.0/users?page=3")
            .unwrap();
        assert_eq!(
            next.as_str(),
            "https://other.example.com/api/v2.0/users?page=3"
        );
    }
}
