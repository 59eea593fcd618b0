//! Harbor API version definitions.
//!
//! This module provides the [`ApiVersion`] enum used to build the versioned
//! API base path (`/api/<version>`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Harbor API version.
///
/// Harbor currently exposes a single stable REST version, `v2.0`. Any other
/// string is kept verbatim as a `Custom` version so that newer or unusual
/// deployments can still be addressed.
///
/// # Example
///
/// ```rust
/// use harbor_api::ApiVersion;
///
/// assert_eq!(ApiVersion::latest().to_string(), "v2.0");
///
/// // The `v` prefix is added when missing
/// let version: ApiVersion = "2.0".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2_0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2.0.
    V2_0,
    /// Custom version string, always prefixed with `v`.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2_0
    }

    /// Returns `true` if this is a known stable API version.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Parses a version string, prefixing `v` when it does not contain one.
    ///
    /// Malformed versions are not rejected; they are passed through as
    /// [`ApiVersion::Custom`].
    #[must_use]
    pub fn new(version: &str) -> Self {
        let version = version.trim().trim_matches('/');
        let version = if version.contains('v') {
            version.to_string()
        } else {
            format!("v{version}")
        };

        match version.as_str() {
            "v2.0" => Self::V2_0,
            _ => Self::Custom(version),
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2_0 => f.write_str("v2.0"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ApiVersion {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
