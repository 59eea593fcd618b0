//! Error payloads returned by Harbor for failed requests.

use serde::{Deserialize, Serialize};

/// A single server-reported error.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ErrorEntry {
    /// The error code (e.g. `NOT_FOUND`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The `{"errors": [...]}` envelope of an error response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Errors {
    /// The individual errors, in server order.
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}
