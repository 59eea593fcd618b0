//! Typed validation of response bodies.
//!
//! Decoding goes through `serde_path_to_error` so that a mismatch reports
//! the path of the offending field, and, for lists, the index of the
//! offending element.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::ValidationError;

/// The shape a response body is expected to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedShape {
    /// The body is ignored.
    Empty,
    /// A single JSON object.
    Record,
    /// A JSON array of records, optionally collected across pages.
    List {
        /// Follow `rel="next"` links for GET requests.
        follow_links: bool,
    },
}

/// A validated response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Shaped<T> {
    /// No body was expected.
    Empty,
    /// A single validated record.
    Record(T),
    /// Validated records, in server order.
    List(Vec<T>),
}

impl<T> Shaped<T> {
    /// Returns the record, if this is [`Shaped::Record`].
    #[must_use]
    pub fn into_record(self) -> Option<T> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the records, if this is [`Shaped::List`].
    #[must_use]
    pub fn into_list(self) -> Option<Vec<T>> {
        match self {
            Self::List(records) => Some(records),
            _ => None,
        }
    }
}

/// Validates a body as a single record of type `T`.
///
/// # Errors
///
/// Returns [`ValidationError`] if the body is missing, not JSON, or does not
/// match `T`.
pub fn validate_record<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ValidationError> {
    let body = body.ok_or_else(|| not_json::<T>())?;
    decode(body, None)
}

/// Validates a body as a list of records of type `T`.
///
/// Elements are checked in order; the first failure is reported with its
/// index.
///
/// # Errors
///
/// Returns [`ValidationError`] if the body is not a JSON array, or if any
/// element does not match `T`.
pub fn validate_list<T: DeserializeOwned>(body: Option<Value>) -> Result<Vec<T>, ValidationError> {
    let body = body.ok_or_else(|| not_json::<T>())?;
    let Value::Array(items) = body else {
        return Err(ValidationError {
            type_name: type_name::<T>(),
            index: None,
            path: ".".to_string(),
            message: format!("expected a JSON array, found {}", kind_of(&body)),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode(item, Some(index)))
        .collect()
}

fn decode<T: DeserializeOwned>(value: Value, index: Option<usize>) -> Result<T, ValidationError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let parent = err.path().to_string();
        let message = err.into_inner().to_string();
        let path = match missing_field(&message) {
            Some(field) if parent == "." => field.to_string(),
            Some(field) => format!("{parent}.{field}"),
            None => parent,
        };
        ValidationError {
            type_name: type_name::<T>(),
            index,
            path,
            message,
        }
    })
}

/// Extracts the field name from serde's "missing field `name`" message.
///
/// The path of such an error stops at the enclosing object.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")?
        .split('`')
        .next()
        .filter(|field| !field.is_empty())
}

fn not_json<T>() -> ValidationError {
    ValidationError {
        type_name: type_name::<T>(),
        index: None,
        path: ".".to_string(),
        message: "response body is empty or not JSON".to_string(),
    }
}

fn type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
