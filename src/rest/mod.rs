//! Typed Harbor endpoints.
//!
//! This module implements a set of Harbor v2 endpoints on
//! [`RestClient`](crate::RestClient):
//!
//! - **Users**: listing, searching, fetching, creating, updating and deleting
//!   users, plus admin flag, password and CLI secret changes
//! - **Permissions**: the permissions of the current user
//! - **Robots**: creating (optionally saving a credentials file), listing,
//!   fetching, updating, deleting and refreshing robot accounts
//!
//! Each wrapper builds its path and body, runs the request through the
//! client pipeline and validates the result into a model from
//! [`crate::models`].
//!
//! # Example
//!
//! ```rust,ignore
//! use harbor_api::{ClientConfig, RestClient};
//! use harbor_api::rest::UserListParams;
//!
//! let client = RestClient::new(&config)?;
//!
//! let me = client.get_current_user().await?;
//! let admins = client
//!     .get_users(Some(UserListParams {
//!         q: Some("sysadmin_flag=true".to_string()),
//!         ..Default::default()
//!     }))
//!     .await?;
//! client.delete_user(42, true).await?;
//! ```

mod robots;
mod users;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpError, InvalidHttpRequestError};

pub use robots::{RobotCreateError, RobotListParams};
pub use users::{UserListParams, UserSearchParams};

/// Serializes a params struct to a query parameter map.
///
/// `None` fields are skipped; arrays become comma-separated values.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, HttpError> {
    let value = serde_json::to_value(params).map_err(|e| InvalidHttpRequestError::InvalidParams {
        reason: e.to_string(),
    })?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
