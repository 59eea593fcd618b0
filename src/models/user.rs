//! User and permission models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as returned by `GET /users` and `GET /users/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserResp {
    /// The unique identifier of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// The login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// The user's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,

    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Whether the user is a system administrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sysadmin_flag: Option<bool>,

    /// Whether admin rights come from the external auth provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_role_in_auth: Option<bool>,

    /// When the user was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the user was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// An entry returned by `GET /users/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserSearchRespItem {
    /// The unique identifier of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// The login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserCreationReq {
    /// The login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// The user's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,

    /// The initial password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for `PUT /users/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// The user's email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,

    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for `PUT /users/{user_id}/password`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PasswordReq {
    /// The current password; not required when the caller is an admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,

    /// The new password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Request body for `PUT /users/{user_id}/sysadmin`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserSysAdminFlag {
    /// Whether the user is a system administrator.
    pub sysadmin_flag: bool,
}

/// A permission held by the current user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Permission {
    /// The resource path the permission applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// The allowed action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}
