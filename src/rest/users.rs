//! User and permission endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpError, HttpMethod, HttpRequest, RestClient, StatusErrorKind};
use crate::models::{
    PasswordReq, Permission, UserCreationReq, UserProfile, UserResp, UserSearchRespItem,
    UserSysAdminFlag,
};
use crate::rest::serialize_to_query;

/// Parameters for listing users.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserListParams {
    /// Query string, e.g. `username=~adm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Sort order, e.g. `-creation_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// The first page to request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// The number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Parameters for searching users by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSearchParams {
    /// The username to search for.
    pub username: String,

    /// The first page to request.
    pub page: u32,

    /// The number of results per page.
    pub page_size: u32,
}

impl UserSearchParams {
    /// Searches for `username`, starting at page 1 with 100 results per page.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            page: 1,
            page_size: 100,
        }
    }
}

impl RestClient {
    /// Lists users, following all continuation pages.
    ///
    /// `GET /users`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or any user fails
    /// validation.
    pub async fn get_users(
        &self,
        params: Option<UserListParams>,
    ) -> Result<Vec<UserResp>, HttpError> {
        let query = params.map(|p| serialize_to_query(&p)).transpose()?;
        self.get_all("/users", query, true).await
    }

    /// Searches users by username.
    ///
    /// `GET /users/search`. With `retrieve_all` set to `false` only the
    /// requested page is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or any entry fails
    /// validation.
    pub async fn get_users_by_username(
        &self,
        params: &UserSearchParams,
        retrieve_all: bool,
    ) -> Result<Vec<UserSearchRespItem>, HttpError> {
        let query = serialize_to_query(params)?;
        self.get_all("/users/search", Some(query), retrieve_all)
            .await
    }

    /// Fetches a user by ID.
    ///
    /// `GET /users/{user_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body fails
    /// validation. An unknown user is a `NotFound` status error.
    pub async fn get_user(&self, user_id: i64) -> Result<UserResp, HttpError> {
        self.get_one(&format!("/users/{user_id}"), None).await
    }

    /// Fetches the user the client is authenticated as.
    ///
    /// `GET /users/current`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body fails
    /// validation.
    pub async fn get_current_user(&self) -> Result<UserResp, HttpError> {
        self.get_one("/users/current", None).await
    }

    /// Lists the permissions of the current user.
    ///
    /// `GET /users/current/permissions`. `relative` is only sent together
    /// with a `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or any permission fails
    /// validation.
    pub async fn get_current_user_permissions(
        &self,
        scope: Option<&str>,
        relative: bool,
    ) -> Result<Vec<Permission>, HttpError> {
        let query = scope.map(|scope| {
            HashMap::from([
                ("scope".to_string(), scope.to_string()),
                ("relative".to_string(), relative.to_string()),
            ])
        });
        self.get_all("/users/current/permissions", query, true)
            .await
    }

    /// Creates a user and returns the location of the new user.
    ///
    /// `POST /users`. Only available with database authentication.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create_user(&self, user: &UserCreationReq) -> Result<Option<String>, HttpError> {
        let response = self.post("/users", Some(Self::to_body(user)?)).await?;
        Ok(response.location())
    }

    /// Updates a user's profile.
    ///
    /// `PUT /users/{user_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update_user_profile(
        &self,
        user_id: i64,
        profile: &UserProfile,
    ) -> Result<(), HttpError> {
        self.put(&format!("/users/{user_id}"), Self::to_body(profile)?)
            .await?;
        Ok(())
    }

    /// Deletes a user.
    ///
    /// `DELETE /users/{user_id}`. With `missing_ok`, an unknown user is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete_user(&self, user_id: i64, missing_ok: bool) -> Result<(), HttpError> {
        self.delete(&format!("/users/{user_id}"), missing_ok)
            .await?;
        Ok(())
    }

    /// Grants or revokes system administrator rights.
    ///
    /// `PUT /users/{user_id}/sysadmin`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn set_user_admin(&self, user_id: i64, is_admin: bool) -> Result<(), HttpError> {
        let flag = UserSysAdminFlag {
            sysadmin_flag: is_admin,
        };
        self.put(&format!("/users/{user_id}/sysadmin"), Self::to_body(&flag)?)
            .await?;
        Ok(())
    }

    /// Changes a user's password.
    ///
    /// `PUT /users/{user_id}/password`. Admins may omit `old_password`.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` status error if the user ID is invalid, the
    /// password does not meet the requirements, or the old password is
    /// wrong.
    pub async fn set_user_password(
        &self,
        user_id: i64,
        new_password: &str,
        old_password: Option<&str>,
    ) -> Result<(), HttpError> {
        let body = PasswordReq {
            old_password: old_password.map(String::from),
            new_password: Some(new_password.to_string()),
        };
        self.put_logging_bad_request(&format!("/users/{user_id}/password"), Self::to_body(&body)?)
            .await
    }

    /// Sets the CLI secret of an OIDC user.
    ///
    /// `PUT /users/{user_id}/cli_secret`
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` status error if the user ID is invalid, the
    /// user is not onboarded through OIDC, or the secret is too weak.
    pub async fn set_user_cli_secret(&self, user_id: i64, secret: &str) -> Result<(), HttpError> {
        self.put_logging_bad_request(
            &format!("/users/{user_id}/cli_secret"),
            json!({ "secret": secret }),
        )
        .await
    }

    async fn put_logging_bad_request(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()?;
        match self.send(&request).await {
            Ok(_) => Ok(()),
            Err(HttpError::Status(e)) if e.kind == StatusErrorKind::BadRequest => {
                tracing::error!(url = %e.url, body = %e.body, "Harbor rejected the request");
                Err(HttpError::Status(e))
            }
            Err(e) => Err(e),
        }
    }
}
