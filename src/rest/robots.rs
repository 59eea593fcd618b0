//! Robot account endpoints.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{save_credentials_file, CredentialsFile};
use crate::clients::{HttpError, HttpMethod, HttpRequest, RestClient};
use crate::error::CredentialsFileError;
use crate::models::{Robot, RobotCreate, RobotCreated, RobotSec};
use crate::rest::serialize_to_query;

/// Parameters for listing robot accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RobotListParams {
    /// Query string, e.g. `name=~ci,level=system`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// The first page to request.
    pub page: u32,

    /// The number of results per page.
    pub page_size: u32,
}

impl Default for RobotListParams {
    fn default() -> Self {
        Self {
            q: None,
            sort: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// Error returned by [`RestClient::create_robot_and_save`].
#[derive(Debug, Error)]
pub enum RobotCreateError {
    /// Creating the robot failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The robot was created but its credentials file could not be written.
    #[error("Robot '{name}' was created but its credentials could not be saved: {source}")]
    Save {
        /// The name of the created robot.
        name: String,
        /// The underlying file error.
        #[source]
        source: CredentialsFileError,
        /// The created robot, including its one-time secret.
        created: Box<RobotCreated>,
    },
}

impl RestClient {
    /// Creates a robot account.
    ///
    /// `POST /robots`. Requires a sysadmin account. The returned secret is
    /// only available in this response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails, or a validation error if
    /// the server did not answer with a JSON robot.
    pub async fn create_robot(&self, robot: &RobotCreate) -> Result<RobotCreated, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "/robots")
            .body(Self::to_body(robot)?)
            .build()?;
        self.fetch_record(&request).await
    }

    /// Creates a robot account and writes its credentials file.
    ///
    /// # Errors
    ///
    /// Returns [`RobotCreateError::Http`] if creating the robot fails, or
    /// [`RobotCreateError::Save`] if the file cannot be written. In the
    /// latter case the robot exists and the error carries it.
    pub async fn create_robot_and_save(
        &self,
        robot: &RobotCreate,
        path: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<RobotCreated, RobotCreateError> {
        let created = self.create_robot(robot).await?;
        let file = CredentialsFile::from_robot_create(robot, &created);
        let path = path.as_ref();

        if let Err(source) = save_credentials_file(path, &file, overwrite) {
            return Err(RobotCreateError::Save {
                name: file.name,
                source,
                created: Box::new(created),
            });
        }

        tracing::debug!(path = %path.display(), "saved robot credentials");
        Ok(created)
    }

    /// Lists robot accounts, following all continuation pages.
    ///
    /// `GET /robots`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or any robot fails
    /// validation.
    pub async fn get_robots(&self, params: &RobotListParams) -> Result<Vec<Robot>, HttpError> {
        let query = serialize_to_query(params)?;
        self.get_all("/robots", Some(query), true).await
    }

    /// Fetches a robot account by ID.
    ///
    /// `GET /robots/{robot_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body fails
    /// validation.
    pub async fn get_robot(&self, robot_id: i64) -> Result<Robot, HttpError> {
        self.get_one(&format!("/robots/{robot_id}"), None).await
    }

    /// Replaces a robot account definition.
    ///
    /// `PUT /robots/{robot_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update_robot(&self, robot_id: i64, robot: &Robot) -> Result<(), HttpError> {
        self.put(&format!("/robots/{robot_id}"), Self::to_body(robot)?)
            .await?;
        Ok(())
    }

    /// Deletes a robot account.
    ///
    /// `DELETE /robots/{robot_id}`. With `missing_ok`, an unknown robot is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete_robot(&self, robot_id: i64, missing_ok: bool) -> Result<(), HttpError> {
        self.delete(&format!("/robots/{robot_id}"), missing_ok)
            .await?;
        Ok(())
    }

    /// Gives a robot account a new secret.
    ///
    /// `PATCH /robots/{robot_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body fails
    /// validation.
    pub async fn refresh_robot_secret(
        &self,
        robot_id: i64,
        secret: &str,
    ) -> Result<RobotSec, HttpError> {
        let body = RobotSec {
            secret: Some(secret.to_string()),
        };
        let request = HttpRequest::builder(HttpMethod::Patch, format!("/robots/{robot_id}"))
            .body(Self::to_body(&body)?)
            .build()?;
        self.fetch_record(&request).await
    }
}
