//! Robot credentials files.
//!
//! A credentials file is the JSON description of a robot account together
//! with its secret. It is written once, from the result of creating the
//! robot, and later read back to authenticate a client.
//!
//! Only `name` and `secret` are required. They are checked when the file is
//! loaded so that a broken file fails fast instead of producing
//! unauthenticated requests.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CredentialsFileError;
use crate::models::{Access, Robot, RobotCreate, RobotCreated, RobotPermission};

/// The permission scope of a robot (`permissionScope` in the file).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PermissionScope {
    /// Whether the scope covers all projects.
    #[serde(rename = "coverAll", alias = "cover_all")]
    pub cover_all: bool,

    /// The granted actions.
    #[serde(default)]
    pub access: Vec<Access>,
}

/// A robot account definition with its secret.
///
/// Unknown fields are kept in `extra` and written back on save.
///
/// # Example
///
/// ```rust
/// use harbor_api::auth::CredentialsFile;
///
/// let file: CredentialsFile = serde_json::from_str(
///     r#"{"name": "robot$ci", "secret": "s3cret", "level": "system"}"#,
/// ).unwrap();
/// assert_eq!(file.name, "robot$ci");
/// assert!(file.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CredentialsFile {
    /// The full robot name used as the Basic auth username.
    #[serde(default)]
    pub name: String,

    /// The robot secret used as the Basic auth password.
    #[serde(default)]
    pub secret: String,

    /// The unique identifier of the robot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The level of the robot (`system` or `project`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Lifetime in days, `-1` for never expiring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    /// Whether the robot can be edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,

    /// Whether the robot is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,

    /// Expiration as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// The robot's permissions.
    #[serde(default)]
    pub permissions: Vec<RobotPermission>,

    /// The robot's permission scope.
    #[serde(
        rename = "permissionScope",
        alias = "permission_scope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_scope: Option<PermissionScope>,

    /// When the robot was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the robot was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CredentialsFile {
    /// Builds a credentials file from a create-robot request and its result.
    ///
    /// The server-assigned name (with its `robot$` prefix) and the generated
    /// secret come from `created`; the remaining definition from `create`.
    #[must_use]
    pub fn from_robot_create(create: &RobotCreate, created: &RobotCreated) -> Self {
        Self {
            name: created
                .name
                .clone()
                .or_else(|| create.name.clone())
                .unwrap_or_default(),
            secret: created
                .secret
                .clone()
                .or_else(|| create.secret.clone())
                .unwrap_or_default(),
            id: created.id,
            description: create.description.clone(),
            level: create.level.clone(),
            duration: create.duration,
            disable: create.disable,
            expires_at: created.expires_at,
            permissions: create.permissions.clone(),
            creation_time: created.creation_time,
            ..Self::default()
        }
    }

    /// Builds a credentials file from a robot definition and a secret.
    #[must_use]
    pub fn from_robot(robot: &Robot, secret: impl Into<String>) -> Self {
        Self {
            name: robot.name.clone().unwrap_or_default(),
            secret: secret.into(),
            id: robot.id,
            description: robot.description.clone(),
            level: robot.level.clone(),
            duration: robot.duration,
            editable: robot.editable,
            disable: robot.disable,
            expires_at: robot.expires_at,
            permissions: robot.permissions.clone(),
            creation_time: robot.creation_time,
            update_time: robot.update_time,
            ..Self::default()
        }
    }

    /// Checks that the fields needed for authentication are present.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsFileError::MissingField`] if `name` or `secret`
    /// is empty.
    pub fn validate(&self) -> Result<(), CredentialsFileError> {
        if self.name.is_empty() {
            return Err(CredentialsFileError::MissingField { field: "name" });
        }
        if self.secret.is_empty() {
            return Err(CredentialsFileError::MissingField { field: "secret" });
        }
        Ok(())
    }

    /// Returns the expiration time, if the robot expires.
    #[must_use]
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .filter(|ts| *ts > 0)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Reads and validates a credentials file.
///
/// # Errors
///
/// IO and JSON errors are returned unchanged as
/// [`CredentialsFileError::Io`] and [`CredentialsFileError::Parse`]. A file
/// without `name` or `secret` fails with
/// [`CredentialsFileError::MissingField`].
pub fn load_credentials_file(path: impl AsRef<Path>) -> Result<CredentialsFile, CredentialsFileError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let file: CredentialsFile = serde_json::from_str(&contents)?;
    file.validate()?;
    Ok(file)
}

/// Writes a credentials file as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CredentialsFileError::MissingField`] if the file could not be
/// loaded back, [`CredentialsFileError::AlreadyExists`] if the destination
/// exists and `overwrite` is `false`, or [`CredentialsFileError::Io`] if
/// writing fails.
pub fn save_credentials_file(
    path: impl AsRef<Path>,
    file: &CredentialsFile,
    overwrite: bool,
) -> Result<(), CredentialsFileError> {
    file.validate()?;
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Err(CredentialsFileError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let contents = serde_json::to_string_pretty(file)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_name_fails_validation() {
        let file: CredentialsFile = serde_json::from_value(json!({"secret": "s"})).unwrap();
        assert!(matches!(
            file.validate(),
            Err(CredentialsFileError::MissingField { field: "name" })
        ));
    }

    #[test]
    fn test_empty_secret_fails_validation() {
        let file: CredentialsFile =
            serde_json::from_value(json!({"name": "robot$ci", "secret": ""})).unwrap();
        assert!(matches!(
            file.validate(),
            Err(CredentialsFileError::MissingField { field: "secret" })
        ));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let file: CredentialsFile = serde_json::from_value(json!({
            "name": "robot$ci",
            "secret": "s",
            "custom": 42
        }))
        .unwrap();
        assert_eq!(file.extra.get("custom"), Some(&json!(42)));

        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["custom"], json!(42));
    }

    #[test]
    fn test_permission_scope_accepts_both_spellings() {
        let camel: CredentialsFile = serde_json::from_value(json!({
            "name": "n", "secret": "s",
            "permissionScope": {"coverAll": true, "access": []}
        }))
        .unwrap();
        let snake: CredentialsFile = serde_json::from_value(json!({
            "name": "n", "secret": "s",
            "permission_scope": {"cover_all": true, "access": []}
        }))
        .unwrap();
        assert_eq!(camel.permission_scope, snake.permission_scope);
        assert!(camel.permission_scope.unwrap().cover_all);
    }

    #[test]
    fn test_from_robot_create_prefers_server_name_and_secret() {
        let create = RobotCreate {
            name: Some("ci".to_string()),
            level: Some("system".to_string()),
            duration: Some(30),
            ..Default::default()
        };
        let created = RobotCreated {
            id: Some(7),
            name: Some("robot$ci".to_string()),
            secret: Some("generated".to_string()),
            ..Default::default()
        };

        let file = CredentialsFile::from_robot_create(&create, &created);
        assert_eq!(file.name, "robot$ci");
        assert_eq!(file.secret, "generated");
        assert_eq!(file.id, Some(7));
        assert_eq!(file.level.as_deref(), Some("system"));
        assert_eq!(file.duration, Some(30));
    }

    #[test]
    fn test_from_robot_uses_given_secret() {
        let robot = Robot {
            id: Some(3),
            name: Some("robot$deploy".to_string()),
            ..Default::default()
        };
        let file = CredentialsFile::from_robot(&robot, "new-secret");
        assert_eq!(file.name, "robot$deploy");
        assert_eq!(file.secret, "new-secret");
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_expires_converts_unix_timestamp() {
        let file = CredentialsFile {
            expires_at: Some(1_659_273_646),
            ..Default::default()
        };
        assert_eq!(
            file.expires().unwrap().to_rfc3339(),
            "2022-07-31T13:20:46+00:00"
        );

        let never = CredentialsFile {
            expires_at: Some(-1),
            ..Default::default()
        };
        assert!(never.expires().is_none());
    }
}
