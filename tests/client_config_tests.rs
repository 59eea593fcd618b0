//! Integration tests for client configuration.
//!
//! These tests verify URL normalization, credential precedence and
//! credentials file handling, all of which happen before any request is sent.

use std::fs;

use harbor_api::auth::{load_credentials_file, save_credentials_file, CredentialsFile};
use harbor_api::{ApiVersion, ClientConfig, ConfigError, CredentialsFileError, RestClient};
use serde_json::json;

const ENCODED_USERNAME_SECRET: &str = "dXNlcm5hbWU6c2VjcmV0";

// ============================================================================
// URL Normalization
// ============================================================================

#[test]
fn test_root_url_variants_normalize_to_same_base() {
    let variants = [
        "https://harbor.example.com",
        "https://harbor.example.com/",
        "https://harbor.example.com/api",
        "https://harbor.example.com/api/",
        "https://harbor.example.com/api/v2.0",
        "https://harbor.example.com/api/v2.0/",
    ];

    for url in variants {
        let config = ClientConfig::builder()
            .url(url)
            .basic_token("token")
            .build()
            .unwrap();
        assert_eq!(
            config.base_url().as_ref(),
            "https://harbor.example.com/api/v2.0",
            "normalizing {url}"
        );
    }
}

#[test]
fn test_existing_version_segment_is_kept() {
    let config = ClientConfig::builder()
        .url("https://harbor.example.com/api/v")
        .version(ApiVersion::new("2.1"))
        .basic_token("token")
        .build()
        .unwrap();
    assert_eq!(config.base_url().as_ref(), "https://harbor.example.com/api/v");
}

#[test]
fn test_rest_client_exposes_base_url() {
    let config = ClientConfig::builder()
        .url("http://localhost:8080/api/")
        .basic_token("token")
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();
    assert_eq!(client.base_url().as_ref(), "http://localhost:8080/api/v2.0");
}

// ============================================================================
// Credential Precedence
// ============================================================================

#[test]
fn test_username_and_secret_win_over_token_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, r#"{"name": "robot$ci", "secret": "file-secret"}"#).unwrap();

    let config = ClientConfig::builder()
        .url("https://harbor.example.com")
        .username("username")
        .secret("secret")
        .basic_token("explicit-token")
        .credentials_file(&path)
        .build()
        .unwrap();

    assert_eq!(config.credentials().token(), ENCODED_USERNAME_SECRET);
}

#[test]
fn test_token_wins_over_file() {
    let config = ClientConfig::builder()
        .url("https://harbor.example.com")
        .basic_token("explicit-token")
        .credentials_file("/nonexistent/robot.json")
        .build()
        .unwrap();

    assert_eq!(config.credentials().token(), "explicit-token");
}

#[test]
fn test_credentials_file_is_used_last() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, r#"{"name": "username", "secret": "secret"}"#).unwrap();

    let config = ClientConfig::builder()
        .url("https://harbor.example.com")
        .credentials_file(&path)
        .build()
        .unwrap();

    assert_eq!(config.credentials().token(), ENCODED_USERNAME_SECRET);
}

#[test]
fn test_no_credentials_fails() {
    let result = ClientConfig::builder()
        .url("https://harbor.example.com")
        .build();
    assert!(matches!(result, Err(ConfigError::NoCredentials)));
}

// ============================================================================
// Credentials File Failures
// ============================================================================

#[test]
fn test_credentials_file_without_secret_fails_at_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, r#"{"name": "robot$ci"}"#).unwrap();

    let result = ClientConfig::builder()
        .url("https://harbor.example.com")
        .credentials_file(&path)
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::CredentialsFile(
            CredentialsFileError::MissingField { field: "secret" }
        ))
    ));
}

#[test]
fn test_credentials_file_without_name_fails_at_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, r#"{"secret": "s3cret"}"#).unwrap();

    let result = ClientConfig::builder()
        .url("https://harbor.example.com")
        .credentials_file(&path)
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::CredentialsFile(
            CredentialsFileError::MissingField { field: "name" }
        ))
    ));
}

#[test]
fn test_missing_credentials_file_keeps_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClientConfig::builder()
        .url("https://harbor.example.com")
        .credentials_file(dir.path().join("missing.json"))
        .build();

    match result {
        Err(ConfigError::CredentialsFile(CredentialsFileError::Io(e))) => {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected IO error, got {other:?}"),
    }
}

#[test]
fn test_malformed_credentials_file_keeps_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, "{not json").unwrap();

    let result = ClientConfig::builder()
        .url("https://harbor.example.com")
        .credentials_file(&path)
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::CredentialsFile(CredentialsFileError::Parse(_)))
    ));
}

// ============================================================================
// Credentials File Round Trip
// ============================================================================

#[test]
fn test_saved_credentials_file_can_be_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");

    let file: CredentialsFile = serde_json::from_value(json!({
        "name": "robot$ci",
        "secret": "s3cret",
        "level": "system",
        "duration": 30,
        "permissions": [{
            "kind": "project",
            "namespace": "library",
            "access": [{"resource": "repository", "action": "push"}]
        }]
    }))
    .unwrap();

    save_credentials_file(&path, &file, false).unwrap();
    let loaded = load_credentials_file(&path).unwrap();

    assert_eq!(loaded, file);
}

#[test]
fn test_save_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.json");
    fs::write(&path, "{}").unwrap();

    let file = CredentialsFile {
        name: "robot$ci".to_string(),
        secret: "s3cret".to_string(),
        ..Default::default()
    };

    let result = save_credentials_file(&path, &file, false);
    assert!(matches!(result, Err(CredentialsFileError::AlreadyExists { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

    save_credentials_file(&path, &file, true).unwrap();
    assert_eq!(load_credentials_file(&path).unwrap().name, "robot$ci");
}
