//! Authentication for Harbor API requests.
//!
//! Every request carries a single `Authorization` header built from
//! [`Credentials`]. Credentials come from one of three sources, in order of
//! precedence:
//!
//! 1. A username and secret, encoded as HTTP Basic auth
//! 2. A pre-encoded token
//! 3. A robot [`CredentialsFile`] on disk
//!
//! # Example
//!
//! ```rust
//! use harbor_api::auth::{Credentials, CredentialsFile};
//!
//! let file = CredentialsFile {
//!     name: "robot$ci".to_string(),
//!     secret: "s3cret".to_string(),
//!     ..Default::default()
//! };
//! let credentials = Credentials::from_username_secret(&file.name, &file.secret);
//! assert!(credentials.header_value().starts_with("Basic "));
//! ```

mod credentials;
mod credentials_file;

pub use credentials::Credentials;
pub use credentials_file::{
    load_credentials_file, save_credentials_file, CredentialsFile, PermissionScope,
};
