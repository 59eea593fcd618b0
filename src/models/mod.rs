//! Data models for the Harbor endpoints covered by this crate.
//!
//! Fields are optional throughout because Harbor omits unset values; a field
//! that is present with the wrong JSON type is still a validation error.

mod errors;
mod robot;
mod user;

pub use errors::{ErrorEntry, Errors};
pub use robot::{Access, Robot, RobotCreate, RobotCreated, RobotPermission, RobotSec};
pub use user::{
    PasswordReq, Permission, UserCreationReq, UserProfile, UserResp, UserSearchRespItem,
    UserSysAdminFlag,
};
