//! Request and response types for the Sky Genesis API

/// Authentication endpoint types
pub mod auth;
/// Shared types used across endpoints
pub mod common;
/// Project endpoint types
pub mod projects;
/// User endpoint types
pub mod users;

pub use auth::{AuthCredentials, AuthResponse, RefreshTokenRequest};
pub use common::{ListParams, ListResponse};
pub use projects::{Project, ProjectCreateParams, ProjectCreateParamsBuilder, ProjectUpdateParams};
pub use users::{User, UserCreateParams, UserCreateParamsBuilder, UserUpdateParams};
