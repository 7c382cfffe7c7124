//! Services for the content console.

pub mod auth;

pub use auth::{AdminAuthService, AuthError};
