//! Admin account commands.

use rand::distr::{Alphanumeric, SampleString};

use atelier_admin::services::{AdminAuthService, AuthError};
use atelier_core::AdminRole;

use super::ConnectError;

/// Length of generated passwords.
const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Errors that can occur while managing accounts.
#[derive(Debug, thiserror::Error)]
pub enum AdminCommandError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Unknown role '{0}' (expected 'admin' or 'viewer')")]
    UnknownRole(String),
}

/// Create a new admin account.
///
/// If no password is given, a random one is generated and printed once.
///
/// # Errors
///
/// Returns `AdminCommandError` on connection, validation, or conflict
/// failures.
pub async fn create_account(
    email: &str,
    name: &str,
    password: Option<&str>,
    role: &str,
) -> Result<(), AdminCommandError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminCommandError::UnknownRole(role.to_string()))?;

    let generated = password
        .is_none()
        .then(|| Alphanumeric.sample_string(&mut rand::rng(), GENERATED_PASSWORD_LENGTH));
    let password = password.unwrap_or_else(|| generated.as_deref().unwrap_or_default());

    let pool = super::connect().await?;
    let service = AdminAuthService::new(&pool);
    let user = service.create_account(email, name, password, role).await?;

    tracing::info!(email = %user.email, role = %user.role, "admin account created");

    if let Some(generated) = generated {
        #[allow(clippy::print_stdout)]
        {
            println!("Generated password (shown once): {generated}");
        }
    }

    Ok(())
}

/// Replace an account's password.
///
/// # Errors
///
/// Returns `AdminCommandError` on connection or validation failures, or
/// if no account has this email.
pub async fn set_password(email: &str, password: &str) -> Result<(), AdminCommandError> {
    let pool = super::connect().await?;
    let service = AdminAuthService::new(&pool);

    service.set_password(email, password).await?;
    tracing::info!(%email, "password updated");

    Ok(())
}
