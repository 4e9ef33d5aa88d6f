//! Authentication primitives: JWT tokens, password hashing, and the
//! first-run admin bootstrap.

pub mod jwt;
pub mod password;

use folio_core::roles::ROLE_ADMIN;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use folio_db::DbPool;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Create the initial admin account on first run.
///
/// Runs only when the users table is empty and both `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` are configured; otherwise it is a no-op. Once any
/// account exists the env vars are ignored, so changing them later does
/// not overwrite credentials.
pub async fn bootstrap_admin(pool: &DbPool, config: &ServerConfig) -> AppResult<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let password_hash = password::hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrapped admin account");
    Ok(())
}
