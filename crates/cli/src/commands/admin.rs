//! Admin user management command.
//!
//! There is no self-service admin registration; this is the only way an
//! account gets the admin role. Running it against an existing email
//! promotes that account and resets its password.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use gadgetgrid_core::{Email, UserId};

use super::{CommandError, connect};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Create or promote an admin user. Returns the user's id.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<UserId, CommandError> {
    let email = Email::parse(&email.to_lowercase())
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CommandError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::InvalidInput(format!("password hashing failed: {e}")))?
        .to_string();

    let pool = connect().await?;

    let mut tx = pool.begin().await?;

    let user_id: UserId = sqlx::query_scalar(
        "INSERT INTO users (name, email, role)
         VALUES ($1, $2, 'admin')
         ON CONFLICT (email) DO UPDATE SET role = 'admin', updated_at = NOW()
         RETURNING id",
    )
    .bind(name)
    .bind(email.as_str())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO user_passwords (user_id, password_hash)
         VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET password_hash = EXCLUDED.password_hash",
    )
    .bind(user_id)
    .bind(&password_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Admin ready: id {}, email {}", user_id, email.as_str());
    Ok(user_id)
}
