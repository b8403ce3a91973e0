//! Back-office sign-in.
//!
//! Same email/password + argon2id verification as the storefront, with one
//! extra gate: only accounts carrying the admin role may sign in. There is
//! no self-registration; admin accounts are created via `gg-cli admin`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;

use gadgetgrid_core::{Email, UserRole};

use crate::db::RepositoryError;
use crate::db::users::{self, User};

/// Errors that can occur during admin authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] gadgetgrid_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid credentials, but the account is not an admin.
    #[error("account does not have admin access")]
    NotAdmin,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Sign in with email and password; the account must hold the admin role.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the email/password is wrong,
/// or `AuthError::NotAdmin` if the account holds the user role.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<User, AuthError> {
    let email = Email::parse(&email.to_lowercase())?;

    let (user, password_hash) = users::get_password_hash(pool, &email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    verify_password(password, &password_hash)?;

    if user.role != UserRole::Admin {
        return Err(AuthError::NotAdmin);
    }

    Ok(user)
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    use super::*;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hash")
            .to_string()
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let stored = hash("correct horse battery");
        assert!(verify_password("correct horse battery", &stored).is_ok());
        assert!(matches!(
            verify_password("wrong password", &stored),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::PasswordHash)
        ));
    }
}
