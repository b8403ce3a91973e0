//! User lookups for back-office sign-in.
//!
//! The role gate itself lives in `services::auth`; this module only reads.

use sqlx::PgPool;

use gadgetgrid_core::{Email, UserId, UserRole};

use super::RepositoryError;

/// A user as needed for authentication.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: UserRole = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("user {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            role,
        })
    }
}

/// Get a user and their password hash by email.
///
/// Returns `None` if the user doesn't exist or has no password set.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails, or
/// `RepositoryError::DataCorruption` if a stored field is invalid.
pub async fn get_password_hash(
    pool: &PgPool,
    email: &Email,
) -> Result<Option<(User, String)>, RepositoryError> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        user: UserRow,
        password_hash: Option<String>,
    }

    let row = sqlx::query_as::<_, Row>(
        "SELECT u.id, u.name, u.email, u.role, p.password_hash
         FROM users u
         LEFT JOIN user_passwords p ON u.id = p.user_id
         WHERE u.email = $1",
    )
    .bind(email.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(r) = row else {
        return Ok(None);
    };

    let Some(password_hash) = r.password_hash else {
        return Ok(None);
    };

    Ok(Some((User::try_from(r.user)?, password_hash)))
}
