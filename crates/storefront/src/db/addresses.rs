//! Buyer address book.
//!
//! At most one address per user carries the `is_selected` flag. Selection is
//! an unselect-all-then-select-one pair executed inside a single transaction
//! so a crash cannot leave a user with zero selected addresses.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gadgetgrid_core::{AddressId, ShippingAddress, UserId};

use super::RepositoryError;

/// A stored address.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub label: String,
    pub name: String,
    pub mobile: String,
    pub alt_phone: Option<String>,
    pub street: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_selected: bool,
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// Denormalized copy for embedding in an order at placement time.
    #[must_use]
    pub fn snapshot(&self) -> ShippingAddress {
        ShippingAddress {
            name: self.name.clone(),
            mobile: self.mobile.clone(),
            street: self.street.clone(),
            landmark: self.landmark.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
        }
    }
}

/// Fields for a new address.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub label: String,
    pub name: String,
    pub mobile: String,
    pub alt_phone: Option<String>,
    pub street: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

const ADDRESS_COLUMNS: &str = "id, user_id, label, name, mobile, alt_phone, street, landmark, \
     city, state, pincode, is_selected, created_at";

/// List a user's addresses, most recent first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
    let addresses = sqlx::query_as::<_, Address>(&format!(
        "SELECT {ADDRESS_COLUMNS}
         FROM addresses
         WHERE user_id = $1
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(addresses)
}

/// The user's currently selected address, if any.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn selected_for_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Option<Address>, RepositoryError> {
    let address = sqlx::query_as::<_, Address>(&format!(
        "SELECT {ADDRESS_COLUMNS}
         FROM addresses
         WHERE user_id = $1 AND is_selected
         LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(address)
}

/// Insert a new address. The user's first address becomes selected
/// automatically.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn insert(
    pool: &PgPool,
    user_id: UserId,
    new: &NewAddress,
) -> Result<Address, RepositoryError> {
    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM addresses WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    let address = sqlx::query_as::<_, Address>(&format!(
        "INSERT INTO addresses
             (user_id, label, name, mobile, alt_phone, street, landmark,
              city, state, pincode, is_selected)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING {ADDRESS_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&new.label)
    .bind(&new.name)
    .bind(&new.mobile)
    .bind(&new.alt_phone)
    .bind(&new.street)
    .bind(&new.landmark)
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.pincode)
    .bind(existing == 0)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(address)
}

/// Select one of the user's addresses, unselecting the rest.
///
/// Both updates run in one transaction; either the selection moves entirely
/// or not at all.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the address does not belong to the
/// user, `RepositoryError::Database` for query failures.
pub async fn select(
    pool: &PgPool,
    user_id: UserId,
    address_id: AddressId,
) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE addresses SET is_selected = FALSE WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let updated =
        sqlx::query("UPDATE addresses SET is_selected = TRUE WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(address_id)
            .execute(&mut *tx)
            .await?;

    if updated.rows_affected() == 0 {
        // Roll back rather than leaving the user with nothing selected.
        tx.rollback().await?;
        return Err(RepositoryError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}

/// Delete one of the user's addresses.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(
    pool: &PgPool,
    user_id: UserId,
    address_id: AddressId,
) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM addresses WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(address_id)
        .execute(pool)
        .await?;

    Ok(())
}
