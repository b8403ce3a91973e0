//! Coupon CRUD.
//!
//! Coupons are admin-managed content only; checkout does not apply them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use gadgetgrid_core::CouponId;

use super::RepositoryError;
use super::products::conflict_on_unique;

/// A coupon row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub min_order_value: Option<Decimal>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a coupon.
#[derive(Debug, Clone)]
pub struct CouponInput {
    pub code: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub min_order_value: Option<Decimal>,
    pub expires_at: Option<DateTime<Utc>>,
}

const COUPON_COLUMNS: &str = "id, code, discount_type, discount_value, min_order_value, \
     is_active, expires_at, created_at";

/// All coupons, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Coupon>, RepositoryError> {
    let coupons = sqlx::query_as::<_, Coupon>(&format!(
        "SELECT {COUPON_COLUMNS} FROM coupons ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(coupons)
}

/// Create a coupon. Codes are stored uppercased so lookups are
/// case-insensitive by construction.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the code already exists.
pub async fn create(pool: &PgPool, input: &CouponInput) -> Result<Coupon, RepositoryError> {
    let code = input.code.trim().to_uppercase();

    let coupon = sqlx::query_as::<_, Coupon>(&format!(
        "INSERT INTO coupons (code, discount_type, discount_value, min_order_value, expires_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COUPON_COLUMNS}"
    ))
    .bind(&code)
    .bind(&input.discount_type)
    .bind(input.discount_value)
    .bind(input.min_order_value)
    .bind(input.expires_at)
    .fetch_one(pool)
    .await
    .map_err(conflict_on_unique("coupon code already exists"))?;

    Ok(coupon)
}

/// Flip a coupon's active flag.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such coupon exists.
pub async fn toggle_active(pool: &PgPool, id: CouponId) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE coupons SET is_active = NOT is_active WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Delete a coupon.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such coupon exists.
pub async fn delete(pool: &PgPool, id: CouponId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
