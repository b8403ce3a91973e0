//! Wishlist persistence.

use rust_decimal::Decimal;
use sqlx::PgPool;

use gadgetgrid_core::{ProductId, UserId, WishlistId};

use super::RepositoryError;

/// A wishlist entry joined with its product for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WishlistEntry {
    pub id: WishlistId,
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image: Option<String>,
}

/// Toggle a product on the user's wishlist.
///
/// Returns `true` if the product is now wishlisted, `false` if the toggle
/// removed it.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn toggle(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<bool, RepositoryError> {
    let removed = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

    if removed.rows_affected() > 0 {
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO wishlists (user_id, product_id)
         VALUES ($1, $2)
         ON CONFLICT (user_id, product_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(product_id)
    .execute(pool)
    .await?;

    Ok(true)
}

/// The user's wishlist, most recently added first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Vec<WishlistEntry>, RepositoryError> {
    let entries = sqlx::query_as::<_, WishlistEntry>(
        "SELECT w.id, w.product_id, p.name, p.slug, p.price, p.sale_price,
                p.images->>0 AS image
         FROM wishlists w
         INNER JOIN products p ON p.id = w.product_id
         WHERE w.user_id = $1
         ORDER BY w.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Whether a product is on the user's wishlist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn contains(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<bool, RepositoryError> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(
            SELECT 1 FROM wishlists WHERE user_id = $1 AND product_id = $2
        )",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
