//! Abandoned-cart queries for the hourly reminder sweep.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gadgetgrid_core::{CartId, UserId};

use super::RepositoryError;

/// A cart eligible for an abandonment reminder: stale, owned by a signed-in
/// user, not yet reminded, and holding at least one line.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AbandonedCart {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub item_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// Carts last touched before `cutoff` that still need a reminder.
///
/// Anonymous carts are skipped; there is no address to mail.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn abandoned_before(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<Vec<AbandonedCart>, RepositoryError> {
    let carts = sqlx::query_as::<_, AbandonedCart>(
        "SELECT c.id AS cart_id, u.id AS user_id, u.name AS user_name,
                u.email AS user_email,
                (SELECT COUNT(*) FROM cart_items ci WHERE ci.cart_id = c.id) AS item_count,
                c.updated_at
         FROM carts c
         INNER JOIN users u ON u.id = c.user_id
         WHERE NOT c.reminder_sent
           AND c.updated_at < $1
           AND EXISTS (SELECT 1 FROM cart_items ci WHERE ci.cart_id = c.id)
         ORDER BY c.updated_at ASC",
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(carts)
}

/// Record that a reminder went out, so the next sweep skips this cart. Any
/// later cart mutation clears the flag and restarts the clock.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such cart exists.
pub async fn mark_reminder_sent(pool: &PgPool, cart_id: CartId) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE carts SET reminder_sent = TRUE WHERE id = $1")
        .bind(cart_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
