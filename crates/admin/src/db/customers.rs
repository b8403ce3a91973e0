//! Customer listing with aggregate order stats.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use gadgetgrid_core::UserId;

use super::RepositoryError;

/// A registered user with their lifetime order totals.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub order_count: i64,
    pub total_spent: Decimal,
}

/// All users, newest first, with order counts and totals. Cancelled orders
/// count toward neither.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, RepositoryError> {
    let customers = sqlx::query_as::<_, Customer>(
        "SELECT u.id, u.name, u.email, u.role, u.created_at,
                COUNT(o.id) AS order_count,
                COALESCE(SUM(o.final_amount), 0) AS total_spent
         FROM users u
         LEFT JOIN orders o ON o.user_id = u.id AND o.status <> 'cancelled'
         GROUP BY u.id, u.name, u.email, u.role, u.created_at
         ORDER BY u.created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(customers)
}
