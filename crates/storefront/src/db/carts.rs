//! Cart persistence.
//!
//! A cart is keyed by an opaque token held in the browser session. Line
//! items are normalized rows with a uniqueness guarantee per (cart, product)
//! pair; adding the same product again accumulates quantity instead of
//! inserting a second row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use gadgetgrid_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;

/// A cart row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Cart {
    pub id: CartId,
    pub session_token: String,
    pub user_id: Option<UserId>,
    pub updated_at: DateTime<Utc>,
    pub reminder_sent: bool,
}

/// A cart line joined with current product data for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image: Option<String>,
}

/// Find a cart by its opaque session token.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Cart>, RepositoryError> {
    let cart = sqlx::query_as::<_, Cart>(
        "SELECT id, session_token, user_id, updated_at, reminder_sent
         FROM carts
         WHERE session_token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

/// Create a new cart with a fresh opaque token, optionally bound to a
/// signed-in user. The caller persists the token in the session cookie.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create(pool: &PgPool, user_id: Option<UserId>) -> Result<Cart, RepositoryError> {
    let token = Uuid::new_v4().to_string();

    let cart = sqlx::query_as::<_, Cart>(
        "INSERT INTO carts (session_token, user_id)
         VALUES ($1, $2)
         RETURNING id, session_token, user_id, updated_at, reminder_sent",
    )
    .bind(&token)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(cart)
}

/// Load the cart's lines joined with current product data.
///
/// A line whose product row has vanished is silently absent (the inner join
/// drops it), mirroring the referential-integrity assumption of the schema.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lines(pool: &PgPool, cart_id: CartId) -> Result<Vec<CartLine>, RepositoryError> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT ci.id, ci.product_id, ci.quantity,
                p.name, p.slug, p.price, p.sale_price,
                p.images->>0 AS image
         FROM cart_items ci
         INNER JOIN products p ON p.id = ci.product_id
         WHERE ci.cart_id = $1
         ORDER BY ci.id",
    )
    .bind(cart_id)
    .fetch_all(pool)
    .await?;

    Ok(lines)
}

/// Total quantity across all lines, for the cart count badge.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn item_count(pool: &PgPool, cart_id: CartId) -> Result<i64, RepositoryError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(quantity), 0)
         FROM cart_items
         WHERE cart_id = $1",
    )
    .bind(cart_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Add a product to the cart, accumulating quantity if the line exists.
///
/// Also touches the cart's `updated_at` and resets `reminder_sent`, so the
/// abandoned-cart clock restarts on every mutation.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn add_line(
    pool: &PgPool,
    cart_id: CartId,
    product_id: ProductId,
    quantity: i32,
) -> Result<(), RepositoryError> {
    let quantity = quantity.max(1);

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO cart_items (cart_id, product_id, quantity)
         VALUES ($1, $2, $3)
         ON CONFLICT (cart_id, product_id)
         DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
    )
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .execute(&mut *tx)
    .await?;

    touch(&mut tx, cart_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Remove a line from the cart.
///
/// The delete is scoped to the cart id so a caller can only remove lines
/// from their own cart, whatever line id they send.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a statement fails.
pub async fn remove_line(
    pool: &PgPool,
    cart_id: CartId,
    line_id: CartItemId,
) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cart_items WHERE id = $1 AND cart_id = $2")
        .bind(line_id)
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;

    touch(&mut tx, cart_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Bind a previously anonymous cart to a user (on login).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn claim_for_user(
    pool: &PgPool,
    cart_id: CartId,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE carts SET user_id = $2 WHERE id = $1 AND user_id IS NULL")
        .bind(cart_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

async fn touch(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cart_id: CartId,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE carts SET updated_at = NOW(), reminder_sent = FALSE WHERE id = $1")
        .bind(cart_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
