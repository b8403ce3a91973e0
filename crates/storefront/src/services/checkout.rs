//! Order placement.
//!
//! The one multi-statement write in the storefront. Placement resolves the
//! cart and the buyer's selected address, computes the price snapshot, then
//! commits the order header, its line items, and the cart clearing inside a
//! single database transaction. A failure anywhere in that transaction
//! leaves no half-written order and an intact cart.

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use gadgetgrid_core::money::{self, PricedLine};
use gadgetgrid_core::{OrderId, OrderStatus, PaymentStatus, UserId};

use crate::db::RepositoryError;
use crate::db::{addresses, carts};

/// Errors that can occur while placing an order.
///
/// The precondition variants carry the prose shown to the buyer.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// No cart is bound to this session.
    #[error("cart not found")]
    CartNotFound,

    /// The cart has no line items.
    #[error("cart is empty")]
    CartEmpty,

    /// The buyer has no selected delivery address.
    #[error("no delivery address selected")]
    NoAddressSelected,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Place an order from the cart bound to `cart_token`.
///
/// Steps, in order:
/// 1. Resolve the cart by token.
/// 2. Load its lines joined with current product prices.
/// 3. Compute totals (discount is fixed at zero).
/// 4. Resolve the buyer's selected address for the snapshot.
/// 5-7. In one transaction: insert the order header, insert one order item
///    per line with the effective unit price copied, delete the cart lines.
///
/// The order items are the permanent audit record of what was charged; they
/// are never recomputed from the product table afterwards.
///
/// # Errors
///
/// Returns a precondition `CheckoutError` before any write, or
/// `CheckoutError::Repository` if a statement fails (in which case the
/// transaction is rolled back and the cart is left intact).
#[instrument(skip(pool), fields(user = %user_id))]
pub async fn place_order(
    pool: &PgPool,
    cart_token: &str,
    user_id: UserId,
    payment_method: &str,
) -> Result<OrderId, CheckoutError> {
    // 1. Resolve the cart.
    let cart = carts::find_by_token(pool, cart_token)
        .await?
        .ok_or(CheckoutError::CartNotFound)?;

    // 2. Load lines with current prices.
    let lines = carts::lines(pool, cart.id).await?;
    if lines.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }

    // 3. Price snapshot. Server-side only, so the client can't tamper with it.
    let priced: Vec<PricedLine> = lines
        .iter()
        .map(|l| PricedLine {
            price: l.price,
            sale_price: l.sale_price,
            quantity: l.quantity,
        })
        .collect();
    let totals = money::order_totals(&priced, Decimal::ZERO);

    // 4. Address snapshot.
    let address = addresses::selected_for_user(pool, user_id)
        .await?
        .ok_or(CheckoutError::NoAddressSelected)?;
    let snapshot = address.snapshot();

    // 5-7. All-or-nothing.
    let mut tx = pool.begin().await?;

    let (order_id,): (OrderId,) = sqlx::query_as(
        "INSERT INTO orders
             (user_id, status, payment_status, payment_method,
              total_amount, discount_amount, final_amount, shipping_address)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id",
    )
    .bind(user_id)
    .bind(OrderStatus::Pending.as_str())
    .bind(PaymentStatus::Pending.as_str())
    .bind(payment_method)
    .bind(totals.total_amount)
    .bind(totals.discount_amount)
    .bind(totals.final_amount)
    .bind(Json(&snapshot))
    .fetch_one(&mut *tx)
    .await?;

    for line in &lines {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, price)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(money::effective_unit_price(line.price, line.sale_price))
        .execute(&mut *tx)
        .await?;
    }

    // Clear the cart lines; the cart row itself persists, empty.
    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
        .bind(cart.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order = %order_id,
        total = %money::format_amount(totals.final_amount),
        "Order placed"
    );

    Ok(order_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages_are_buyer_facing() {
        assert_eq!(CheckoutError::CartNotFound.to_string(), "cart not found");
        assert_eq!(CheckoutError::CartEmpty.to_string(), "cart is empty");
        assert_eq!(
            CheckoutError::NoAddressSelected.to_string(),
            "no delivery address selected"
        );
    }
}
