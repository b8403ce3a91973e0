//! Order management: listing, detail, and guarded status transitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use gadgetgrid_core::{
    OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, ShippingAddress, UserId,
};

use super::RepositoryError;

/// An order as the back-office sees it, with the buyer joined in.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}

/// An order line item with the current product name joined for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub product_name: String,
}

/// Raw row with statuses as text, parsed into [`Order`].
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: Option<UserId>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    status: String,
    payment_status: String,
    payment_method: String,
    total_amount: Decimal,
    discount_amount: Decimal,
    final_amount: Decimal,
    shipping_address: Json<ShippingAddress>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("order {}: {e}", row.id)))?;
        let payment_status: PaymentStatus = row
            .payment_status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("order {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            status,
            payment_status,
            payment_method: row.payment_method,
            total_amount: row.total_amount,
            discount_amount: row.discount_amount,
            final_amount: row.final_amount,
            shipping_address: row.shipping_address.0,
            created_at: row.created_at,
        })
    }
}

const ORDER_COLUMNS: &str = "o.id, o.user_id, u.name AS customer_name, \
     u.email AS customer_email, o.status, o.payment_status, o.payment_method, \
     o.total_amount, o.discount_amount, o.final_amount, o.shipping_address, o.created_at";

/// All orders, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails, or
/// `RepositoryError::DataCorruption` if a stored status is unknown.
pub async fn list(
    pool: &PgPool,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, RepositoryError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS}
         FROM orders o
         LEFT JOIN users u ON u.id = o.user_id
         WHERE ($1::text IS NULL OR o.status = $1)
         ORDER BY o.created_at DESC"
    ))
    .bind(status.map(OrderStatus::as_str))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Order::try_from).collect()
}

/// One order by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such order exists, or
/// `RepositoryError::DataCorruption` if a stored status is unknown.
pub async fn get(pool: &PgPool, id: OrderId) -> Result<Order, RepositoryError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS}
         FROM orders o
         LEFT JOIN users u ON u.id = o.user_id
         WHERE o.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    Order::try_from(row)
}

/// Line items for an order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn items(pool: &PgPool, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT oi.id, oi.product_id, oi.quantity, oi.price,
                p.name AS product_name
         FROM order_items oi
         INNER JOIN products p ON p.id = oi.product_id
         WHERE oi.order_id = $1
         ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Move an order to `next`, enforcing the transition table.
///
/// The current status is read under `FOR UPDATE` so two concurrent updates
/// cannot both observe the same starting state.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such order exists,
/// `RepositoryError::InvalidTransition` if the move is illegal, or
/// `RepositoryError::DataCorruption` if the stored status is unknown.
pub async fn update_status(
    pool: &PgPool,
    id: OrderId,
    next: OrderStatus,
) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    let current: String =
        sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::NotFound)?;

    let current: OrderStatus = current
        .parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("order {id}: {e}")))?;

    if !current.can_transition_to(next) {
        return Err(RepositoryError::InvalidTransition(format!(
            "{current} -> {next}"
        )));
    }

    sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(next.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
