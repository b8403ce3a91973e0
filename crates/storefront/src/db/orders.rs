//! Order history reads for the storefront.
//!
//! Order *creation* lives in `services::checkout`; these queries only read
//! back what was committed there.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use gadgetgrid_core::{
    OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, ShippingAddress, UserId,
};

use super::RepositoryError;

/// An order header as stored.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}

/// An order line item: the immutable audit record of what was charged.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    /// Current product name, joined for display. May lag renames; the price
    /// never does.
    pub product_name: String,
}

/// Raw row with statuses as text, parsed into [`Order`].
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: Option<UserId>,
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

const ORDER_COLUMNS: &str = "id, user_id, status, payment_status, payment_method, total_amount, \
     discount_amount, final_amount, shipping_address, created_at";

/// A user's order history, most recent first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails, or
/// `RepositoryError::DataCorruption` if a stored status is unknown.
pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS}
         FROM orders
         WHERE user_id = $1
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Order::try_from).collect()
}

/// One of the user's orders by id. Scoped to the user so order ids cannot be
/// enumerated across accounts.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails, or
/// `RepositoryError::DataCorruption` if a stored status is unknown.
pub async fn get_for_user(
    pool: &PgPool,
    user_id: UserId,
    order_id: OrderId,
) -> Result<Option<Order>, RepositoryError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS}
         FROM orders
         WHERE user_id = $1 AND id = $2"
    ))
    .bind(user_id)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    row.map(Order::try_from).transpose()
}

/// Line items for an order, joined with current product names.
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
