//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::orders::{self, Order, OrderItem};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order summary display data for the history list.
pub struct OrderSummaryView {
    pub id: i32,
    pub status: String,
    pub final_amount: String,
    pub placed_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            status: order.status.to_string(),
            final_amount: money::format_amount(order.final_amount),
            placed_at: order.created_at,
        }
    }
}

/// Order item display data.
pub struct OrderItemView {
    pub name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: money::format_amount(item.price),
            line_total: money::format_amount(item.price * Decimal::from(item.quantity)),
        }
    }
}

/// Order detail display data.
pub struct OrderDetailView {
    pub id: i32,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub total_amount: String,
    pub discount_amount: String,
    pub final_amount: String,
    pub shipping_summary: String,
    pub recipient: String,
    pub placed_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method.clone(),
            total_amount: money::format_amount(order.total_amount),
            discount_amount: money::format_amount(order.discount_amount),
            final_amount: money::format_amount(order.final_amount),
            shipping_summary: order.shipping_address.summary(),
            recipient: order.shipping_address.name.clone(),
            placed_at: order.created_at,
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrderIndexTemplate {
    pub orders: Vec<OrderSummaryView>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
    pub items: Vec<OrderItemView>,
}

/// Display the signed-in user's order history.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let orders = orders::list_for_user(state.pool(), user.id).await?;

    Ok(OrderIndexTemplate {
        orders: orders.iter().map(OrderSummaryView::from).collect(),
    })
}

/// Display one order with its line items.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let order = orders::get_for_user(state.pool(), user.id, id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let items = orders::items(state.pool(), order.id).await?;

    Ok(OrderShowTemplate {
        order: OrderDetailView::from(&order),
        items: items.iter().map(OrderItemView::from).collect(),
    })
}
