//! Order management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::{OrderStatus, money};

use crate::db::orders::{self, Order, OrderItem};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// An order row for the list page.
pub struct OrderRowView {
    pub id: i32,
    pub customer: String,
    pub status: String,
    pub payment_status: String,
    pub final_amount: String,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderRowView {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id.as_i32(),
            customer: o
                .customer_name
                .clone()
                .unwrap_or_else(|| "Guest".to_string()),
            status: o.status.to_string(),
            payment_status: o.payment_status.to_string(),
            final_amount: money::format_amount(o.final_amount),
            placed_at: o.created_at,
        }
    }
}

/// A line item for the detail page.
pub struct OrderItemView {
    pub product_name: String,
    pub quantity: i32,
    pub price: String,
    pub line_total: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            price: money::format_amount(item.price),
            line_total: money::format_amount(
                item.price * rust_decimal::Decimal::from(item.quantity),
            ),
        }
    }
}

/// Full order detail.
pub struct OrderDetailView {
    pub id: i32,
    pub customer: String,
    pub customer_email: Option<String>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub total_amount: String,
    pub discount_amount: String,
    pub final_amount: String,
    pub address_summary: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
    /// Statuses this order may legally move to.
    pub next_statuses: Vec<&'static str>,
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderRowView>,
    pub statuses: Vec<&'static str>,
    pub current_filter: Option<String>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
}

/// Query parameters for the order list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Display orders, optionally filtered by status.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let filter = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(v) => Some(
            v.parse::<OrderStatus>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
    };

    let orders = orders::list(state.pool(), filter).await?;

    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderRowView::from).collect(),
        statuses: OrderStatus::ALL.iter().map(|s| s.as_str()).collect(),
        current_filter: filter.map(|s| s.to_string()),
    })
}

/// Display one order with its line items.
#[instrument(skip(state, admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let order = orders::get(state.pool(), id.into()).await?;
    let items = orders::items(state.pool(), order.id).await?;

    let next_statuses = OrderStatus::ALL
        .iter()
        .copied()
        .filter(|next| order.status.can_transition_to(*next))
        .map(OrderStatus::as_str)
        .collect();

    Ok(OrderShowTemplate {
        order: OrderDetailView {
            id: order.id.as_i32(),
            customer: order
                .customer_name
                .clone()
                .unwrap_or_else(|| "Guest".to_string()),
            customer_email: order.customer_email.clone(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method.clone(),
            total_amount: money::format_amount(order.total_amount),
            discount_amount: money::format_amount(order.discount_amount),
            final_amount: money::format_amount(order.final_amount),
            address_summary: order.shipping_address.summary(),
            placed_at: order.created_at,
            items: items.iter().map(OrderItemView::from).collect(),
            next_statuses,
        },
    })
}

/// Move an order to a new status. Illegal transitions come back as 400.
#[instrument(skip(state, admin, form))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Response> {
    let next = form
        .status
        .parse::<OrderStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    orders::update_status(state.pool(), id.into(), next).await?;

    tracing::info!(order_id = id, status = %next, "Order status updated");
    Ok(Redirect::to(&format!("/orders/{id}")).into_response())
}
