//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::addresses::{self, Address};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::cart::CartView;
use crate::services::cart as cart_service;
use crate::services::checkout::{self, CheckoutError};
use crate::state::AppState;

/// The only payment method currently offered.
const DEFAULT_PAYMENT_METHOD: &str = "cod";

/// Address display data for the checkout and account pages.
#[derive(Clone)]
pub struct AddressView {
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub summary: String,
    pub is_selected: bool,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.as_i32(),
            name: address.name.clone(),
            mobile: address.mobile.clone(),
            summary: address.snapshot().summary(),
            is_selected: address.is_selected,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub addresses: Vec<AddressView>,
    pub has_selected_address: bool,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub order_id: i32,
    pub final_amount: String,
}

/// Place order form data.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderForm {
    pub payment_method: Option<String>,
}

/// Display the checkout page: cart summary plus the address book.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response> {
    let Some(cart) = cart_service::resolve(state.pool(), &session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };

    let lines = crate::db::carts::lines(state.pool(), cart.id).await?;
    if lines.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let addresses = addresses::list_for_user(state.pool(), user.id).await?;
    let has_selected_address = addresses.iter().any(|a| a.is_selected);

    Ok(CheckoutTemplate {
        cart: CartView::from_lines(&lines),
        addresses: addresses.iter().map(AddressView::from).collect(),
        has_selected_address,
    }
    .into_response())
}

/// Place the order and redirect to the confirmation page.
#[instrument(skip(state, session, user))]
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<PlaceOrderForm>,
) -> Result<Response> {
    let Some(token) = cart_service::token(&session).await else {
        return Err(AppError::Checkout(CheckoutError::CartNotFound));
    };

    let payment_method = form
        .payment_method
        .as_deref()
        .unwrap_or(DEFAULT_PAYMENT_METHOD);

    let order_id = checkout::place_order(state.pool(), &token, user.id, payment_method).await?;

    Ok(Redirect::to(&format!("/checkout/success/{order_id}")).into_response())
}

/// Display the order confirmation page.
#[instrument(skip(state, user))]
pub async fn success(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let order = crate::db::orders::get_for_user(state.pool(), user.id, id.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(CheckoutSuccessTemplate {
        order_id: order.id.as_i32(),
        final_amount: money::format_amount(order.final_amount),
    })
}
