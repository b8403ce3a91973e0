//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart token lives in the session; every mutation resolves it through
//! [`crate::services::cart`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gadgetgrid_core::money::{self, PricedLine};

use crate::db::carts::{self, CartLine};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
    pub image: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let unit = money::effective_unit_price(line.price, line.sale_price);
        Self {
            id: line.id.as_i32(),
            slug: line.slug.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: money::format_amount(unit),
            line_total: money::format_amount(unit * Decimal::from(line.quantity)),
            image: line.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: i64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: money::format_amount(Decimal::ZERO),
            item_count: 0,
        }
    }

    /// Build the view from cart lines, totalling with the shared price rules.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|l| PricedLine {
                price: l.price,
                sale_price: l.sale_price,
                quantity: l.quantity,
            })
            .collect();
        let totals = money::order_totals(&priced, Decimal::ZERO);

        Self {
            items: lines.iter().map(CartLineView::from).collect(),
            subtotal: money::format_amount(totals.total_amount),
            item_count: lines.iter().map(|l| i64::from(l.quantity)).sum(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<i32>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: i64,
}

/// Build the current cart view, empty when no cart is bound to the session.
async fn current_cart(state: &AppState, session: &Session) -> Result<CartView> {
    let Some(cart) = cart_service::resolve(state.pool(), session).await? else {
        return Ok(CartView::empty());
    };
    let lines = carts::lines(state.pool(), cart.id).await?;
    Ok(CartView::from_lines(&lines))
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let cart = current_cart(&state, &session).await?;
    Ok(CartShowTemplate { cart })
}

/// Add an item to the cart (HTMX).
///
/// Creates a cart on first use. Adding a product already in the cart
/// accumulates quantity. Returns the count badge plus a `cart-updated`
/// trigger so other fragments can refresh themselves.
#[instrument(skip(state, session, auth))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let user_id = auth.0.map(|u| u.id);
    let cart = cart_service::resolve_or_create(state.pool(), &session, user_id).await?;

    carts::add_line(
        state.pool(),
        cart.id,
        form.product_id.into(),
        form.quantity.unwrap_or(1),
    )
    .await?;

    let count = carts::item_count(state.pool(), cart.id).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Remove a line from the cart (HTMX).
///
/// The removal is scoped to the session's own cart; a line id belonging to
/// another cart is a no-op.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    if let Some(cart) = cart_service::resolve(state.pool(), &session).await? {
        carts::remove_line(state.pool(), cart.id, form.line_id.into()).await?;
    }

    let cart = current_cart(&state, &session).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let count = match cart_service::resolve(state.pool(), &session).await? {
        Some(cart) => carts::item_count(state.pool(), cart.id).await?,
        None => 0,
    };

    Ok(CartCountTemplate { count })
}
