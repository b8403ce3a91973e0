//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::wishlists::{self, WishlistEntry};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Wishlist entry display data.
pub struct WishlistEntryView {
    pub product_id: i32,
    pub slug: String,
    pub name: String,
    pub price: String,
    pub sale_price: Option<String>,
    pub image: Option<String>,
}

impl From<&WishlistEntry> for WishlistEntryView {
    fn from(entry: &WishlistEntry) -> Self {
        Self {
            product_id: entry.product_id.as_i32(),
            slug: entry.slug.clone(),
            name: entry.name.clone(),
            price: money::format_amount(entry.price),
            sale_price: entry.sale_price.map(money::format_amount),
            image: entry.image.clone(),
        }
    }
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/index.html")]
pub struct WishlistTemplate {
    pub entries: Vec<WishlistEntryView>,
}

/// Wishlist toggle button fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: i32,
    pub in_wishlist: bool,
}

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: i32,
}

/// Display the signed-in user's wishlist.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let entries = wishlists::list_for_user(state.pool(), user.id).await?;

    Ok(WishlistTemplate {
        entries: entries.iter().map(WishlistEntryView::from).collect(),
    })
}

/// Toggle a product on the wishlist (HTMX).
///
/// Returns the refreshed toggle button fragment.
#[instrument(skip(state, user))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ToggleForm>,
) -> Result<impl IntoResponse> {
    let in_wishlist = wishlists::toggle(state.pool(), user.id, form.product_id.into()).await?;

    Ok(WishlistButtonTemplate {
        product_id: form.product_id,
        in_wishlist,
    })
}
