//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::categories::{self, CategoryTree};
use crate::db::products::{self, Product, ProductFilter, ProductSort};
use crate::db::wishlists;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Number of products shown in the "you may also like" strip.
const RELATED_LIMIT: i64 = 4;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub sale_price: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
    pub is_new: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: money::format_amount(product.price),
            sale_price: product.sale_price.map(money::format_amount),
            image: product.primary_image().map(String::from),
            in_stock: product.stock > 0,
            is_new: product.is_new_arrival,
        }
    }
}

/// Product detail display data.
pub struct ProductDetailView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub sale_price: Option<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub id: i32,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: money::format_amount(product.price),
            sale_price: product.sale_price.map(money::format_amount),
            images: product.images.0.clone(),
            in_stock: product.stock > 0,
            id: product.id.as_i32(),
        }
    }
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<bool>,
    pub sort: Option<String>,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryTree>,
    pub active_category: Option<String>,
    pub sort: &'static str,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub related: Vec<ProductCardView>,
    pub in_wishlist: bool,
}

/// Display the product listing with filters and sorting.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let sort = ProductSort::from_query(query.sort.as_deref());
    let filter = ProductFilter {
        min_price: query.min_price.as_deref().and_then(|v| v.parse().ok()),
        max_price: query.max_price.as_deref().and_then(|v| v.parse().ok()),
        in_stock: query.in_stock.unwrap_or(false),
        sort,
    };

    let listing = products::list_active(
        state.pool(),
        query.category.as_deref(),
        query.subcategory.as_deref(),
        &filter,
    )
    .await?;
    let categories = categories::active_tree(state.pool()).await?;

    Ok(ProductIndexTemplate {
        products: listing.iter().map(ProductCardView::from).collect(),
        categories,
        active_category: query.category,
        sort: sort.as_query(),
    })
}

/// Display a product detail page.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let product = products::get_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let related = products::related(state.pool(), product.id, RELATED_LIMIT).await?;

    let in_wishlist = match auth.0 {
        Some(user) => wishlists::contains(state.pool(), user.id, product.id).await?,
        None => false,
    };

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        related: related.iter().map(ProductCardView::from).collect(),
        in_wishlist,
    })
}
