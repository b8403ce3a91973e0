//! Product management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::products::{self, Product, ProductInput};
use crate::db::{RepositoryError, categories};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A product row for the list page, prices pre-formatted.
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub price: String,
    pub sale_price: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
}

impl From<&Product> for ProductRowView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.as_i32(),
            name: p.name.clone(),
            slug: p.slug.clone(),
            price: money::format_amount(p.price),
            sale_price: p.sale_price.map(money::format_amount),
            stock: p.stock,
            is_active: p.is_active,
            is_featured: p.is_featured,
            is_new_arrival: p.is_new_arrival,
        }
    }
}

/// Subcategory option for the edit form select.
pub struct SubcategoryOption {
    pub id: i32,
    pub label: String,
}

/// Pre-filled values for the edit form.
pub struct ProductFormView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub sale_price: String,
    pub stock: i32,
    pub subcategory_id: Option<i32>,
    pub images: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
}

impl From<&Product> for ProductFormView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.as_i32(),
            name: p.name.clone(),
            description: p.description.clone().unwrap_or_default(),
            price: money::format_amount(p.price),
            sale_price: p.sale_price.map(money::format_amount).unwrap_or_default(),
            stock: p.stock,
            subcategory_id: p.subcategory_id.map(|id| id.as_i32()),
            images: p.images.0.join("\n"),
            is_active: p.is_active,
            is_featured: p.is_featured,
            is_new_arrival: p.is_new_arrival,
        }
    }
}

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub products: Vec<ProductRowView>,
}

/// Product create/edit form template. `product` is `None` on the new form.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub product: Option<ProductFormView>,
    pub subcategories: Vec<SubcategoryOption>,
}

/// Product form data. Prices arrive as strings and are parsed to `Decimal`;
/// images as one URL per line; checkboxes are present-or-absent.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub sale_price: Option<String>,
    pub stock: i32,
    /// Empty string when "None" is selected, so this stays a string until
    /// parsed.
    pub subcategory_id: Option<String>,
    pub images: Option<String>,
    pub is_active: Option<String>,
    pub is_featured: Option<String>,
    pub is_new_arrival: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> Result<ProductInput> {
        let price = parse_amount(&self.price, "price")?;
        let sale_price = match self.sale_price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(parse_amount(v, "sale price")?),
        };

        let subcategory_id = match self.subcategory_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(
                v.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("invalid subcategory: {v}")))?
                    .into(),
            ),
        };

        let images = self
            .images
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        Ok(ProductInput {
            name: self.name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            price,
            sale_price,
            stock: self.stock,
            subcategory_id,
            images,
            is_active: self.is_active.is_some(),
            is_featured: self.is_featured.is_some(),
            is_new_arrival: self.is_new_arrival.is_some(),
        })
    }
}

/// Parse a money amount from a form field.
fn parse_amount(value: &str, field: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| AppError::BadRequest(format!("invalid {field}: {value}")))
}

async fn subcategory_options(state: &AppState) -> Result<Vec<SubcategoryOption>> {
    let cats = categories::list(state.pool()).await?;
    let subs = categories::list_subcategories(state.pool()).await?;

    Ok(subs
        .iter()
        .map(|s| {
            let parent = cats
                .iter()
                .find(|c| c.id == s.category_id)
                .map_or("?", |c| c.name.as_str());
            SubcategoryOption {
                id: s.id.as_i32(),
                label: format!("{parent} / {}", s.name),
            }
        })
        .collect())
}

/// Display all products.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let products = products::list(state.pool()).await?;

    Ok(ProductsTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the new-product form.
#[instrument(skip(state, admin))]
pub async fn new_form(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    Ok(ProductFormTemplate {
        product: None,
        subcategories: subcategory_options(&state).await?,
    })
}

/// Display the edit form for a product.
#[instrument(skip(state, admin))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let product = products::get(state.pool(), id.into()).await?;

    Ok(ProductFormTemplate {
        product: Some(ProductFormView::from(&product)),
        subcategories: subcategory_options(&state).await?,
    })
}

/// Create a product.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let input = form.into_input()?;
    let product = products::create(state.pool(), &input).await?;

    tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");
    Ok(Redirect::to("/products").into_response())
}

/// Update a product.
#[instrument(skip(state, admin, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let input = form.into_input()?;
    products::update(state.pool(), id.into(), &input).await?;

    Ok(Redirect::to("/products").into_response())
}

/// Delete a product.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    match products::delete(state.pool(), id.into()).await {
        Ok(()) | Err(RepositoryError::NotFound) => Ok(Redirect::to("/products").into_response()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, sale: Option<&str>) -> ProductForm {
        ProductForm {
            name: "Noise Buds".to_string(),
            description: Some("True wireless earbuds".to_string()),
            price: price.to_string(),
            sale_price: sale.map(ToOwned::to_owned),
            stock: 10,
            subcategory_id: Some(String::new()),
            images: Some("https://cdn.example.com/a.jpg\n\n  \nhttps://cdn.example.com/b.jpg".to_string()),
            is_active: Some("on".to_string()),
            is_featured: None,
            is_new_arrival: None,
        }
    }

    #[test]
    fn test_form_parses_prices_and_images() {
        let input = form("1999.00", Some("1499.00")).into_input().expect("input");
        assert_eq!(input.price.to_string(), "1999.00");
        assert_eq!(input.sale_price.map(|p| p.to_string()), Some("1499.00".to_string()));
        assert_eq!(input.images.len(), 2);
        assert!(input.is_active);
        assert!(!input.is_featured);
    }

    #[test]
    fn test_blank_sale_price_is_none() {
        let input = form("999.00", Some("  ")).into_input().expect("input");
        assert_eq!(input.sale_price, None);
    }

    #[test]
    fn test_bad_price_rejected() {
        assert!(form("not-a-number", None).into_input().is_err());
    }
}
