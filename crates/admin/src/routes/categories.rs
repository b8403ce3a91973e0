//! Category management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::categories::{self, Category, Subcategory};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A category with its subcategories, for the list page.
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub subcategories: Vec<SubcategoryView>,
}

/// A subcategory row.
pub struct SubcategoryView {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

/// Categories page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<CategoryView>,
}

/// New category form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub image: Option<String>,
}

/// New subcategory form data.
#[derive(Debug, Deserialize)]
pub struct SubcategoryForm {
    pub category_id: i32,
    pub name: String,
}

fn group(cats: &[Category], subs: &[Subcategory]) -> Vec<CategoryView> {
    cats.iter()
        .map(|c| CategoryView {
            id: c.id.as_i32(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            is_active: c.is_active,
            subcategories: subs
                .iter()
                .filter(|s| s.category_id == c.id)
                .map(|s| SubcategoryView {
                    name: s.name.clone(),
                    slug: s.slug.clone(),
                    is_active: s.is_active,
                })
                .collect(),
        })
        .collect()
}

/// Display all categories with their subcategories.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let cats = categories::list(state.pool()).await?;
    let subs = categories::list_subcategories(state.pool()).await?;

    Ok(CategoriesTemplate {
        categories: group(&cats, &subs),
    })
}

/// Create a category.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let image = form.image.as_deref().map(str::trim).filter(|i| !i.is_empty());
    categories::create(state.pool(), form.name.trim(), image).await?;

    Ok(Redirect::to("/categories").into_response())
}

/// Create a subcategory.
#[instrument(skip(state, admin, form))]
pub async fn create_subcategory(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<SubcategoryForm>,
) -> Result<Response> {
    categories::create_subcategory(state.pool(), form.category_id.into(), form.name.trim())
        .await?;

    Ok(Redirect::to("/categories").into_response())
}

/// Toggle a category's active flag.
#[instrument(skip(state, admin))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    categories::toggle_active(state.pool(), id.into()).await?;

    Ok(Redirect::to("/categories").into_response())
}

/// Delete a category and its subcategories.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    categories::delete(state.pool(), id.into()).await?;

    Ok(Redirect::to("/categories").into_response())
}
