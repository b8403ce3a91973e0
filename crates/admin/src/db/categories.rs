//! Category and subcategory CRUD.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gadgetgrid_core::{CategoryId, SubcategoryId, slug::slugify};

use super::RepositoryError;
use super::products::conflict_on_unique;

/// A category row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A subcategory row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

/// All categories, alphabetically.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Category>, RepositoryError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, image, is_active, created_at
         FROM categories
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// All subcategories, alphabetically.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_subcategories(pool: &PgPool) -> Result<Vec<Subcategory>, RepositoryError> {
    let subcategories = sqlx::query_as::<_, Subcategory>(
        "SELECT id, category_id, name, slug, is_active
         FROM subcategories
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(subcategories)
}

/// Create a category. The slug is derived from the name.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the derived slug already exists.
pub async fn create(
    pool: &PgPool,
    name: &str,
    image: Option<&str>,
) -> Result<Category, RepositoryError> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug, image)
         VALUES ($1, $2, $3)
         RETURNING id, name, slug, image, is_active, created_at",
    )
    .bind(name)
    .bind(slugify(name))
    .bind(image)
    .fetch_one(pool)
    .await
    .map_err(conflict_on_unique("category slug already exists"))?;

    Ok(category)
}

/// Create a subcategory under a category.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the derived slug already exists.
pub async fn create_subcategory(
    pool: &PgPool,
    category_id: CategoryId,
    name: &str,
) -> Result<Subcategory, RepositoryError> {
    let subcategory = sqlx::query_as::<_, Subcategory>(
        "INSERT INTO subcategories (category_id, name, slug)
         VALUES ($1, $2, $3)
         RETURNING id, category_id, name, slug, is_active",
    )
    .bind(category_id)
    .bind(name)
    .bind(slugify(name))
    .fetch_one(pool)
    .await
    .map_err(conflict_on_unique("subcategory slug already exists"))?;

    Ok(subcategory)
}

/// Flip a category's active flag.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such category exists.
pub async fn toggle_active(pool: &PgPool, id: CategoryId) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE categories SET is_active = NOT is_active WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Delete a category and, via cascade, its subcategories.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such category exists.
pub async fn delete(pool: &PgPool, id: CategoryId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
