//! Catalog product CRUD.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use gadgetgrid_core::{ProductId, SubcategoryId, slug::slugify};

use super::RepositoryError;

/// A product as the back-office sees it (inactive rows included).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub stock: i32,
    pub subcategory_id: Option<SubcategoryId>,
    pub images: Json<Vec<String>>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub stock: i32,
    pub subcategory_id: Option<SubcategoryId>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
}

const PRODUCT_COLUMNS: &str = "id, name, slug, description, price, sale_price, stock, \
     subcategory_id, images, is_active, is_featured, is_new_arrival, created_at, updated_at";

/// All products, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// One product by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such product exists.
pub async fn get(pool: &PgPool, id: ProductId) -> Result<Product, RepositoryError> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// Create a product. The slug is derived from the name.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the derived slug already exists.
pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, RepositoryError> {
    let slug = slugify(&input.name);

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products
             (name, slug, description, price, sale_price, stock,
              subcategory_id, images, is_active, is_featured, is_new_arrival)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(&slug)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.sale_price)
    .bind(input.stock)
    .bind(input.subcategory_id)
    .bind(Json(&input.images))
    .bind(input.is_active)
    .bind(input.is_featured)
    .bind(input.is_new_arrival)
    .fetch_one(pool)
    .await
    .map_err(conflict_on_unique("product slug already exists"))?;

    Ok(product)
}

/// Update a product. The slug follows the (possibly renamed) name.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such product exists, or
/// `RepositoryError::Conflict` if the new slug collides.
pub async fn update(
    pool: &PgPool,
    id: ProductId,
    input: &ProductInput,
) -> Result<Product, RepositoryError> {
    let slug = slugify(&input.name);

    sqlx::query_as::<_, Product>(&format!(
        "UPDATE products
         SET name = $2, slug = $3, description = $4, price = $5, sale_price = $6,
             stock = $7, subcategory_id = $8, images = $9, is_active = $10,
             is_featured = $11, is_new_arrival = $12, updated_at = NOW()
         WHERE id = $1
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&slug)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.sale_price)
    .bind(input.stock)
    .bind(input.subcategory_id)
    .bind(Json(&input.images))
    .bind(input.is_active)
    .bind(input.is_featured)
    .bind(input.is_new_arrival)
    .fetch_optional(pool)
    .await
    .map_err(conflict_on_unique("product slug already exists"))?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a product.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such product exists.
pub async fn delete(pool: &PgPool, id: ProductId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Map unique violations to `Conflict`, everything else to `Database`.
pub(crate) fn conflict_on_unique(message: &str) -> impl Fn(sqlx::Error) -> RepositoryError + '_ {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}
