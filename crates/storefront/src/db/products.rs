//! Catalog read queries for the storefront.
//!
//! Only active products are ever returned here; admin CRUD lives in the
//! admin binary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use gadgetgrid_core::{ProductId, SubcategoryId};

use super::RepositoryError;

/// A catalog product as the storefront sees it.
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
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// First image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.0.first().map(String::as_str)
    }
}

/// Filters for the product listing page.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: bool,
    pub sort: ProductSort,
}

/// Sort order for the product listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    /// Parse the `sort` query parameter; unknown values fall back to newest.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    /// The query-parameter spelling of this sort order.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "p.created_at DESC",
            Self::PriceAsc => "p.price ASC",
            Self::PriceDesc => "p.price DESC",
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, slug, description, price, sale_price, stock, \
     subcategory_id, images, is_featured, is_new_arrival, created_at";

/// List active products matching the given filters, optionally narrowed to a
/// category or subcategory slug.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_active(
    pool: &PgPool,
    category_slug: Option<&str>,
    subcategory_slug: Option<&str>,
    filter: &ProductFilter,
) -> Result<Vec<Product>, RepositoryError> {
    // ORDER BY comes from a fixed enum, never from user input.
    let sql = format!(
        "SELECT {}
         FROM products p
         LEFT JOIN subcategories s ON s.id = p.subcategory_id
         LEFT JOIN categories c ON c.id = s.category_id
         WHERE p.is_active
           AND ($1::text IS NULL OR c.slug = $1)
           AND ($2::text IS NULL OR s.slug = $2)
           AND ($3::numeric IS NULL OR p.price >= $3)
           AND ($4::numeric IS NULL OR p.price <= $4)
           AND (NOT $5 OR p.stock >= 1)
         ORDER BY {}",
        prefixed_columns(),
        filter.sort.order_by()
    );

    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(category_slug)
        .bind(subcategory_slug)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.in_stock)
        .fetch_all(pool)
        .await?;

    Ok(products)
}

/// `PRODUCT_COLUMNS` with a `p.` prefix for joined queries.
fn prefixed_columns() -> String {
    PRODUCT_COLUMNS
        .split(", ")
        .map(|c| format!("p.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Featured products for the home page.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn featured(pool: &PgPool, limit: i64) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS}
         FROM products
         WHERE is_active AND is_featured
         ORDER BY created_at DESC
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// New arrivals for the home page.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn new_arrivals(pool: &PgPool, limit: i64) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS}
         FROM products
         WHERE is_active AND is_new_arrival
         ORDER BY created_at DESC
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Look up one active product by its URL slug.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS}
         FROM products
         WHERE is_active AND slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// A handful of other active products, for the "related" strip.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn related(
    pool: &PgPool,
    exclude: ProductId,
    limit: i64,
) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS}
         FROM products
         WHERE is_active AND id <> $1
         ORDER BY created_at DESC
         LIMIT $2"
    ))
    .bind(exclude)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_from_query() {
        assert_eq!(
            ProductSort::from_query(Some("price_asc")),
            ProductSort::PriceAsc
        );
        assert_eq!(
            ProductSort::from_query(Some("price_desc")),
            ProductSort::PriceDesc
        );
        assert_eq!(ProductSort::from_query(Some("bogus")), ProductSort::Newest);
        assert_eq!(ProductSort::from_query(None), ProductSort::Newest);
    }
}
