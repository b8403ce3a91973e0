//! Category navigation queries.

use sqlx::PgPool;

use gadgetgrid_core::{CategoryId, SubcategoryId};

use super::RepositoryError;

/// An active category with its active subcategories.
#[derive(Debug, Clone)]
pub struct CategoryTree {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub subcategories: Vec<Subcategory>,
}

/// An active subcategory.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// All active categories with their active subcategories, for the nav and
/// the home page grid.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn active_tree(pool: &PgPool) -> Result<Vec<CategoryTree>, RepositoryError> {
    let categories: Vec<(CategoryId, String, String, Option<String>)> = sqlx::query_as(
        "SELECT id, name, slug, image
         FROM categories
         WHERE is_active
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    let subcategories = sqlx::query_as::<_, Subcategory>(
        "SELECT id, category_id, name, slug
         FROM subcategories
         WHERE is_active
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    let tree = categories
        .into_iter()
        .map(|(id, name, slug, image)| CategoryTree {
            id,
            name,
            slug,
            image,
            subcategories: subcategories
                .iter()
                .filter(|s| s.category_id == id)
                .cloned()
                .collect(),
        })
        .collect();

    Ok(tree)
}
