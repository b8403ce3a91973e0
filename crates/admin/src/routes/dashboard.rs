//! Dashboard with headline counts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub product_count: i64,
    pub order_count: i64,
    pub pending_order_count: i64,
    pub customer_count: i64,
}

/// Display the dashboard.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let (product_count, order_count, pending_order_count, customer_count): (i64, i64, i64, i64) =
        sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM products),
                    (SELECT COUNT(*) FROM orders),
                    (SELECT COUNT(*) FROM orders WHERE status = 'pending'),
                    (SELECT COUNT(*) FROM users WHERE role = 'user')",
        )
        .fetch_one(state.pool())
        .await
        .map_err(crate::db::RepositoryError::from)?;

    Ok(DashboardTemplate {
        admin_name: admin.name,
        product_count,
        order_count,
        pending_order_count,
        customer_count,
    })
}
