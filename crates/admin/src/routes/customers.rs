//! Customer overview route.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::customers::{self, Customer};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A customer row with lifetime totals.
pub struct CustomerView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub order_count: i64,
    pub total_spent: String,
}

impl From<&Customer> for CustomerView {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            email: c.email.clone(),
            role: c.role.clone(),
            joined_at: c.created_at,
            order_count: c.order_count,
            total_spent: money::format_amount(c.total_spent),
        }
    }
}

/// Customers page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersTemplate {
    pub customers: Vec<CustomerView>,
}

/// Display all users with their order counts and totals.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let customers = customers::list(state.pool()).await?;

    Ok(CustomersTemplate {
        customers: customers.iter().map(CustomerView::from).collect(),
    })
}
