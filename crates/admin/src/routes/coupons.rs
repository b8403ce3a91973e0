//! Coupon management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::money;

use crate::db::RepositoryError;
use crate::db::coupons::{self, Coupon, CouponInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A coupon row for the list page.
pub struct CouponView {
    pub id: i32,
    pub code: String,
    pub discount: String,
    pub min_order_value: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Coupon> for CouponView {
    fn from(c: &Coupon) -> Self {
        let discount = if c.discount_type == "percent" {
            format!("{}%", c.discount_value.normalize())
        } else {
            format!("\u{20b9}{}", money::format_amount(c.discount_value))
        };

        Self {
            id: c.id.as_i32(),
            code: c.code.clone(),
            discount,
            min_order_value: c.min_order_value.map(money::format_amount),
            is_active: c.is_active,
            expires_at: c.expires_at,
            created_at: c.created_at,
        }
    }
}

/// Coupons page template.
#[derive(Template, WebTemplate)]
#[template(path = "coupons/index.html")]
pub struct CouponsTemplate {
    pub coupons: Vec<CouponView>,
    pub error: Option<String>,
}

/// New coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
    pub discount_type: String,
    pub discount_value: String,
    pub min_order_value: Option<String>,
    pub expires_at: Option<String>,
}

impl CouponForm {
    fn into_input(self) -> Result<CouponInput> {
        if !matches!(self.discount_type.as_str(), "fixed" | "percent") {
            return Err(AppError::BadRequest(format!(
                "unknown discount type: {}",
                self.discount_type
            )));
        }

        let discount_value = self
            .discount_value
            .trim()
            .parse::<Decimal>()
            .map_err(|_| AppError::BadRequest("invalid discount value".to_string()))?;

        let min_order_value = match self.min_order_value.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(
                v.parse::<Decimal>()
                    .map_err(|_| AppError::BadRequest("invalid minimum order value".to_string()))?,
            ),
        };

        // Date-only input; expiry is end of that day, UTC.
        let expires_at = match self.expires_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => {
                let date = v
                    .parse::<NaiveDate>()
                    .map_err(|_| AppError::BadRequest("invalid expiry date".to_string()))?;
                Some(
                    date.and_hms_opt(23, 59, 59)
                        .unwrap_or_else(|| date.into())
                        .and_utc(),
                )
            }
        };

        Ok(CouponInput {
            code: self.code,
            discount_type: self.discount_type,
            discount_value,
            min_order_value,
            expires_at,
        })
    }
}

/// Display all coupons.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let coupons = coupons::list(state.pool()).await?;

    Ok(CouponsTemplate {
        coupons: coupons.iter().map(CouponView::from).collect(),
        error: None,
    })
}

/// Create a coupon. A duplicate code re-renders the list with a message
/// instead of a bare 409.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<CouponForm>,
) -> Result<Response> {
    let input = form.into_input()?;

    match coupons::create(state.pool(), &input).await {
        Ok(_) => Ok(Redirect::to("/coupons").into_response()),
        Err(RepositoryError::Conflict(msg)) => {
            let all = coupons::list(state.pool()).await?;
            Ok(CouponsTemplate {
                coupons: all.iter().map(CouponView::from).collect(),
                error: Some(msg),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Toggle a coupon's active flag.
#[instrument(skip(state, admin))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    coupons::toggle_active(state.pool(), id.into()).await?;

    Ok(Redirect::to("/coupons").into_response())
}

/// Delete a coupon.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    coupons::delete(state.pool(), id.into()).await?;

    Ok(Redirect::to("/coupons").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CouponForm {
        CouponForm {
            code: "diwali50".to_string(),
            discount_type: "percent".to_string(),
            discount_value: "50".to_string(),
            min_order_value: Some("999".to_string()),
            expires_at: Some("2026-11-15".to_string()),
        }
    }

    #[test]
    fn test_form_parses() {
        let input = form().into_input().expect("input");
        assert_eq!(input.discount_type, "percent");
        assert_eq!(input.discount_value.to_string(), "50");
        assert!(input.expires_at.is_some());
    }

    #[test]
    fn test_unknown_discount_type_rejected() {
        let mut f = form();
        f.discount_type = "bogo".to_string();
        assert!(f.into_input().is_err());
    }

    #[test]
    fn test_blank_optionals_are_none() {
        let mut f = form();
        f.min_order_value = Some(String::new());
        f.expires_at = None;
        let input = f.into_input().expect("input");
        assert_eq!(input.min_order_value, None);
        assert_eq!(input.expires_at, None);
    }
}
