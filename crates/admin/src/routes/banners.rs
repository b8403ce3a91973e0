//! Banner management routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use gadgetgrid_core::visibility;

use crate::db::content::{self, Banner, BannerInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A banner row for the list page.
pub struct BannerView {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Active and inside its window right now; the storefront is showing it.
    pub is_live: bool,
}

impl BannerView {
    fn at(b: &Banner, now: DateTime<Utc>) -> Self {
        Self {
            id: b.id.as_i32(),
            title: b.title.clone(),
            image_url: b.image_url.clone(),
            link: b.link.clone(),
            sort_order: b.sort_order,
            is_active: b.is_active,
            start_date: b.start_date,
            end_date: b.end_date,
            is_live: visibility::banner_visible(b.is_active, b.start_date, b.end_date, now),
        }
    }
}

impl From<&Banner> for BannerView {
    fn from(b: &Banner) -> Self {
        Self::at(b, Utc::now())
    }
}

/// Banners page template.
#[derive(Template, WebTemplate)]
#[template(path = "banners/index.html")]
pub struct BannersTemplate {
    pub banners: Vec<BannerView>,
}

/// New banner form data. Window dates are date-only inputs: the start is
/// midnight, the end is the last second of that day.
#[derive(Debug, Deserialize)]
pub struct BannerForm {
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
    pub sort_order: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_date(value: Option<&str>, end_of_day: bool) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            let date = v
                .parse::<NaiveDate>()
                .map_err(|_| AppError::BadRequest(format!("invalid date: {v}")))?;
            let time = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
            Ok(Some(
                date.and_hms_opt(time.0, time.1, time.2)
                    .unwrap_or_else(|| date.into())
                    .and_utc(),
            ))
        }
    }
}

/// Display all banners.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let banners = content::list_banners(state.pool()).await?;

    Ok(BannersTemplate {
        banners: banners.iter().map(BannerView::from).collect(),
    })
}

/// Create a banner.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<BannerForm>,
) -> Result<Response> {
    let input = BannerInput {
        title: form.title,
        image_url: form.image_url,
        link: form.link.filter(|l| !l.trim().is_empty()),
        sort_order: form.sort_order.unwrap_or(0),
        start_date: parse_date(form.start_date.as_deref(), false)?,
        end_date: parse_date(form.end_date.as_deref(), true)?,
    };

    content::create_banner(state.pool(), &input).await?;

    Ok(Redirect::to("/banners").into_response())
}

/// Toggle a banner's active flag.
#[instrument(skip(state, admin))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    content::toggle_banner(state.pool(), id.into()).await?;

    Ok(Redirect::to("/banners").into_response())
}

/// Delete a banner.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    content::delete_banner(state.pool(), id.into()).await?;

    Ok(Redirect::to("/banners").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_bounds() {
        let start = parse_date(Some("2026-10-01"), false).expect("ok").expect("some");
        assert_eq!(start.to_rfc3339(), "2026-10-01T00:00:00+00:00");

        let end = parse_date(Some("2026-10-31"), true).expect("ok").expect("some");
        assert_eq!(end.to_rfc3339(), "2026-10-31T23:59:59+00:00");
    }

    #[test]
    fn test_blank_date_is_none() {
        assert_eq!(parse_date(None, false).expect("ok"), None);
        assert_eq!(parse_date(Some("  "), true).expect("ok"), None);
    }

    #[test]
    fn test_garbage_date_rejected() {
        assert!(parse_date(Some("soon"), false).is_err());
    }

    fn banner(is_active: bool, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Banner {
        Banner {
            id: 1.into(),
            title: "Diwali Sale".to_string(),
            image_url: "/uploads/diwali.webp".to_string(),
            link: None,
            sort_order: 0,
            is_active,
            start_date: start,
            end_date: end,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unbounded_active_banner_is_live() {
        let view = BannerView::at(&banner(true, None, None), Utc::now());
        assert!(view.is_live);
    }

    #[test]
    fn test_expired_banner_stays_active_but_not_live() {
        let now = Utc::now();
        let view = BannerView::at(&banner(true, None, Some(now - chrono::Duration::days(1))), now);
        assert!(view.is_active);
        assert!(!view.is_live);
    }

    #[test]
    fn test_scheduled_banner_not_live_before_start() {
        let now = Utc::now();
        let view = BannerView::at(&banner(true, Some(now + chrono::Duration::days(1)), None), now);
        assert!(!view.is_live);
    }

    #[test]
    fn test_inactive_banner_not_live_inside_window() {
        let now = Utc::now();
        let view = BannerView::at(
            &banner(
                false,
                Some(now - chrono::Duration::days(1)),
                Some(now + chrono::Duration::days(1)),
            ),
            now,
        );
        assert!(!view.is_live);
    }
}
