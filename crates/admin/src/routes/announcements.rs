//! Announcement-bar management routes.
//!
//! At most one announcement is active; activation deactivates the rest in
//! the database layer's transaction.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::db::content::{self, Announcement};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

const DEFAULT_BACKGROUND: &str = "#111827";
const DEFAULT_TEXT: &str = "#ffffff";

/// An announcement row for the list page.
pub struct AnnouncementView {
    pub id: i32,
    pub message: String,
    pub link: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Announcement> for AnnouncementView {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id.as_i32(),
            message: a.message.clone(),
            link: a.link.clone(),
            background_color: a.background_color.clone(),
            text_color: a.text_color.clone(),
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

/// Announcements page template.
#[derive(Template, WebTemplate)]
#[template(path = "announcements/index.html")]
pub struct AnnouncementsTemplate {
    pub announcements: Vec<AnnouncementView>,
}

/// New announcement form data.
#[derive(Debug, Deserialize)]
pub struct AnnouncementForm {
    pub message: String,
    pub link: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub activate: Option<String>,
}

/// Display all announcements.
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let announcements = content::list_announcements(state.pool()).await?;

    Ok(AnnouncementsTemplate {
        announcements: announcements.iter().map(AnnouncementView::from).collect(),
    })
}

/// Create an announcement, optionally activating it immediately.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<AnnouncementForm>,
) -> Result<Response> {
    let background = form
        .background_color
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_BACKGROUND);
    let text = form
        .text_color
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_TEXT);

    content::create_announcement(
        state.pool(),
        form.message.trim(),
        form.link.as_deref().map(str::trim).filter(|l| !l.is_empty()),
        background,
        text,
        form.activate.is_some(),
    )
    .await?;

    Ok(Redirect::to("/announcements").into_response())
}

/// Activate an announcement, deactivating all others.
#[instrument(skip(state, admin))]
pub async fn activate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    content::activate_announcement(state.pool(), id.into()).await?;

    Ok(Redirect::to("/announcements").into_response())
}

/// Deactivate an announcement.
#[instrument(skip(state, admin))]
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    content::deactivate_announcement(state.pool(), id.into()).await?;

    Ok(Redirect::to("/announcements").into_response())
}

/// Delete an announcement.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Response> {
    content::delete_announcement(state.pool(), id.into()).await?;

    Ok(Redirect::to("/announcements").into_response())
}
