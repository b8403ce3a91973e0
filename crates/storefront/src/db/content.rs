//! Scheduled marketing content: banners and the announcement bar.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gadgetgrid_core::{AnnouncementId, BannerId};

use super::RepositoryError;

/// A home-page carousel banner.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The announcement bar shown above the nav.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub message: String,
    pub link: Option<String>,
    pub background_color: String,
    pub text_color: String,
}

/// Banners currently eligible for display: active, and inside their optional
/// visibility window. Ordered by sort order, ties broken by creation time.
///
/// The SQL predicate mirrors `gadgetgrid_core::visibility::banner_visible`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn active_banners(pool: &PgPool) -> Result<Vec<Banner>, RepositoryError> {
    let banners = sqlx::query_as::<_, Banner>(
        "SELECT id, title, image_url, link, sort_order, is_active,
                start_date, end_date, created_at
         FROM banners
         WHERE is_active
           AND (start_date IS NULL OR start_date <= NOW())
           AND (end_date IS NULL OR end_date >= NOW())
         ORDER BY sort_order ASC, created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(banners)
}

/// The most recent active announcement, if any.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn active_announcement(pool: &PgPool) -> Result<Option<Announcement>, RepositoryError> {
    let announcement = sqlx::query_as::<_, Announcement>(
        "SELECT id, message, link, background_color, text_color
         FROM announcements
         WHERE is_active
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(announcement)
}
