//! Banner and announcement management.
//!
//! The storefront only reads eligible content; all writes happen here. At
//! most one announcement may be active at a time, enforced by deactivating
//! the rest inside the same transaction as any activation.

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

/// Fields for creating a banner.
#[derive(Debug, Clone)]
pub struct BannerInput {
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// An announcement-bar entry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub message: String,
    pub link: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

const BANNER_COLUMNS: &str =
    "id, title, image_url, link, sort_order, is_active, start_date, end_date, created_at";

const ANNOUNCEMENT_COLUMNS: &str =
    "id, message, link, background_color, text_color, is_active, created_at";

/// All banners, in display order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_banners(pool: &PgPool) -> Result<Vec<Banner>, RepositoryError> {
    let banners = sqlx::query_as::<_, Banner>(&format!(
        "SELECT {BANNER_COLUMNS} FROM banners ORDER BY sort_order ASC, created_at ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(banners)
}

/// Create a banner. New banners start active; the visibility window
/// narrows eligibility further.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create_banner(pool: &PgPool, input: &BannerInput) -> Result<Banner, RepositoryError> {
    let banner = sqlx::query_as::<_, Banner>(&format!(
        "INSERT INTO banners (title, image_url, link, sort_order, start_date, end_date)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {BANNER_COLUMNS}"
    ))
    .bind(&input.title)
    .bind(&input.image_url)
    .bind(&input.link)
    .bind(input.sort_order)
    .bind(input.start_date)
    .bind(input.end_date)
    .fetch_one(pool)
    .await?;

    Ok(banner)
}

/// Flip a banner's active flag.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such banner exists.
pub async fn toggle_banner(pool: &PgPool, id: BannerId) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE banners SET is_active = NOT is_active WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Delete a banner.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such banner exists.
pub async fn delete_banner(pool: &PgPool, id: BannerId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// All announcements, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_announcements(pool: &PgPool) -> Result<Vec<Announcement>, RepositoryError> {
    let announcements = sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(announcements)
}

/// Create an announcement. When `activate` is set, every other announcement
/// is deactivated in the same transaction so exactly one stays active.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn create_announcement(
    pool: &PgPool,
    message: &str,
    link: Option<&str>,
    background_color: &str,
    text_color: &str,
    activate: bool,
) -> Result<Announcement, RepositoryError> {
    let mut tx = pool.begin().await?;

    if activate {
        sqlx::query("UPDATE announcements SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await?;
    }

    let announcement = sqlx::query_as::<_, Announcement>(&format!(
        "INSERT INTO announcements (message, link, background_color, text_color, is_active)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {ANNOUNCEMENT_COLUMNS}"
    ))
    .bind(message)
    .bind(link)
    .bind(background_color)
    .bind(text_color)
    .bind(activate)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(announcement)
}

/// Activate one announcement, deactivating all others. Both updates run in
/// one transaction, so an unknown id leaves the active set untouched.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such announcement exists.
pub async fn activate_announcement(
    pool: &PgPool,
    id: AnnouncementId,
) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE announcements SET is_active = FALSE WHERE is_active")
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("UPDATE announcements SET is_active = TRUE WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}

/// Deactivate an announcement.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such announcement exists.
pub async fn deactivate_announcement(
    pool: &PgPool,
    id: AnnouncementId,
) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE announcements SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Delete an announcement.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no such announcement exists.
pub async fn delete_announcement(
    pool: &PgPool,
    id: AnnouncementId,
) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
