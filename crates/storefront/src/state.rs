//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::content::{self, Announcement, Banner};

/// How long cached marketing content is served before re-reading the database.
const CONTENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    http: reqwest::Client,
    banner_cache: Cache<(), Arc<Vec<Banner>>>,
    announcement_cache: Cache<(), Arc<Option<Announcement>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let banner_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CONTENT_CACHE_TTL)
            .build();
        let announcement_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CONTENT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                http: reqwest::Client::new(),
                banner_cache,
                announcement_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the shared HTTP client.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Currently visible banners, cached for a minute.
    ///
    /// A database failure is logged and cached as an empty list so the home
    /// page still renders.
    pub async fn active_banners(&self) -> Arc<Vec<Banner>> {
        self.inner
            .banner_cache
            .get_with((), async {
                match content::active_banners(&self.inner.pool).await {
                    Ok(banners) => Arc::new(banners),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load banners");
                        Arc::new(Vec::new())
                    }
                }
            })
            .await
    }

    /// The active announcement bar, cached for a minute.
    pub async fn active_announcement(&self) -> Arc<Option<Announcement>> {
        self.inner
            .announcement_cache
            .get_with((), async {
                match content::active_announcement(&self.inner.pool).await {
                    Ok(announcement) => Arc::new(announcement),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load announcement");
                        Arc::new(None)
                    }
                }
            })
            .await
    }
}
