//! Database operations for the storefront.
//!
//! # Tables
//!
//! - `users` / `user_passwords` - Site authentication
//! - `session` - Tower-sessions storage
//! - `categories` / `subcategories` / `products` - Catalog
//! - `carts` / `cart_items` - Opaque-token carts
//! - `addresses` - Buyer address book
//! - `orders` / `order_items` - Placed orders with price/address snapshots
//! - `banners` / `announcements` - Scheduled marketing content
//! - `wishlists` - Saved products per user
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p gadgetgrid-cli -- migrate
//! ```

pub mod addresses;
pub mod carts;
pub mod categories;
pub mod content;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
