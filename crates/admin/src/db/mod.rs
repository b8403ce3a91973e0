//! Database operations for the admin back-office.
//!
//! Shares the storefront's schema; these modules hold the write-heavy
//! queries the storefront never runs (catalog CRUD, order transitions,
//! marketing content management, the abandoned-cart sweep).

pub mod carts;
pub mod categories;
pub mod content;
pub mod coupons;
pub mod customers;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

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

    /// Constraint violation (e.g., duplicate slug or coupon code).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// An order status change that the transition rules forbid.
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
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
