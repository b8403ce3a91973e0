//! Cart resolver.
//!
//! Binds the browser session to a cart row via an opaque token. Reads never
//! create a cart; mutating operations call [`resolve_or_create`], which
//! issues a fresh token and stores it in the session.

use sqlx::PgPool;
use tower_sessions::Session;

use gadgetgrid_core::UserId;

use crate::db::RepositoryError;
use crate::db::carts::{self, Cart};
use crate::models::session_keys;

/// Errors that can occur while resolving a cart.
#[derive(Debug, thiserror::Error)]
pub enum CartResolveError {
    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// The session store rejected a read or write.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// The opaque cart token held in the session, if any.
pub async fn token(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_TOKEN)
        .await
        .ok()
        .flatten()
}

/// Resolve the session's cart without creating one.
///
/// # Errors
///
/// Returns `CartResolveError::Repository` if the lookup fails.
pub async fn resolve(pool: &PgPool, session: &Session) -> Result<Option<Cart>, CartResolveError> {
    let Some(token) = token(session).await else {
        return Ok(None);
    };
    Ok(carts::find_by_token(pool, &token).await?)
}

/// Resolve the session's cart, creating one (and issuing a fresh token into
/// the session) if none exists.
///
/// A stale token whose cart row has vanished is replaced the same way.
///
/// # Errors
///
/// Returns `CartResolveError` if the lookup/insert or the session write fails.
pub async fn resolve_or_create(
    pool: &PgPool,
    session: &Session,
    user_id: Option<UserId>,
) -> Result<Cart, CartResolveError> {
    if let Some(cart) = resolve(pool, session).await? {
        return Ok(cart);
    }

    let cart = carts::create(pool, user_id).await?;
    session
        .insert(session_keys::CART_TOKEN, &cart.session_token)
        .await?;

    Ok(cart)
}
