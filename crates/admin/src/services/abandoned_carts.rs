//! Hourly abandoned-cart reminder sweep.
//!
//! Finds carts untouched for an hour that belong to signed-in users, mails
//! each owner once, and marks the cart so it is not mailed again. Any cart
//! mutation on the storefront side clears the mark and restarts the clock.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;

use crate::db::carts;
use crate::services::email::EmailService;

/// How far back a cart must be untouched to count as abandoned, in minutes.
const ABANDONED_AFTER_MINUTES: i64 = 60;

/// Interval between sweeps.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Run the sweep forever. Spawned as a background task at startup when SMTP
/// is configured.
pub async fn run(pool: PgPool, email: EmailService, store_url: String) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        interval.tick().await;
        match sweep_once(&pool, &email, &store_url).await {
            Ok(sent) => {
                if sent > 0 {
                    tracing::info!(sent, "Abandoned-cart sweep complete");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Abandoned-cart sweep failed");
                sentry::capture_error(&e);
            }
        }
    }
}

/// One pass over the abandoned carts. Returns the number of reminders sent.
///
/// A failure to mail one cart is logged and skipped; it stays unmarked so
/// the next sweep retries it.
///
/// # Errors
///
/// Returns `RepositoryError` only when the candidate query itself fails.
pub async fn sweep_once(
    pool: &PgPool,
    email: &EmailService,
    store_url: &str,
) -> Result<usize, crate::db::RepositoryError> {
    let cutoff = Utc::now() - chrono::Duration::minutes(ABANDONED_AFTER_MINUTES);
    let abandoned = carts::abandoned_before(pool, cutoff).await?;

    let mut sent = 0;
    for cart in abandoned {
        let result = email
            .send_cart_reminder(
                &cart.user_email,
                &cart.user_name,
                cart.item_count,
                store_url,
            )
            .await;

        match result {
            Ok(()) => {
                if let Err(e) = carts::mark_reminder_sent(pool, cart.cart_id).await {
                    tracing::error!(
                        cart_id = %cart.cart_id,
                        error = %e,
                        "Reminder sent but cart could not be marked"
                    );
                } else {
                    sent += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    cart_id = %cart.cart_id,
                    error = %e,
                    "Failed to send cart reminder, will retry next sweep"
                );
            }
        }
    }

    Ok(sent)
}
