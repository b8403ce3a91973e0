//! End-to-end test harness for GadgetGrid.
//!
//! These tests drive the running storefront and admin binaries over HTTP
//! and are ignored by default. To run them:
//!
//! ```bash
//! cargo run -p gadgetgrid-cli -- migrate
//! cargo run -p gadgetgrid-cli -- seed
//! cargo run -p gadgetgrid-storefront &
//! cargo run -p gadgetgrid-admin &
//! cargo test -p gadgetgrid-integration-tests -- --ignored
//! ```
//!
//! URLs are configurable via `STORE_URL` and `ADMIN_BASE_URL`; database
//! assertions connect via `GADGETGRID_DATABASE_URL` (or `DATABASE_URL`).

use reqwest::Client;
use sqlx::PgPool;
use uuid::Uuid;

/// Base URL of the storefront server.
#[must_use]
pub fn store_url() -> String {
    std::env::var("STORE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL of the admin server.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client with a cookie store, so session cookies persist across
/// requests the way a browser would.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the test database for direct assertions.
///
/// # Panics
///
/// Panics when no database URL is configured or the connection fails.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("GADGETGRID_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("GADGETGRID_DATABASE_URL or DATABASE_URL must be set");
    PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database")
}

/// A unique throwaway email for registration tests.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4().simple())
}

/// Register a fresh customer account and leave the client signed in.
///
/// # Panics
///
/// Panics if the registration request fails or is rejected.
pub async fn register_customer(client: &Client, email: &str) -> String {
    let resp = client
        .post(format!("{}/auth/register", store_url()))
        .form(&[
            ("name", "Integration Tester"),
            ("email", email),
            ("password", "correct horse battery"),
        ])
        .send()
        .await
        .expect("Failed to register customer");

    assert!(
        resp.status().is_redirection(),
        "registration should redirect, got {}",
        resp.status()
    );
    email.to_string()
}

/// Sign the client in to the admin panel.
///
/// Uses `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`; create the account with
/// `cargo run -p gadgetgrid-cli -- admin create` before running.
///
/// # Panics
///
/// Panics when the credentials are missing or rejected.
pub async fn admin_login(client: &Client) {
    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL must be set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD must be set");

    let resp = client
        .post(format!("{}/login", admin_base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in to admin");

    assert!(
        resp.status().is_redirection(),
        "admin login should redirect, got {}",
        resp.status()
    );
}
