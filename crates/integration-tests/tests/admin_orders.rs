//! Admin order management tests against a running admin server.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p gadgetgrid-cli -- migrate)
//! - The admin server running (cargo run -p gadgetgrid-admin)
//! - An admin account plus `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` set
//!
//! Run with: cargo test -p gadgetgrid-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use gadgetgrid_core::OrderStatus;
use gadgetgrid_integration_tests::{admin_base_url, admin_login, browser_client, test_pool};

/// Insert an order directly with the given status and return its id.
async fn create_test_order(pool: &PgPool, status: &str) -> i32 {
    let address = json!({
        "name": "Integration Tester",
        "mobile": "9876543210",
        "alt_phone": null,
        "street": "12 MG Road",
        "landmark": null,
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
    });
    sqlx::query_scalar(
        "INSERT INTO orders
             (status, total_amount, discount_amount, final_amount, shipping_address)
         VALUES ($1, 999.00, 0, 999.00, $2)
         RETURNING id",
    )
    .bind(status)
    .bind(address)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test order")
}

async fn order_status(pool: &PgPool, order_id: i32) -> String {
    sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read order status")
}

async fn post_status(client: &Client, order_id: i32, status: OrderStatus) -> StatusCode {
    client
        .post(format!("{}/orders/{order_id}/status", admin_base_url()))
        .form(&[("status", status.as_str())])
        .send()
        .await
        .expect("Failed to post status update")
        .status()
}

#[tokio::test]
#[ignore = "Requires running admin server, database, and admin credentials"]
async fn anonymous_requests_are_redirected_to_login() {
    let client = browser_client();

    let resp = client
        .get(format!("{}/orders", admin_base_url()))
        .send()
        .await
        .expect("Failed to request orders page");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[tokio::test]
#[ignore = "Requires running admin server, database, and admin credentials"]
async fn order_status_advances_one_stage_at_a_time() {
    let pool = test_pool().await;
    let client = browser_client();
    admin_login(&client).await;

    let order_id = create_test_order(&pool, "pending").await;

    let status = post_status(&client, order_id, OrderStatus::Processing).await;
    assert!(status.is_redirection(), "pending -> processing: {status}");
    assert_eq!(order_status(&pool, order_id).await, "processing");

    let status = post_status(&client, order_id, OrderStatus::Shipped).await;
    assert!(status.is_redirection(), "processing -> shipped: {status}");
    assert_eq!(order_status(&pool, order_id).await, "shipped");
}

#[tokio::test]
#[ignore = "Requires running admin server, database, and admin credentials"]
async fn skipping_a_stage_is_rejected() {
    let pool = test_pool().await;
    let client = browser_client();
    admin_login(&client).await;

    let order_id = create_test_order(&pool, "pending").await;

    let status = post_status(&client, order_id, OrderStatus::Delivered).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(order_status(&pool, order_id).await, "pending");
}

#[tokio::test]
#[ignore = "Requires running admin server, database, and admin credentials"]
async fn cancellation_works_from_any_open_stage_but_is_terminal() {
    let pool = test_pool().await;
    let client = browser_client();
    admin_login(&client).await;

    let order_id = create_test_order(&pool, "shipped").await;

    let status = post_status(&client, order_id, OrderStatus::Cancelled).await;
    assert!(status.is_redirection(), "shipped -> cancelled: {status}");
    assert_eq!(order_status(&pool, order_id).await, "cancelled");

    // No way out of a terminal state.
    let status = post_status(&client, order_id, OrderStatus::Processing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(order_status(&pool, order_id).await, "cancelled");
}

#[tokio::test]
#[ignore = "Requires running admin server, database, and admin credentials"]
async fn delivered_orders_accept_no_further_updates() {
    let pool = test_pool().await;
    let client = browser_client();
    admin_login(&client).await;

    let order_id = create_test_order(&pool, "delivered").await;

    let status = post_status(&client, order_id, OrderStatus::Cancelled).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(order_status(&pool, order_id).await, "delivered");
}
