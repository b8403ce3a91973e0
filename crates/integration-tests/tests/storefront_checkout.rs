//! End-to-end checkout flow against a running storefront.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p gadgetgrid-cli -- migrate)
//! - The storefront server running (cargo run -p gadgetgrid-storefront)
//!
//! Run with: cargo test -p gadgetgrid-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use sqlx::PgPool;
use uuid::Uuid;

use gadgetgrid_integration_tests::{browser_client, register_customer, store_url, test_pool, unique_email};

/// Insert a throwaway product directly and return its id.
async fn create_test_product(pool: &PgPool, price: &str) -> i32 {
    let slug = format!("it-product-{}", Uuid::new_v4().simple());
    sqlx::query_scalar(
        "INSERT INTO products (name, slug, description, price, stock, images)
         VALUES ('Integration Test Gadget', $1, 'throwaway', $2::numeric, 100, '[]'::jsonb)
         RETURNING id",
    )
    .bind(&slug)
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test product")
}

async fn add_to_cart(client: &Client, product_id: i32, quantity: i32) {
    let resp = client
        .post(format!("{}/cart/add", store_url()))
        .form(&[
            ("product_id", product_id.to_string()),
            ("quantity", quantity.to_string()),
        ])
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(resp.status().is_success(), "add to cart: {}", resp.status());
}

async fn create_address(client: &Client) {
    let resp = client
        .post(format!("{}/account/addresses", store_url()))
        .form(&[
            ("name", "Integration Tester"),
            ("mobile", "9876543210"),
            ("street", "12 MG Road"),
            ("city", "Bengaluru"),
            ("state", "Karnataka"),
            ("pincode", "560001"),
        ])
        .send()
        .await
        .expect("Failed to create address");
    assert!(
        resp.status().is_redirection(),
        "create address: {}",
        resp.status()
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn checkout_places_order_with_expected_total() {
    let pool = test_pool().await;
    let client = browser_client();
    let product_id = create_test_product(&pool, "999.00").await;

    let email = register_customer(&client, &unique_email()).await;
    add_to_cart(&client, product_id, 2).await;
    create_address(&client).await;

    let resp = client
        .post(format!("{}/checkout", store_url()))
        .form(&[("payment_method", "cod")])
        .send()
        .await
        .expect("Failed to place order");
    assert!(
        resp.status().is_redirection(),
        "place order: {}",
        resp.status()
    );

    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("missing redirect location");
    let order_id: i32 = location
        .rsplit('/')
        .next()
        .and_then(|s| s.parse().ok())
        .expect("confirmation URL should end in an order id");

    // 999.00 x 2, no coupon.
    let (status, final_amount): (String, rust_decimal::Decimal) = sqlx::query_as(
        "SELECT o.status, o.final_amount
         FROM orders o JOIN users u ON u.id = o.user_id
         WHERE o.id = $1 AND u.email = $2",
    )
    .bind(order_id)
    .bind(&email)
    .fetch_one(&pool)
    .await
    .expect("Order should exist for the registered customer");

    assert_eq!(status, "pending");
    assert_eq!(final_amount.to_string(), "1998.00");

    // The cart was consumed by checkout.
    let resp = client
        .get(format!("{}/cart/count", store_url()))
        .send()
        .await
        .expect("Failed to fetch cart count");
    let body = resp.text().await.expect("Failed to read cart count");
    assert!(body.contains('0'), "cart should be empty, got: {body}");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn checkout_without_address_is_rejected() {
    let pool = test_pool().await;
    let client = browser_client();
    let product_id = create_test_product(&pool, "499.00").await;

    let email = register_customer(&client, &unique_email()).await;
    add_to_cart(&client, product_id, 1).await;

    let resp = client
        .post(format!("{}/checkout", store_url()))
        .form(&[("payment_method", "cod")])
        .send()
        .await
        .expect("Failed to post checkout");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The rejection wrote no order and left the cart line untouched.
    let order_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders o JOIN users u ON u.id = o.user_id WHERE u.email = $1",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .expect("Failed to count orders");
    assert_eq!(order_count, 0);

    let cart_quantity: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM cart_items WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .expect("Failed to sum cart quantity");
    assert_eq!(cart_quantity, 1);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn checkout_with_empty_cart_is_rejected() {
    let client = browser_client();
    register_customer(&client, &unique_email()).await;

    let resp = client
        .post(format!("{}/checkout", store_url()))
        .form(&[("payment_method", "cod")])
        .send()
        .await
        .expect("Failed to post checkout");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
