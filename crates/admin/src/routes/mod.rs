//! HTTP route handlers for the admin back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dashboard
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /login                    - Login page
//! POST /login                    - Login action (admin role required)
//! POST /logout                   - Logout action
//!
//! # Products
//! GET  /products                 - Product list
//! GET  /products/new             - New product form
//! POST /products                 - Create product
//! GET  /products/{id}/edit       - Edit form
//! POST /products/{id}            - Update product
//! POST /products/{id}/delete     - Delete product
//!
//! # Categories
//! GET  /categories               - Categories with subcategories
//! POST /categories               - Create category
//! POST /categories/subcategories - Create subcategory
//! POST /categories/{id}/toggle   - Toggle active
//! POST /categories/{id}/delete   - Delete (cascades to subcategories)
//!
//! # Coupons
//! GET  /coupons                  - Coupon list
//! POST /coupons                  - Create coupon (duplicate code -> 409)
//! POST /coupons/{id}/toggle      - Toggle active
//! POST /coupons/{id}/delete      - Delete coupon
//!
//! # Banners
//! GET  /banners                  - Banner list
//! POST /banners                  - Create banner
//! POST /banners/{id}/toggle      - Toggle active
//! POST /banners/{id}/delete      - Delete banner
//!
//! # Announcements
//! GET  /announcements                  - Announcement list
//! POST /announcements                  - Create (optionally activate)
//! POST /announcements/{id}/activate    - Activate (deactivates the rest)
//! POST /announcements/{id}/deactivate  - Deactivate
//! POST /announcements/{id}/delete      - Delete
//!
//! # Orders
//! GET  /orders                   - Order list (?status= filter)
//! GET  /orders/{id}              - Order detail with line items
//! POST /orders/{id}/status       - Status update (transition table enforced)
//!
//! # Customers
//! GET  /customers                - Users with order counts and totals
//!
//! # Uploads
//! POST /api/uploads              - Multipart image upload, returns the URL
//! ```

pub mod announcements;
pub mod auth;
pub mod banners;
pub mod categories;
pub mod coupons;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod uploads;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}/edit", get(products::edit_form))
        .route("/{id}", post(products::update))
        .route("/{id}/delete", post(products::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/subcategories", post(categories::create_subcategory))
        .route("/{id}/toggle", post(categories::toggle))
        .route("/{id}/delete", post(categories::delete))
}

/// Create the coupon routes router.
pub fn coupon_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(coupons::index).post(coupons::create))
        .route("/{id}/toggle", post(coupons::toggle))
        .route("/{id}/delete", post(coupons::delete))
}

/// Create the banner routes router.
pub fn banner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banners::index).post(banners::create))
        .route("/{id}/toggle", post(banners::toggle))
        .route("/{id}/delete", post(banners::delete))
}

/// Create the announcement routes router.
pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(announcements::index).post(announcements::create))
        .route("/{id}/activate", post(announcements::activate))
        .route("/{id}/deactivate", post(announcements::deactivate))
        .route("/{id}/delete", post(announcements::delete))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
}

/// Create all routes for the admin back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .merge(auth_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/coupons", coupon_routes())
        .nest("/banners", banner_routes())
        .nest("/announcements", announcement_routes())
        .nest("/orders", order_routes())
        .route("/customers", get(customers::index))
        .route("/api/uploads", post(uploads::upload))
}
