//! GadgetGrid Storefront - Public e-commerce site.
//!
//! Server-rendered with Axum + Askama, HTMX for cart fragments, and
//! `PostgreSQL` for everything persistent. The admin back-office lives in a
//! separate binary; both share one database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
