//! GadgetGrid Admin - Back-office for the storefront.
//!
//! Catalog CRUD, order management, marketing content, customer overview,
//! image uploads, and the abandoned-cart reminder sweep. Shares the
//! storefront's database but runs as its own binary with its own session
//! cookie; only users with the admin role can sign in.

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
