//! Business logic for the admin back-office.

pub mod abandoned_carts;
pub mod auth;
pub mod email;
