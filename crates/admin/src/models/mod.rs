//! Domain models for the admin back-office.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
